//! ## Crate layout
//! - `cursor`: the row cursor and query boundary drivers implement.
//! - `error`: `ScanError` and the `optional()` existence helper.
//! - `memory`: in-memory cursor and queryer for tests and fixtures.
//! - `model`: static record models emitted by `#[derive(Record)]`.
//! - `naming`: field-name to column-key strategies.
//! - `obs`: injectable scan trace sink.
//! - `resolve`: column resolution and the per-type index cache.
//! - `scan`: `Scanner` and the scan/query entry points.
//! - `value`: column values and typed decoding.
//!
//! The `prelude` module covers declaring records and running scans.

pub use rowscan_core as core;

// runtime modules, addressed by derive output as `::rowscan::<module>`
pub use rowscan_core::{
    cursor, error, materialize, memory, model, naming, obs, resolve, scan, traits, value,
};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use rowscan_core::{MAX_EMBED_DEPTH, ScanError, ScanResultExt};
pub use rowscan_core::scan::{get, scan_all, scan_flat, scan_one, select, select_flat};

//
// Macros
//

pub use rowscan_derive::Record;

///
/// Prelude
/// `Record` names both the derive macro and the trait
///

pub mod prelude {
    pub use rowscan_derive::Record;
    pub use rowscan_core::{
        cursor::{Queryer, RowCursor, ScanTarget},
        error::{ScanError, ScanResultExt as _},
        scan::{MissingColumns, Scanner},
        traits::{FromValue, Record, ScanElement},
        value::Value,
    };
}
