//! Core runtime for rowscan: column values, record models, field resolution,
//! row materialization, and the scan entry points.
#![warn(unreachable_pub)]

// derive output refers to `::rowscan`, keep that path valid inside this crate
extern crate self as rowscan;

// public exports are one module level down
pub mod cursor;
pub mod error;
pub mod materialize;
pub mod memory;
pub mod model;
pub mod naming;
pub mod obs;
pub mod resolve;
pub mod scan;
pub mod traits;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

pub use error::{ScanError, ScanResultExt};

///
/// CONSTANTS
///

/// Maximum nesting depth followed when indexing embedded records.
///
/// Deeper models are rejected as invalid destinations; the limit also stops
/// runaway indexing on self-referential hand-written models.
pub const MAX_EMBED_DEPTH: usize = 32;

///
/// Prelude
///
/// Prelude contains only the vocabulary needed to declare records and run scans.
///

pub mod prelude {
    pub use crate::{
        cursor::{Queryer, RowCursor, ScanTarget},
        error::{ScanError, ScanResultExt},
        scan::{MissingColumns, Scanner},
        traits::{FromValue, Record, ScanElement},
        value::Value,
    };
}
