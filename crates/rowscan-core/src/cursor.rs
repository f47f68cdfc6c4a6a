//! Driver boundary: the row cursor the core consumes and the query
//! capability used by the convenience wrappers.

use crate::{
    traits::FieldSlot,
    value::{DecodeError, Value},
};
use std::error::Error as StdError;

///
/// ScanTarget
///
/// One write location per result column, aligned with `RowCursor::columns`.
///

pub enum ScanTarget<'a> {
    /// Field of the destination reached through its access path.
    Field(&'a mut dyn FieldSlot),
    /// Column with no destination field; its value is read and dropped.
    Discard,
}

impl ScanTarget<'_> {
    /// Write one decoded column value into this target.
    pub fn assign(&mut self, value: Value) -> Result<(), DecodeError> {
        match self {
            Self::Field(slot) => slot.assign(value),
            Self::Discard => Ok(()),
        }
    }

    #[must_use]
    pub const fn is_discard(&self) -> bool {
        matches!(self, Self::Discard)
    }
}

///
/// RowCursor
///
/// Forward-only iterator over an in-progress query result.
///
/// The core calls `release` exactly once per scan, after the last use.
///

pub trait RowCursor {
    type Error: StdError + Send + Sync + 'static;

    /// Result column names, in result order.
    fn columns(&self) -> Vec<String>;

    /// Move to the next row. `false` means exhausted or failed; consult
    /// `take_error` to tell them apart.
    fn advance(&mut self) -> bool;

    /// Write the current row into `targets`, one target per column in column
    /// order. Must fail when `targets.len()` differs from the column count.
    fn decode_into(&mut self, targets: &mut [ScanTarget<'_>]) -> Result<(), Self::Error>;

    /// Sticky iteration error, if `advance` stopped because of one.
    fn take_error(&mut self) -> Option<Self::Error>;

    fn release(&mut self);
}

///
/// Queryer
/// Anything that can execute SQL and hand back a cursor.
///

pub trait Queryer {
    type Cursor: RowCursor;
    type Error: StdError + Send + Sync + 'static;

    fn query(&self, sql: &str, args: &[Value]) -> Result<Self::Cursor, Self::Error>;
}
