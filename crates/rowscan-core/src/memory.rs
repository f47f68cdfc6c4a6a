//! In-memory cursor and queryer over owned rows.
//!
//! Behaves like a driver cursor from the core's point of view: arity is
//! checked on decode, a sticky error can be injected after N rows, and
//! every boundary call is counted through a shared [`CursorProbe`].

use crate::{
    cursor::{Queryer, RowCursor, ScanTarget},
    value::{DecodeError, Value},
};
use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicUsize, Ordering},
};
use thiserror::Error as ThisError;

///
/// MemoryCursorError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum MemoryCursorError {
    #[error("expected {expected} scan targets, got {found}")]
    Arity { expected: usize, found: usize },

    #[error("column {column:?}: {source}")]
    Decode {
        column: String,
        #[source]
        source: DecodeError,
    },

    #[error("decode called without a current row")]
    NoCurrentRow,

    #[error("{0}")]
    Failed(String),
}

///
/// CursorProbe
///
/// Call counters shared between a cursor and the test that handed it off.
///

#[derive(Clone, Debug, Default)]
pub struct CursorProbe {
    advances: Arc<AtomicUsize>,
    decodes: Arc<AtomicUsize>,
    releases: Arc<AtomicUsize>,
}

impl CursorProbe {
    #[must_use]
    pub fn advances(&self) -> usize {
        self.advances.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn decodes(&self) -> usize {
        self.decodes.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::Relaxed)
    }

    fn bump(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

///
/// MemoryRows
///

#[derive(Clone, Debug)]
pub struct MemoryRows {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    position: usize,
    current: Option<Vec<Value>>,
    fail_after: Option<(usize, String)>,
    error: Option<MemoryCursorError>,
    released: bool,
    probe: CursorProbe,
}

impl MemoryRows {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            position: 0,
            current: None,
            fail_after: None,
            error: None,
            released: false,
            probe: CursorProbe::default(),
        }
    }

    #[must_use]
    pub fn with_row<I, V>(mut self, row: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
        self
    }

    /// Stop after `rows` rows and report `message` as the sticky error.
    #[must_use]
    pub fn fail_after(mut self, rows: usize, message: impl Into<String>) -> Self {
        self.fail_after = Some((rows, message.into()));
        self
    }

    #[must_use]
    pub fn probe(&self) -> CursorProbe {
        self.probe.clone()
    }

    #[must_use]
    pub const fn is_released(&self) -> bool {
        self.released
    }
}

impl RowCursor for MemoryRows {
    type Error = MemoryCursorError;

    fn columns(&self) -> Vec<String> {
        self.columns.clone()
    }

    fn advance(&mut self) -> bool {
        CursorProbe::bump(&self.probe.advances);
        self.current = None;

        if self.released || self.error.is_some() {
            return false;
        }
        if let Some((limit, message)) = &self.fail_after
            && self.position >= *limit
        {
            self.error = Some(MemoryCursorError::Failed(message.clone()));
            return false;
        }

        let Some(row) = self.rows.get(self.position) else {
            return false;
        };
        self.current = Some(row.clone());
        self.position += 1;

        true
    }

    fn decode_into(&mut self, targets: &mut [ScanTarget<'_>]) -> Result<(), Self::Error> {
        CursorProbe::bump(&self.probe.decodes);

        let row = self.current.as_ref().ok_or(MemoryCursorError::NoCurrentRow)?;
        if row.len() != targets.len() {
            return Err(MemoryCursorError::Arity {
                expected: row.len(),
                found: targets.len(),
            });
        }

        for ((target, value), column) in targets.iter_mut().zip(row).zip(&self.columns) {
            target
                .assign(value.clone())
                .map_err(|source| MemoryCursorError::Decode {
                    column: column.clone(),
                    source,
                })?;
        }

        Ok(())
    }

    fn take_error(&mut self) -> Option<Self::Error> {
        self.error.take()
    }

    fn release(&mut self) {
        CursorProbe::bump(&self.probe.releases);
        self.released = true;
        self.current = None;
    }
}

///
/// MemoryQueryer
///
/// Serves a registered `MemoryRows` per SQL text and logs every call.
///

#[derive(Debug, Default)]
pub struct MemoryQueryer {
    results: Vec<(String, MemoryRows)>,
    executed: Mutex<Vec<(String, Vec<Value>)>>,
}

impl MemoryQueryer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_result(mut self, sql: impl Into<String>, rows: MemoryRows) -> Self {
        self.results.push((sql.into(), rows));
        self
    }

    /// Every `(sql, args)` pair executed so far, in call order.
    #[must_use]
    pub fn executed(&self) -> Vec<(String, Vec<Value>)> {
        self.executed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Queryer for MemoryQueryer {
    type Cursor = MemoryRows;
    type Error = MemoryCursorError;

    fn query(&self, sql: &str, args: &[Value]) -> Result<Self::Cursor, Self::Error> {
        self.executed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((sql.to_string(), args.to_vec()));

        self.results
            .iter()
            .find(|(registered, _)| registered == sql)
            .map(|(_, rows)| rows.clone())
            .ok_or_else(|| MemoryCursorError::Failed(format!("no result registered for: {sql}")))
    }
}
