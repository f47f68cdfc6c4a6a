//! Scan entry points: single record, record list, and flat scalar list.
//!
//! Every entry point takes ownership of the cursor and releases it exactly
//! once before returning.

mod guard;


use crate::{
    cursor::{Queryer, RowCursor, ScanTarget},
    error::ScanError,
    materialize::materialize_row,
    obs::trace::{ScanMode, ScanTraceSink, TraceScope, finish_scan_trace, start_scan_trace},
    resolve::{AccessPath, Mapper},
    traits::{FromValue, Record, ScanElement},
    value::Value,
};
use guard::CursorGuard;
use std::{any::type_name, fmt, sync::Arc};

///
/// MissingColumns
///
/// What to do with a result column that has no destination field.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MissingColumns {
    /// Abort with `ScanError::MissingField` before any row is decoded.
    #[default]
    Reject,
    /// Read the column into a discard target.
    Discard,
}

///
/// Scanner
///
/// Scan policy (mapper, missing-column handling, tracing) plus the scan
/// entry points. `Scanner::default()` backs the free functions.
///

#[derive(Clone)]
pub struct Scanner {
    mapper: Arc<Mapper>,
    missing_columns: MissingColumns,
    trace: Option<&'static dyn ScanTraceSink>,
}

impl Scanner {
    #[must_use]
    pub fn new() -> Self {
        Self {
            mapper: Mapper::global(),
            missing_columns: MissingColumns::Reject,
            trace: None,
        }
    }

    #[must_use]
    pub fn with_mapper(mut self, mapper: Arc<Mapper>) -> Self {
        self.mapper = mapper;
        self
    }

    #[must_use]
    pub const fn missing_columns(mut self, policy: MissingColumns) -> Self {
        self.missing_columns = policy;
        self
    }

    /// Shorthand for `missing_columns(MissingColumns::Discard)`.
    #[must_use]
    pub const fn relaxed(self) -> Self {
        self.missing_columns(MissingColumns::Discard)
    }

    #[must_use]
    pub const fn trace_sink(mut self, sink: &'static dyn ScanTraceSink) -> Self {
        self.trace = Some(sink);
        self
    }

    #[must_use]
    pub fn mapper(&self) -> &Mapper {
        &self.mapper
    }

    //
    // Scan modes
    //

    /// Scan the first row into `dest`.
    ///
    /// An empty result is `ScanError::NoRows`; rows after the first are never
    /// read. A decode error can leave `dest` partially written.
    pub fn scan_one<C, R>(&self, cursor: C, dest: &mut R) -> Result<(), ScanError>
    where
        C: RowCursor,
        R: Record,
    {
        let trace = start_scan_trace(self.trace, ScanMode::One, R::MODEL.path);
        let result = self.run_one(CursorGuard::new(cursor), dest, trace.as_ref());

        finish_scan_trace(trace, result)
    }

    /// Scan the first row into a fresh `R`.
    pub fn fetch_one<C, R>(&self, cursor: C) -> Result<R, ScanError>
    where
        C: RowCursor,
        R: Record,
    {
        let mut record = R::default();
        self.scan_one(cursor, &mut record)?;

        Ok(record)
    }

    /// Scan every row, replacing `dest` only when the whole result decoded.
    pub fn scan_all<C, E>(&self, cursor: C, dest: &mut Vec<E>) -> Result<(), ScanError>
    where
        C: RowCursor,
        E: ScanElement,
    {
        let destination = <E::Record as Record>::MODEL.path;
        let trace = start_scan_trace(self.trace, ScanMode::All, destination);
        let result = self.run_all(CursorGuard::new(cursor), dest, trace.as_ref());

        finish_scan_trace(trace, result)
    }

    /// Scan a single-column result into a list of scalars, by position.
    pub fn scan_flat<C, T>(&self, cursor: C, dest: &mut Vec<T>) -> Result<(), ScanError>
    where
        C: RowCursor,
        T: FromValue,
    {
        let trace = start_scan_trace(self.trace, ScanMode::Flat, type_name::<T>());
        let result = Self::run_flat(CursorGuard::new(cursor), dest);

        finish_scan_trace(trace, result)
    }

    //
    // Query wrappers
    //

    pub fn get<Q, R>(
        &self,
        queryer: &Q,
        dest: &mut R,
        sql: &str,
        args: &[Value],
    ) -> Result<(), ScanError>
    where
        Q: Queryer,
        R: Record,
    {
        let cursor = queryer.query(sql, args).map_err(ScanError::query)?;

        self.scan_one(cursor, dest)
    }

    pub fn select<Q, E>(
        &self,
        queryer: &Q,
        dest: &mut Vec<E>,
        sql: &str,
        args: &[Value],
    ) -> Result<(), ScanError>
    where
        Q: Queryer,
        E: ScanElement,
    {
        let cursor = queryer.query(sql, args).map_err(ScanError::query)?;

        self.scan_all(cursor, dest)
    }

    pub fn select_flat<Q, T>(
        &self,
        queryer: &Q,
        dest: &mut Vec<T>,
        sql: &str,
        args: &[Value],
    ) -> Result<(), ScanError>
    where
        Q: Queryer,
        T: FromValue,
    {
        let cursor = queryer.query(sql, args).map_err(ScanError::query)?;

        self.scan_flat(cursor, dest)
    }

    //
    // Execution
    //

    // Resolve once per scan and apply the missing-column policy.
    fn resolve<R: Record>(
        &self,
        columns: &[String],
        trace: Option<&TraceScope>,
    ) -> Result<Vec<AccessPath>, ScanError> {
        let paths = self.mapper.resolve::<R, _>(columns)?;
        let missing: Vec<&str> = columns
            .iter()
            .zip(&paths)
            .filter(|(_, path)| path.is_missing())
            .map(|(column, _)| column.as_str())
            .collect();

        if let (MissingColumns::Reject, Some(column)) = (self.missing_columns, missing.first()) {
            return Err(ScanError::missing_field(*column, R::MODEL.path));
        }

        tracing::debug!(
            destination = R::MODEL.path,
            columns = columns.len(),
            discarded = ?missing,
            "resolved scan columns"
        );
        if let Some(trace) = trace {
            trace.resolved(columns.len(), missing.len());
        }

        Ok(paths)
    }

    fn run_one<C, R>(
        &self,
        mut cursor: CursorGuard<C>,
        dest: &mut R,
        trace: Option<&TraceScope>,
    ) -> Result<u64, ScanError>
    where
        C: RowCursor,
        R: Record,
    {
        if !cursor.advance() {
            return match cursor.take_error() {
                Some(err) => Err(ScanError::driver(err)),
                None => Err(ScanError::NoRows),
            };
        }

        let paths = self.resolve::<R>(&cursor.columns(), trace)?;
        materialize_row(&mut *cursor, dest, &paths, R::MODEL.path, 0)?;

        Ok(1)
    }

    fn run_all<C, E>(
        &self,
        mut cursor: CursorGuard<C>,
        dest: &mut Vec<E>,
        trace: Option<&TraceScope>,
    ) -> Result<u64, ScanError>
    where
        C: RowCursor,
        E: ScanElement,
    {
        let destination = <E::Record as Record>::MODEL.path;
        let paths = self.resolve::<E::Record>(&cursor.columns(), trace)?;
        let mut rows = Vec::new();

        while cursor.advance() {
            let mut record = E::Record::default();
            materialize_row(&mut *cursor, &mut record, &paths, destination, row_number(&rows))?;
            rows.push(E::from_record(record));
        }
        if let Some(err) = cursor.take_error() {
            return Err(ScanError::driver(err));
        }

        let count = row_number(&rows);
        *dest = rows;

        Ok(count)
    }

    fn run_flat<C, T>(mut cursor: CursorGuard<C>, dest: &mut Vec<T>) -> Result<u64, ScanError>
    where
        C: RowCursor,
        T: FromValue,
    {
        let mut values = Vec::new();

        while cursor.advance() {
            let row = row_number(&values);
            let mut value = Value::Null;
            cursor
                .decode_into(&mut [ScanTarget::Field(&mut value)])
                .map_err(|err| ScanError::decode(row, err))?;
            values.push(T::from_value(value).map_err(|err| ScanError::decode(row, err))?);
        }
        if let Some(err) = cursor.take_error() {
            return Err(ScanError::driver(err));
        }

        let count = row_number(&values);
        *dest = values;

        Ok(count)
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Scanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scanner")
            .field("mapper", &self.mapper)
            .field("missing_columns", &self.missing_columns)
            .field("trace", &self.trace.is_some())
            .finish()
    }
}

fn row_number<T>(rows: &[T]) -> u64 {
    u64::try_from(rows.len()).unwrap_or(u64::MAX)
}

//
// Free functions over the default scanner
//

pub fn scan_one<C: RowCursor, R: Record>(cursor: C, dest: &mut R) -> Result<(), ScanError> {
    Scanner::new().scan_one(cursor, dest)
}

pub fn scan_all<C: RowCursor, E: ScanElement>(
    cursor: C,
    dest: &mut Vec<E>,
) -> Result<(), ScanError> {
    Scanner::new().scan_all(cursor, dest)
}

pub fn scan_flat<C: RowCursor, T: FromValue>(
    cursor: C,
    dest: &mut Vec<T>,
) -> Result<(), ScanError> {
    Scanner::new().scan_flat(cursor, dest)
}

pub fn get<Q: Queryer, R: Record>(
    queryer: &Q,
    dest: &mut R,
    sql: &str,
    args: &[Value],
) -> Result<(), ScanError> {
    Scanner::new().get(queryer, dest, sql, args)
}

pub fn select<Q: Queryer, E: ScanElement>(
    queryer: &Q,
    dest: &mut Vec<E>,
    sql: &str,
    args: &[Value],
) -> Result<(), ScanError> {
    Scanner::new().select(queryer, dest, sql, args)
}

pub fn select_flat<Q: Queryer, T: FromValue>(
    queryer: &Q,
    dest: &mut Vec<T>,
    sql: &str,
    args: &[Value],
) -> Result<(), ScanError> {
    Scanner::new().select_flat(queryer, dest, sql, args)
}
