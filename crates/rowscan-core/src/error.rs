use std::{error::Error as StdError, fmt};
use thiserror::Error as ThisError;

/// Boxed driver-side error carried inside [`ScanError`].
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

///
/// ScanError
///
/// Every failure a scan call can return. All of them abort the scan; none
/// are retried by the core.
///

#[derive(Debug, ThisError)]
pub enum ScanError {
    /// The destination record's field access disagrees with its model.
    #[error("invalid destination {destination}: {reason}")]
    InvalidDestination {
        destination: &'static str,
        reason: String,
    },

    /// Single-record scan over an empty result.
    #[error("no rows in result set")]
    NoRows,

    /// A reported column has no matching field on the destination.
    #[error("missing column {column:?} in dest {destination}")]
    MissingField {
        column: String,
        destination: &'static str,
    },

    /// The cursor failed to convert or write one row's values.
    #[error("failed to parse a row: {source}")]
    Decode {
        row: u64,
        #[source]
        source: BoxError,
    },

    /// Sticky error reported by the cursor after iteration stopped.
    #[error("{0}")]
    Driver(#[source] BoxError),

    /// Query execution failed before a cursor was produced.
    #[error("{0}")]
    Query(#[source] BoxError),
}

impl ScanError {
    pub(crate) fn invalid_destination(destination: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidDestination {
            destination,
            reason: reason.into(),
        }
    }

    pub(crate) fn missing_field(column: impl Into<String>, destination: &'static str) -> Self {
        Self::MissingField {
            column: column.into(),
            destination,
        }
    }

    pub(crate) fn decode<E>(row: u64, err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Decode {
            row,
            source: Box::new(err),
        }
    }

    pub(crate) fn driver<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Driver(Box::new(err))
    }

    pub(crate) fn query<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Query(Box::new(err))
    }

    /// True for the distinguished "no rows" condition of single-record scans.
    #[must_use]
    pub const fn is_no_rows(&self) -> bool {
        matches!(self, Self::NoRows)
    }

    #[must_use]
    pub const fn class(&self) -> ScanErrorClass {
        match self {
            Self::InvalidDestination { .. } => ScanErrorClass::InvalidDestination,
            Self::NoRows => ScanErrorClass::NotFound,
            Self::MissingField { .. } => ScanErrorClass::MissingField,
            Self::Decode { .. } => ScanErrorClass::Decode,
            Self::Driver(_) => ScanErrorClass::Driver,
            Self::Query(_) => ScanErrorClass::Query,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}: {self}", self.class())
    }
}

///
/// ScanErrorClass
/// Stable classification used by trace events and callers that branch on kind.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScanErrorClass {
    InvalidDestination,
    NotFound,
    MissingField,
    Decode,
    Driver,
    Query,
}

impl fmt::Display for ScanErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvalidDestination => "invalid_destination",
            Self::NotFound => "not_found",
            Self::MissingField => "missing_field",
            Self::Decode => "decode",
            Self::Driver => "driver",
            Self::Query => "query",
        };
        write!(f, "{label}")
    }
}

///
/// ScanResultExt
/// Existence-check helper for results of single-record scans.
///

pub trait ScanResultExt<T> {
    /// Map `Err(NoRows)` to `Ok(None)`; every other outcome passes through.
    fn optional(self) -> Result<Option<T>, ScanError>;
}

impl<T> ScanResultExt<T> for Result<T, ScanError> {
    fn optional(self) -> Result<Option<T>, ScanError> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(ScanError::NoRows) => Ok(None),
            Err(err) => Err(err),
        }
    }
}
