//! Scan tracing boundary.
//!
//! Tracing is optional, injected by the caller, and must not affect scan semantics.

use crate::error::{ScanError, ScanErrorClass};

///
/// ScanTraceSink
///

pub trait ScanTraceSink: Send + Sync {
    fn on_event(&self, event: ScanTraceEvent);
}

///
/// ScanMode
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScanMode {
    One,
    All,
    Flat,
}

impl ScanMode {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::One => "one",
            Self::All => "all",
            Self::Flat => "flat",
        }
    }
}

///
/// ScanTraceEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScanTraceEvent {
    Start {
        mode: ScanMode,
        destination: &'static str,
    },
    Resolved {
        mode: ScanMode,
        destination: &'static str,
        columns: u32,
        discarded: u32,
    },
    Finish {
        mode: ScanMode,
        destination: &'static str,
        rows: u64,
    },
    Error {
        mode: ScanMode,
        destination: &'static str,
        class: ScanErrorClass,
    },
}

///
/// TraceScope
///

pub(crate) struct TraceScope {
    sink: &'static dyn ScanTraceSink,
    mode: ScanMode,
    destination: &'static str,
}

impl TraceScope {
    fn new(sink: &'static dyn ScanTraceSink, mode: ScanMode, destination: &'static str) -> Self {
        sink.on_event(ScanTraceEvent::Start { mode, destination });

        Self {
            sink,
            mode,
            destination,
        }
    }

    pub(crate) fn resolved(&self, columns: usize, discarded: usize) {
        self.sink.on_event(ScanTraceEvent::Resolved {
            mode: self.mode,
            destination: self.destination,
            columns: u32::try_from(columns).unwrap_or(u32::MAX),
            discarded: u32::try_from(discarded).unwrap_or(u32::MAX),
        });
    }

    pub(crate) fn finish(self, rows: u64) {
        self.sink.on_event(ScanTraceEvent::Finish {
            mode: self.mode,
            destination: self.destination,
            rows,
        });
    }

    pub(crate) fn error(self, err: &ScanError) {
        self.sink.on_event(ScanTraceEvent::Error {
            mode: self.mode,
            destination: self.destination,
            class: err.class(),
        });
    }
}

pub(crate) fn start_scan_trace(
    sink: Option<&'static dyn ScanTraceSink>,
    mode: ScanMode,
    destination: &'static str,
) -> Option<TraceScope> {
    let sink = sink?;

    Some(TraceScope::new(sink, mode, destination))
}

/// Close a trace scope with the outcome of one scan call.
pub(crate) fn finish_scan_trace(
    scope: Option<TraceScope>,
    result: Result<u64, ScanError>,
) -> Result<(), ScanError> {
    match (scope, result) {
        (Some(scope), Ok(rows)) => {
            scope.finish(rows);
            Ok(())
        }
        (Some(scope), Err(err)) => {
            scope.error(&err);
            Err(err)
        }
        (None, result) => result.map(|_| ()),
    }
}
