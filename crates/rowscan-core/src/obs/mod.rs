//! Observability boundary.
//!
//! Scan logic never talks to a sink directly; everything flows through
//! `trace::TraceScope`, which is a no-op when no sink is installed.

pub mod trace;
