//! # covenant-observability
//!
//! Structured logging and run statistics for the review pipeline.
//!
//! - [`tracing_setup`]: subscriber installation, lifecycle events, span macros.
//! - [`RunLog`]: bounded record of past runs with latency percentiles.

pub mod run_log;
pub mod tracing_setup;

pub use run_log::{RunLog, RunLogEntry};
