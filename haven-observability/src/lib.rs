//! # haven-observability
//!
//! Tracing subscriber setup, structured search lifecycle events, and an
//! in-process query log for latency and exhaustion-rate analysis.

pub mod query_log;
pub mod tracing_setup;

pub use query_log::{QueryLog, QueryLogEntry};
pub use tracing_setup::{init_tracing, init_tracing_from_config, init_tracing_with_filter};
