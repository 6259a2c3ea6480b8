//! # chainassets-observability
//!
//! Metrics and structured logging for ChainAssets.
//!
//! ## Built-in metrics
//! - `chainassets.records_built`   : counter, tagged with status
//! - `chainassets.events_skipped`  : counter, tagged with reason
//! - `chainassets.decode_errors`   : counter, tagged with error_type
//! - `chainassets.batch_size`      : histogram (records per batch)
//! - `chainassets.batch_latency_ms`: histogram
//!
//! ## Structured logging
//! Text or JSON logs via `tracing-subscriber`, with per-component levels.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::IngestMetrics;
pub use tracing_setup::{init_tracing, LogConfig};
