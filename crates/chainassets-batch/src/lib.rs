//! # chainassets-batch
//!
//! Batch processing for Moonriver `assets` events.
//!
//! ## Features
//! - [`BatchPipeline`]: turns an ordered slice of blocks into one
//!   all-or-nothing [`TransferBatch`](chainassets_core::TransferBatch)
//! - [`Ingestor`]: pulls blocks from a feed in fixed-size batches and hands
//!   each finished batch to a sink, strictly in order
//! - [`IngestConfig`]: YAML configuration with defaults for every field
//! - [`VecFeed`] / [`JsonFileFeed`]: in-memory and file-backed block feeds
//!
//! ## Usage
//! ```no_run
//! use chainassets_batch::{BatchPipeline, UnknownVersionPolicy};
//!
//! let pipeline = BatchPipeline::new().with_policy(UnknownVersionPolicy::Fail);
//! // let batch = pipeline.process_batch(&blocks)?;
//! ```

pub mod config;
pub mod feed;
pub mod ingest;
pub mod pipeline;

pub use config::{ConfigError, IngestConfig, StorageConfig};
pub use feed::{JsonFileFeed, VecFeed};
pub use ingest::{IngestReport, Ingestor};
pub use pipeline::{BatchPipeline, UnknownVersionPolicy};
