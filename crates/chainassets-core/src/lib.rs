//! # chainassets-core
//!
//! Core types, errors, and collaborator traits shared across all ChainAssets
//! crates. The decoders, the registry, the batch pipeline, and the storage
//! sinks are all built on top of the definitions here.

pub mod error;
pub mod event;
pub mod feed;
pub mod record;
pub mod sink;
pub mod spec;
pub mod types;

pub use error::{
    BatchError, BuildError, DecodeError, FeedError, FieldError, IngestError, RegistryError,
    SinkError,
};
pub use event::{Block, EventFingerprint, EventKind, RawEvent};
pub use feed::BlockFeed;
pub use record::{CanonicalTransfer, TransferBatch, TransferId, TransferStatus};
pub use sink::TransferSink;
pub use spec::{Layout, SpecVersion};
pub use types::{AccountId, AssetId, Balance, ACCOUNT_ID_LEN};
