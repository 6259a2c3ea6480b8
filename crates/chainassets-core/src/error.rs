//! Error types for the ChainAssets decode pipeline.

use thiserror::Error;

use crate::event::EventKind;
use crate::spec::SpecVersion;

/// Errors from parsing a single primitive field value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Invalid account id '{value}': {reason}")]
    Account { value: String, reason: String },

    #[error("Invalid integer '{value}': {reason}")]
    Integer { value: String, reason: String },
}

/// Errors that can occur while resolving and decoding a single event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// No registered layout matches the fingerprint. Usually an unhandled
    /// runtime upgrade.
    #[error("Unknown spec version for {kind}: no layout registered for fingerprint {fingerprint}")]
    UnknownSpecVersion { kind: EventKind, fingerprint: String },

    /// A decoder was handed an event of another kind (dispatch bug).
    #[error("Invalid event kind: expected {expected}, got '{got}'")]
    InvalidEventKind { expected: EventKind, got: String },

    #[error("Failed to decode {kind} as {version}: {reason}")]
    DecodeFailure {
        kind: EventKind,
        version: SpecVersion,
        reason: String,
    },
}

impl DecodeError {
    /// Returns `true` for errors that an explicit policy may downgrade to a skip.
    pub fn is_unknown_version(&self) -> bool {
        matches!(self, Self::UnknownSpecVersion { .. })
    }
}

/// Errors from the canonical record builder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("{kind} cannot be built from normalized fields (from present: {from_present}, to present: {to_present})")]
    AddressShape {
        kind: EventKind,
        from_present: bool,
        to_present: bool,
    },
}

/// Errors that abort a whole batch. No records are produced when one is raised.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Decode error at block {block_height}, event {event_index}: {source}")]
    Decode {
        block_height: u32,
        event_index: u32,
        #[source]
        source: DecodeError,
    },

    #[error("Build error at block {block_height}, event {event_index}: {source}")]
    Build {
        block_height: u32,
        event_index: u32,
        #[source]
        source: BuildError,
    },

    #[error("Blocks out of order: {next} follows {previous}")]
    BlockOrder { previous: u32, next: u32 },

    #[error("Events out of order in block {block_height}: index {next} follows {previous}")]
    EventOrder {
        block_height: u32,
        previous: u32,
        next: u32,
    },

    #[error("Event {event_index} claims block {event_height} but belongs to block {block_height}")]
    HeightMismatch {
        block_height: u32,
        event_height: u32,
        event_index: u32,
    },
}

impl BatchError {
    /// The underlying decode error, if this batch failed while decoding.
    pub fn decode_error(&self) -> Option<&DecodeError> {
        match self {
            Self::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors from the spec version registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Fingerprint {fingerprint} for {kind} already maps to {existing}, refusing {conflicting}")]
    Conflict {
        kind: EventKind,
        fingerprint: String,
        existing: SpecVersion,
        conflicting: SpecVersion,
    },
}

/// Errors from a storage sink (the sink-write failure class).
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Sink connection failed: {0}")]
    Connect(String),

    #[error("Sink schema setup failed: {0}")]
    Schema(String),

    #[error("Sink write failed: {0}")]
    Write(String),

    #[error("Sink read failed: {0}")]
    Read(String),
}

/// Errors from a block feed.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed block at line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

/// Errors from the ingestion runner.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("Batch error: {0}")]
    Batch(#[from] BatchError),

    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_version_is_flagged() {
        let err = DecodeError::UnknownSpecVersion {
            kind: EventKind::Burned,
            fingerprint: "deadbeef".into(),
        };
        assert!(err.is_unknown_version());
        assert!(err.to_string().contains("Assets.Burned"));

        let err = DecodeError::InvalidEventKind {
            expected: EventKind::Issued,
            got: "Balances.Transfer".into(),
        };
        assert!(!err.is_unknown_version());
    }

    #[test]
    fn batch_error_exposes_decode_source() {
        let err = BatchError::Decode {
            block_height: 950_001,
            event_index: 4,
            source: DecodeError::UnknownSpecVersion {
                kind: EventKind::Issued,
                fingerprint: "00".into(),
            },
        };
        assert!(err.decode_error().unwrap().is_unknown_version());
        assert!(BatchError::BlockOrder { previous: 2, next: 1 }
            .decode_error()
            .is_none());
    }
}
