//! `BatchPipeline`: resolves, decodes, normalizes and builds every
//! matching event of a block batch.

use chainassets_core::{
    error::{BatchError, DecodeError},
    event::{Block, EventKind, RawEvent},
    record::{CanonicalTransfer, TransferBatch},
};
use chainassets_registry::SpecVersionRegistry;
use chainassets_substrate::{build, decode_event, normalize};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// What to do with a matching event whose fingerprint is not registered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownVersionPolicy {
    /// Abort the batch with `UnknownSpecVersion`.
    #[default]
    Fail,
    /// Log a warning, count the event as skipped, and continue.
    Skip,
}

/// Synchronous batch processor.
///
/// Holds no state besides a read-only registry, so one pipeline can be shared
/// by any number of callers.
#[derive(Debug, Clone, Copy)]
pub struct BatchPipeline<'r> {
    registry: &'r SpecVersionRegistry,
    policy: UnknownVersionPolicy,
}

impl BatchPipeline<'static> {
    /// A pipeline over the compiled-in registry with the `Fail` policy.
    pub fn new() -> Self {
        Self::with_registry(SpecVersionRegistry::global())
    }
}

impl Default for BatchPipeline<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> BatchPipeline<'r> {
    pub fn with_registry(registry: &'r SpecVersionRegistry) -> Self {
        Self {
            registry,
            policy: UnknownVersionPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: UnknownVersionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> UnknownVersionPolicy {
        self.policy
    }

    pub fn registry(&self) -> &'r SpecVersionRegistry {
        self.registry
    }

    /// Process `blocks` into one batch of canonical records.
    ///
    /// Records come out in `(block_height, event_index)` order. Any error
    /// discards the whole batch: the caller gets either every record or none.
    pub fn process_batch(&self, blocks: &[Block]) -> Result<TransferBatch, BatchError> {
        check_order(blocks)?;

        let mut batch = TransferBatch {
            first_height: blocks.first().map(|b| b.height),
            last_height: blocks.last().map(|b| b.height),
            ..TransferBatch::default()
        };

        for block in blocks {
            for raw in &block.events {
                let Some(kind) = raw.kind() else {
                    batch.ignored += 1;
                    continue;
                };

                match self.process_event(kind, raw) {
                    Ok(record) => {
                        debug!(id = %record.id, status = %record.status, "record built");
                        batch.records.push(record);
                    }
                    Err(err) if self.skips(&err) => {
                        warn!(
                            block = raw.block_height,
                            index = raw.event_index,
                            error = %err,
                            "skipping event with unknown spec version"
                        );
                        batch.skipped += 1;
                    }
                    Err(err) => return Err(err),
                }
            }
        }

        info!(
            "BatchPipeline: {} blocks ({:?}..={:?}) → {} records, {} skipped, {} ignored",
            blocks.len(),
            batch.first_height,
            batch.last_height,
            batch.records.len(),
            batch.skipped,
            batch.ignored
        );
        Ok(batch)
    }

    /// Run one matching event through resolve → decode → normalize → build.
    pub fn process_event(
        &self,
        kind: EventKind,
        raw: &RawEvent,
    ) -> Result<CanonicalTransfer, BatchError> {
        let at = |source: DecodeError| BatchError::Decode {
            block_height: raw.block_height,
            event_index: raw.event_index,
            source,
        };

        let version = self
            .registry
            .resolve_version(kind, &raw.fingerprint)
            .map_err(at)?;
        let decoded = decode_event(kind, raw, version).map_err(at)?;

        build(raw.transfer_id(), kind, &normalize(&decoded)).map_err(|source| BatchError::Build {
            block_height: raw.block_height,
            event_index: raw.event_index,
            source,
        })
    }

    fn skips(&self, err: &BatchError) -> bool {
        match self.policy {
            UnknownVersionPolicy::Fail => false,
            UnknownVersionPolicy::Skip => err
                .decode_error()
                .is_some_and(DecodeError::is_unknown_version),
        }
    }
}

/// Blocks strictly ascending by height; inside a block, events strictly
/// ascending by index and stamped with the block's height.
fn check_order(blocks: &[Block]) -> Result<(), BatchError> {
    for pair in blocks.windows(2) {
        if pair[1].height <= pair[0].height {
            return Err(BatchError::BlockOrder {
                previous: pair[0].height,
                next: pair[1].height,
            });
        }
    }

    for block in blocks {
        if let Some(ev) = block.events.iter().find(|e| e.block_height != block.height) {
            return Err(BatchError::HeightMismatch {
                block_height: block.height,
                event_height: ev.block_height,
                event_index: ev.event_index,
            });
        }
        for pair in block.events.windows(2) {
            if pair[1].event_index <= pair[0].event_index {
                return Err(BatchError::EventOrder {
                    block_height: block.height,
                    previous: pair[0].event_index,
                    next: pair[1].event_index,
                });
            }
        }
    }
    Ok(())
}
