//! The storage collaborator the pipeline hands finished batches to.

use async_trait::async_trait;

use crate::error::SinkError;
use crate::record::TransferBatch;

/// Trait for persisting finished batches.
///
/// Implementations include `MemorySink`, `SqliteSink`, and `PostgresSink`
/// in `chainassets-storage`.
#[async_trait]
pub trait TransferSink: Send + Sync {
    /// Persist every record of `batch` as one unit. Either all records and
    /// the batch's last height become visible, or none do.
    async fn persist(&self, batch: &TransferBatch) -> Result<(), SinkError>;

    /// Height of the last block whose batch was persisted, if any.
    async fn last_height(&self) -> Result<Option<u32>, SinkError>;
}
