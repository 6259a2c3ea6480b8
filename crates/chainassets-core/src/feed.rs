//! The block source collaborator.

use async_trait::async_trait;

use crate::error::FeedError;
use crate::event::Block;

/// An ordered source of blocks.
///
/// Retrieval, retries, and timeouts are the feed's business; the pipeline
/// only asks for the next chunk.
#[async_trait]
pub trait BlockFeed: Send {
    /// Return up to `max` blocks following the previous call, in ascending
    /// height order. `Ok(None)` signals the feed is exhausted.
    async fn next_blocks(&mut self, max: usize) -> Result<Option<Vec<Block>>, FeedError>;
}
