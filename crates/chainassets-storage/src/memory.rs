//! In-memory transfer sink.
//!
//! Keeps records in insertion order. Useful for testing and dry runs that
//! don't need persistence.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

use chainassets_core::error::SinkError;
use chainassets_core::record::{CanonicalTransfer, TransferBatch, TransferId};
use chainassets_core::sink::TransferSink;

#[derive(Default)]
struct State {
    records: Vec<CanonicalTransfer>,
    by_id: HashMap<TransferId, usize>,
    last_height: Option<u32>,
}

/// In-memory sink. All data is lost when the process exits.
#[derive(Default)]
pub struct MemorySink {
    state: Mutex<State>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// All persisted records, in insertion order.
    pub fn records(&self) -> Vec<CanonicalTransfer> {
        self.state().records.clone()
    }

    pub fn get(&self, id: &TransferId) -> Option<CanonicalTransfer> {
        let state = self.state();
        state.by_id.get(id).map(|&i| state.records[i].clone())
    }

    /// Total number of persisted records.
    pub fn len(&self) -> usize {
        self.state().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TransferSink for MemorySink {
    async fn persist(&self, batch: &TransferBatch) -> Result<(), SinkError> {
        let mut state = self.state();
        for record in &batch.records {
            match state.by_id.get(&record.id).copied() {
                Some(i) => state.records[i] = record.clone(),
                None => {
                    let i = state.records.len();
                    state.by_id.insert(record.id.clone(), i);
                    state.records.push(record.clone());
                }
            }
        }
        if batch.last_height.is_some() {
            state.last_height = batch.last_height;
        }
        debug!(records = batch.len(), last_height = ?state.last_height, "batch stored in memory");
        Ok(())
    }

    async fn last_height(&self) -> Result<Option<u32>, SinkError> {
        Ok(self.state().last_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainassets_core::{Balance, TransferStatus};

    fn record(height: u32, index: u32, balance: u64) -> CanonicalTransfer {
        CanonicalTransfer {
            id: TransferId::from_position(height, index),
            asset_id: "7".into(),
            from: String::new(),
            to: format!("0x{}", "ab".repeat(20)),
            balance: Balance::from(balance),
            status: TransferStatus::Issued,
        }
    }

    fn batch(records: Vec<CanonicalTransfer>, last: u32) -> TransferBatch {
        TransferBatch {
            records,
            first_height: Some(last),
            last_height: Some(last),
            ..TransferBatch::default()
        }
    }

    #[tokio::test]
    async fn persist_and_read_back() {
        let sink = MemorySink::new();
        assert_eq!(sink.last_height().await.unwrap(), None);

        sink.persist(&batch(vec![record(10, 0, 1), record(10, 3, 2)], 10))
            .await
            .unwrap();
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.last_height().await.unwrap(), Some(10));
        assert_eq!(
            sink.get(&TransferId::from_position(10, 3)).unwrap().balance,
            Balance::from(2u64)
        );
    }

    #[tokio::test]
    async fn reinsert_replaces_by_id() {
        let sink = MemorySink::new();
        sink.persist(&batch(vec![record(10, 0, 1)], 10)).await.unwrap();
        sink.persist(&batch(vec![record(10, 0, 5)], 10)).await.unwrap();
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.records()[0].balance, Balance::from(5u64));
    }

    #[tokio::test]
    async fn empty_batch_advances_height() {
        let sink = MemorySink::new();
        sink.persist(&batch(vec![], 42)).await.unwrap();
        assert!(sink.is_empty());
        assert_eq!(sink.last_height().await.unwrap(), Some(42));

        sink.persist(&TransferBatch::default()).await.unwrap();
        assert_eq!(sink.last_height().await.unwrap(), Some(42));
    }
}
