//! `Ingestor`: the sequential fetch → process → persist loop.

use chainassets_core::{
    error::{BatchError, DecodeError, IngestError},
    event::Block,
    feed::BlockFeed,
    sink::TransferSink,
};
use chainassets_observability::IngestMetrics;
use serde::Serialize;
use std::time::Instant;
use tracing::{info, warn};

use crate::config::IngestConfig;
use crate::pipeline::BatchPipeline;

/// Summary of one ingestion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Batches persisted
    pub batches: usize,
    /// Blocks processed (after range filtering)
    pub blocks: usize,
    pub records: usize,
    pub skipped: usize,
    pub ignored: usize,
    /// Height of the last persisted block
    pub last_height: Option<u32>,
}

/// Drives a [`BatchPipeline`] over a [`BlockFeed`] into a [`TransferSink`].
///
/// Batches are processed strictly one after another; a batch is persisted
/// before the next one is fetched.
pub struct Ingestor<'r> {
    pipeline: BatchPipeline<'r>,
    batch_size: usize,
    from_block: u32,
    to_block: Option<u32>,
    resume: bool,
    metrics: IngestMetrics,
}

impl Ingestor<'static> {
    /// Ingestor over the compiled-in registry, configured from `config`.
    pub fn from_config(config: &IngestConfig) -> Self {
        Self::new(
            BatchPipeline::new().with_policy(config.unknown_version),
            config.batch_size,
        )
        .with_range(config.from_block, config.to_block)
        .with_resume(config.resume)
    }
}

impl<'r> Ingestor<'r> {
    pub fn new(pipeline: BatchPipeline<'r>, batch_size: usize) -> Self {
        Self {
            pipeline,
            batch_size: batch_size.max(1),
            from_block: 0,
            to_block: None,
            resume: true,
            metrics: IngestMetrics::global(),
        }
    }

    pub fn with_range(mut self, from_block: u32, to_block: Option<u32>) -> Self {
        self.from_block = from_block;
        self.to_block = to_block;
        self
    }

    pub fn with_resume(mut self, resume: bool) -> Self {
        self.resume = resume;
        self
    }

    pub fn with_metrics(mut self, metrics: IngestMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Run until the feed is exhausted or `to_block` is passed.
    ///
    /// Stops at the first failing batch; batches persisted before it stay
    /// persisted, nothing of the failing batch is.
    pub async fn run<F, S>(&self, feed: &mut F, sink: &S) -> Result<IngestReport, IngestError>
    where
        F: BlockFeed + ?Sized,
        S: TransferSink + ?Sized,
    {
        let mut start = self.from_block;
        let mut previous = None;
        if self.resume {
            if let Some(height) = sink.last_height().await? {
                info!("Ingestor: resuming after block {height}");
                start = start.max(height.saturating_add(1));
                previous = Some(height);
            }
        }

        info!(
            "Ingestor: starting at block {start} (to={:?}, batch_size={})",
            self.to_block, self.batch_size
        );

        let mut report = IngestReport {
            last_height: previous,
            ..IngestReport::default()
        };

        while let Some(mut blocks) = feed.next_blocks(self.batch_size).await? {
            if blocks.is_empty() {
                break;
            }
            let past_end = match (self.to_block, blocks.last()) {
                (Some(end), Some(last)) => last.height >= end,
                _ => false,
            };
            blocks.retain(|b| self.in_range(start, b));

            if let (Some(prev), Some(first)) = (previous, blocks.first()) {
                if first.height <= prev {
                    let err = BatchError::BlockOrder {
                        previous: prev,
                        next: first.height,
                    };
                    self.metrics.record_error(error_label(&err));
                    return Err(err.into());
                }
            }

            if !blocks.is_empty() {
                self.ingest_batch(&blocks, sink, &mut report).await?;
                previous = report.last_height;
            }

            if past_end {
                break;
            }
        }

        info!(
            "Ingestor: done, {} batches, {} blocks, {} records ({} skipped)",
            report.batches, report.blocks, report.records, report.skipped
        );
        Ok(report)
    }

    async fn ingest_batch<S>(
        &self,
        blocks: &[Block],
        sink: &S,
        report: &mut IngestReport,
    ) -> Result<(), IngestError>
    where
        S: TransferSink + ?Sized,
    {
        let started = Instant::now();

        let batch = self.pipeline.process_batch(blocks).map_err(|err| {
            warn!(error = %err, "Ingestor: batch rejected");
            self.metrics.record_error(error_label(&err));
            err
        })?;

        sink.persist(&batch).await?;

        for record in &batch.records {
            self.metrics.record_built(record.status.as_str(), 1);
        }
        if batch.skipped > 0 {
            self.metrics
                .record_skipped("unknown_spec_version", batch.skipped as u64);
        }
        self.metrics.record_batch(
            batch.records.len() as u64,
            started.elapsed().as_secs_f64() * 1_000.0,
        );

        report.batches += 1;
        report.blocks += blocks.len();
        report.records += batch.records.len();
        report.skipped += batch.skipped;
        report.ignored += batch.ignored;
        report.last_height = batch.last_height.or(report.last_height);
        Ok(())
    }

    fn in_range(&self, start: u32, block: &Block) -> bool {
        block.height >= start && self.to_block.map_or(true, |end| block.height <= end)
    }
}

fn error_label(err: &BatchError) -> &'static str {
    match err {
        BatchError::Decode { source, .. } => match source {
            DecodeError::UnknownSpecVersion { .. } => "unknown_spec_version",
            DecodeError::InvalidEventKind { .. } => "invalid_event_kind",
            DecodeError::DecodeFailure { .. } => "decode_failure",
        },
        BatchError::Build { .. } => "build",
        BatchError::BlockOrder { .. }
        | BatchError::EventOrder { .. }
        | BatchError::HeightMismatch { .. } => "out_of_order",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::VecFeed;
    use chainassets_storage::MemorySink;

    fn block(height: u32) -> Block {
        Block {
            height,
            hash: None,
            timestamp: None,
            events: vec![],
        }
    }

    #[tokio::test]
    async fn batches_respect_size_and_range() {
        let mut feed = VecFeed::new((1..=10).map(block));
        let sink = MemorySink::new();
        let report = Ingestor::new(BatchPipeline::new(), 3)
            .with_range(2, Some(8))
            .run(&mut feed, &sink)
            .await
            .unwrap();

        assert_eq!(report.blocks, 7);
        assert_eq!(report.batches, 3);
        assert_eq!(report.last_height, Some(8));
        assert_eq!(sink.last_height().await.unwrap(), Some(8));
        // Stopped once the range end was seen.
        assert_eq!(feed.remaining(), 1);
    }

    #[tokio::test]
    async fn resumes_after_sink_height() {
        let sink = MemorySink::new();
        let ingestor = Ingestor::new(BatchPipeline::new(), 4);

        let mut feed = VecFeed::new((1..=5).map(block));
        ingestor.run(&mut feed, &sink).await.unwrap();

        let mut feed = VecFeed::new((1..=8).map(block));
        let report = ingestor.run(&mut feed, &sink).await.unwrap();
        assert_eq!(report.blocks, 3);
        assert_eq!(report.last_height, Some(8));

        let mut feed = VecFeed::new((1..=8).map(block));
        let report = ingestor
            .with_resume(false)
            .run(&mut feed, &MemorySink::new())
            .await
            .unwrap();
        assert_eq!(report.blocks, 8);
    }

    #[tokio::test]
    async fn explicit_metrics_handle_is_used() {
        let mut feed = VecFeed::new((1..=3).map(block));
        let report = Ingestor::new(BatchPipeline::new(), 2)
            .with_metrics(IngestMetrics::global())
            .run(&mut feed, &MemorySink::new())
            .await
            .unwrap();
        assert_eq!(report.batches, 2);
    }

    #[tokio::test]
    async fn feed_going_backwards_is_rejected() {
        let mut feed = VecFeed::new([block(1), block(2), block(2), block(3)]);
        let err = Ingestor::new(BatchPipeline::new(), 2)
            .with_resume(false)
            .run(&mut feed, &MemorySink::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            IngestError::Batch(BatchError::BlockOrder { previous: 2, next: 2 })
        ));
    }
}
