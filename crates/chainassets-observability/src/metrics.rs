//! ChainAssets ingestion metrics.
//!
//! All metrics use OpenTelemetry conventions. Without an installed meter
//! provider they resolve to no-op instruments.

use opentelemetry::{
    metrics::{Counter, Histogram, Meter},
    KeyValue,
};

/// Central metrics handle for the ingestion runner.
#[derive(Clone)]
pub struct IngestMetrics {
    pub records_built: Counter<u64>,
    pub events_skipped: Counter<u64>,
    pub decode_errors: Counter<u64>,
    pub batch_size: Histogram<u64>,
    pub batch_latency_ms: Histogram<f64>,
}

impl IngestMetrics {
    pub fn new(meter: &Meter) -> Self {
        Self {
            records_built: meter
                .u64_counter("chainassets.records_built")
                .with_description("Canonical transfer records handed to the sink")
                .init(),
            events_skipped: meter
                .u64_counter("chainassets.events_skipped")
                .with_description("Matching events skipped under an explicit skip policy")
                .init(),
            decode_errors: meter
                .u64_counter("chainassets.decode_errors")
                .with_description("Batches aborted by an error, tagged with error_type")
                .init(),
            batch_size: meter
                .u64_histogram("chainassets.batch_size")
                .with_description("Number of records in a persisted batch")
                .init(),
            batch_latency_ms: meter
                .f64_histogram("chainassets.batch_latency_ms")
                .with_description("Time to process one batch in milliseconds")
                .init(),
        }
    }

    /// Metrics bound to the global meter provider.
    pub fn global() -> Self {
        Self::new(&opentelemetry::global::meter("chainassets"))
    }

    pub fn record_built(&self, status: &str, count: u64) {
        self.records_built
            .add(count, &[KeyValue::new("status", status.to_string())]);
    }

    pub fn record_skipped(&self, reason: &str, count: u64) {
        self.events_skipped
            .add(count, &[KeyValue::new("reason", reason.to_string())]);
    }

    pub fn record_error(&self, error_type: &str) {
        self.decode_errors
            .add(1, &[KeyValue::new("error_type", error_type.to_string())]);
    }

    pub fn record_batch(&self, records: u64, latency_ms: f64) {
        self.batch_size.record(records, &[]);
        self.batch_latency_ms.record(latency_ms, &[]);
    }
}
