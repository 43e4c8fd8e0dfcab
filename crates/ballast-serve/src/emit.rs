use std::time::Instant;

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use ballast_gen::fabric::RecordFabricator;
use ballast_gen::pace::Pacer;
use ballast_store::DocumentStore;

use crate::errors::EmitError;

/// Options for the bulk emitter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmitOptions {
    /// Records per synthetic batch, which is also the yield cadence.
    pub batch_size: usize,
    /// Record count for the synthetic fallback stream. Fixed by
    /// configuration, never by the caller of a single emit.
    pub synthetic_count: u64,
    /// Seed for the fallback fabricator.
    pub seed: u64,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            batch_size: 1_000,
            synthetic_count: 1_000_000,
            seed: 0,
        }
    }
}

/// Where an emitted payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmitSource {
    /// The stored document was read whole and re-serialized.
    Stored,
    /// Storage was not readable; records were synthesized on the fly.
    Synthetic,
}

/// Summary of one emit call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmitReport {
    pub source: EmitSource,
    pub records: u64,
    pub batches: u64,
    pub bytes: u64,
    pub duration_ms: u64,
}

/// Streams the full dataset to a sink as one JSON array.
#[derive(Debug, Clone)]
pub struct BulkEmitter {
    options: EmitOptions,
}

impl BulkEmitter {
    pub fn new(options: EmitOptions) -> Self {
        Self { options }
    }

    /// Emit the dataset as a single JSON array.
    ///
    /// Prefers the stored document, which is parsed whole and re-encoded as
    /// one payload before the first byte reaches the sink. Any storage read
    /// failure downgrades to the batched synthetic stream instead of
    /// surfacing; only sink and encoding failures abort the emit.
    pub async fn emit<W>(
        &self,
        store: &DocumentStore,
        sink: &mut W,
        pacer: &dyn Pacer,
    ) -> Result<EmitReport, EmitError>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let start = Instant::now();
        match store.read_all() {
            Ok(dataset) => {
                let payload = serde_json::to_vec(&dataset)?;
                sink.write_all(&payload).await?;
                sink.flush().await?;

                let report = EmitReport {
                    source: EmitSource::Stored,
                    records: dataset.len() as u64,
                    batches: 1,
                    bytes: payload.len() as u64,
                    duration_ms: start.elapsed().as_millis() as u64,
                };
                info!(
                    records = report.records,
                    bytes = report.bytes,
                    duration_ms = report.duration_ms,
                    "stored document emitted"
                );
                Ok(report)
            }
            Err(err) => {
                debug!(reason = %err, "stored document unreadable, falling back to synthetic stream");
                self.emit_synthetic(sink, pacer, start).await
            }
        }
    }

    /// Batched fallback: fabricate records in memory-bounded fragments and
    /// flush each fragment as soon as it is encoded. The concatenation of
    /// fragments is a valid JSON array for zero, one, or many records.
    async fn emit_synthetic<W>(
        &self,
        sink: &mut W,
        pacer: &dyn Pacer,
        start: Instant,
    ) -> Result<EmitReport, EmitError>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let options = &self.options;
        let fabricator = RecordFabricator::new(options.seed);
        let batch_size = options.batch_size.max(1) as u64;

        let mut bytes = 0_u64;
        let mut batches = 0_u64;
        let mut emitted = 0_u64;

        sink.write_all(b"[").await?;
        bytes += 1;

        while emitted < options.synthetic_count {
            let batch_end = (emitted + batch_size).min(options.synthetic_count);
            let mut fragment = String::new();
            while emitted < batch_end {
                if emitted > 0 {
                    fragment.push(',');
                }
                let record = fabricator.record_at(emitted);
                fragment.push_str(&serde_json::to_string(&record)?);
                emitted += 1;
            }

            sink.write_all(fragment.as_bytes()).await?;
            bytes += fragment.len() as u64;
            batches += 1;
            pacer.breathe().await;
        }

        sink.write_all(b"]").await?;
        sink.flush().await?;
        bytes += 1;

        let report = EmitReport {
            source: EmitSource::Synthetic,
            records: emitted,
            batches,
            bytes,
            duration_ms: start.elapsed().as_millis() as u64,
        };
        info!(
            records = report.records,
            batches = report.batches,
            bytes = report.bytes,
            duration_ms = report.duration_ms,
            "synthetic stream emitted"
        );
        Ok(report)
    }
}
