use std::collections::HashSet;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::info;

use ballast_core::{Dataset, Record};
use ballast_store::DocumentStore;

use crate::errors::GenerateError;
use crate::fabric::RecordFabricator;
use crate::pace::Pacer;

/// Options for the dataset generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Number of records to produce.
    pub count: u64,
    /// Seed for the deterministic fabricator.
    pub seed: u64,
    /// Records fabricated between cooperative yields.
    pub batch_size: usize,
    /// Progress log cadence in records; 0 disables progress logs.
    pub progress_every: u64,
    /// Redraw attempts allowed per record before giving up on a unique id.
    pub max_attempts_record: u32,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            count: 1_000_000,
            seed: 0,
            batch_size: 1_000,
            progress_every: 100_000,
            max_attempts_record: 50,
        }
    }
}

/// Summary of a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub records: u64,
    pub redraws: u64,
    pub bytes_written: u64,
    pub duration_ms: u64,
}

/// Result of a generation run: the materialized dataset plus its summary.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub dataset: Dataset,
    pub report: GenerationReport,
}

/// Entry point for producing and persisting the dataset document.
#[derive(Debug, Clone)]
pub struct GeneratorEngine {
    options: GenerateOptions,
}

impl GeneratorEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    /// Fabricate `count` records, then persist them as one document write.
    ///
    /// The record vector is the only fully materialized copy; the gateway
    /// streams it to disk from there. The loop yields to `pacer` after
    /// every batch.
    pub async fn run(
        &self,
        store: &DocumentStore,
        pacer: &dyn Pacer,
    ) -> Result<GenerationResult, GenerateError> {
        let options = &self.options;
        if options.batch_size == 0 {
            return Err(GenerateError::InvalidOptions(
                "batch_size must be non-zero".to_string(),
            ));
        }
        if options.max_attempts_record == 0 {
            return Err(GenerateError::InvalidOptions(
                "max_attempts_record must be non-zero".to_string(),
            ));
        }

        let start = Instant::now();
        let fabricator = RecordFabricator::new(options.seed);
        let mut dataset = Dataset::with_capacity(options.count as usize);
        let mut seen: HashSet<String> = HashSet::with_capacity(options.count as usize);
        let mut redraws = 0_u64;

        info!(count = options.count, seed = options.seed, "generation started");

        let mut produced = 0_u64;
        while produced < options.count {
            let batch_end = (produced + options.batch_size as u64).min(options.count);
            while produced < batch_end {
                let record = self.unique_record(&fabricator, &mut seen, produced, &mut redraws)?;
                dataset.push(record);
                produced += 1;
                if options.progress_every > 0 && produced % options.progress_every == 0 {
                    info!(produced, count = options.count, "generation progress");
                }
            }
            pacer.breathe().await;
        }

        let bytes_written = store.write_all(&dataset)?;
        let report = GenerationReport {
            records: produced,
            redraws,
            bytes_written,
            duration_ms: start.elapsed().as_millis() as u64,
        };
        info!(
            records = report.records,
            redraws = report.redraws,
            bytes = report.bytes_written,
            duration_ms = report.duration_ms,
            "generation completed"
        );
        Ok(GenerationResult { dataset, report })
    }

    fn unique_record(
        &self,
        fabricator: &RecordFabricator,
        seen: &mut HashSet<String>,
        index: u64,
        redraws: &mut u64,
    ) -> Result<Record, GenerateError> {
        for attempt in 0..self.options.max_attempts_record {
            let record = fabricator.record_attempt(index, attempt);
            if seen.insert(record.id.clone()) {
                return Ok(record);
            }
            *redraws += 1;
        }
        Err(GenerateError::IdSpaceExhausted(
            self.options.max_attempts_record,
        ))
    }
}
