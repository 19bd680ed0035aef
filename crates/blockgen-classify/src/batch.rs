//! Batch classification
//!
//! Splits the asset listing into fixed-size batches, sends each batch to a
//! classifier (serially or on a worker pool) and records one outcome per
//! batch. Failed batches are logged and dropped, never retried.

use crate::config::{ClassificationConfig, Dispatch};
use crate::merge::{merge_outcomes, ClassifyRun};
use crate::prompt::build_request;
use crate::provider::Classifier;
use crate::response::{parse_response, ParsedBatch};
use blockgen_core::{BlockgenError, Result};
use blockgen_scan::AssetRecord;
use rand::Rng;
use rayon::prelude::*;
use std::time::Duration;

/// A contiguous slice of the asset listing sent as one request
#[derive(Debug, Clone, Copy)]
pub struct Batch<'a> {
    /// 1-based submission index
    pub index: usize,
    pub total: usize,
    pub assets: &'a [AssetRecord],
}

/// What happened to one batch
#[derive(Debug)]
pub struct BatchOutcome {
    pub index: usize,
    pub result: Result<ParsedBatch>,
}

/// Split `assets` into ceil(N / batch_size) batches, preserving order
pub fn partition(assets: &[AssetRecord], batch_size: usize) -> Result<Vec<Batch<'_>>> {
    if batch_size == 0 {
        return Err(BlockgenError::ConfigError(
            "batch size must be greater than zero".to_string(),
        ));
    }

    let total = assets.len().div_ceil(batch_size);
    Ok(assets
        .chunks(batch_size)
        .enumerate()
        .map(|(i, chunk)| Batch {
            index: i + 1,
            total,
            assets: chunk,
        })
        .collect())
}

/// Classify one batch: build the request, call the classifier, parse the reply
pub fn classify_batch(
    classifier: &dyn Classifier,
    batch: &Batch<'_>,
    settings: &ClassificationConfig,
) -> Result<ParsedBatch> {
    log::info!(
        "Processing batch {}/{} ({} files)...",
        batch.index,
        batch.total,
        batch.assets.len()
    );

    let request = build_request(batch.assets, settings);
    log::debug!("Batch {} prompt:{}", batch.index, request.prompt);

    let raw = classifier.classify(&request)?;
    let parsed = parse_response(&raw).map_err(|e| {
        let preview: String = raw.chars().take(200).collect();
        log::debug!("Batch {} response was: {}...", batch.index, preview);
        e
    })?;

    if parsed.skipped > 0 {
        log::warn!(
            "Batch {}/{}: skipped {} malformed entries",
            batch.index,
            batch.total,
            parsed.skipped
        );
    }
    Ok(parsed)
}

fn run_one(
    classifier: &dyn Classifier,
    batch: &Batch<'_>,
    settings: &ClassificationConfig,
) -> BatchOutcome {
    let result = classify_batch(classifier, batch, settings);
    match &result {
        Ok(parsed) => log::info!(
            "Batch {}/{} completed ({} blocks)",
            batch.index,
            batch.total,
            parsed.mapping.len()
        ),
        Err(e) => log::warn!("Batch {}/{} failed: {}", batch.index, batch.total, e),
    }
    BatchOutcome {
        index: batch.index,
        result,
    }
}

/// Send every batch according to `dispatch`.
///
/// Outcomes are returned in submission order regardless of completion order.
pub fn run_batches(
    classifier: &dyn Classifier,
    batches: &[Batch<'_>],
    dispatch: Dispatch,
    settings: &ClassificationConfig,
) -> Result<Vec<BatchOutcome>> {
    match dispatch {
        Dispatch::Serial { delay } => {
            let mut outcomes = Vec::with_capacity(batches.len());
            for (i, batch) in batches.iter().enumerate() {
                outcomes.push(run_one(classifier, batch, settings));

                if i + 1 < batches.len() && !delay.is_zero() {
                    log::info!(
                        "Waiting {}s for rate limit (batch {}/{} done)",
                        delay.as_secs_f64(),
                        batch.index,
                        batch.total
                    );
                    std::thread::sleep(delay);
                }
            }
            Ok(outcomes)
        }
        Dispatch::Parallel {
            workers,
            max_jitter,
        } => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(|i| format!("classify-{}", i))
                .build()
                .map_err(|e| {
                    BlockgenError::ConfigError(format!("Failed to start worker pool: {}", e))
                })?;

            log::info!(
                "Processing {} batches on {} workers",
                batches.len(),
                workers
            );

            // Indexed collect keeps submission order
            let outcomes: Vec<BatchOutcome> = pool.install(|| {
                batches
                    .par_iter()
                    .map(|batch| {
                        jitter(max_jitter);
                        run_one(classifier, batch, settings)
                    })
                    .collect()
            });
            Ok(outcomes)
        }
    }
}

fn jitter(max: Duration) {
    let max_ms = max.as_millis() as u64;
    if max_ms == 0 {
        return;
    }
    let delay = rand::thread_rng().gen_range(0..=max_ms);
    std::thread::sleep(Duration::from_millis(delay));
}

/// Partition, classify and merge a full asset listing
pub fn classify_assets(
    classifier: &dyn Classifier,
    assets: &[AssetRecord],
    settings: &ClassificationConfig,
) -> Result<ClassifyRun> {
    let batches = partition(assets, settings.batch_size)?;
    log::info!(
        "Classifying {} assets in {} batches of up to {} via {}",
        assets.len(),
        batches.len(),
        settings.batch_size,
        classifier.name()
    );

    let outcomes = run_batches(classifier, &batches, settings.dispatch(), settings)?;
    Ok(merge_outcomes(outcomes))
}
