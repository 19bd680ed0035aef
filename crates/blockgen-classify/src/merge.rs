//! Ordered merge of batch results

use crate::batch::BatchOutcome;
use blockgen_core::BlockMapping;

/// Merged result of a classification run
#[derive(Debug, Default)]
pub struct ClassifyRun {
    pub mapping: BlockMapping,
    pub successful_batches: usize,
    pub failed_batches: usize,
    /// Malformed entries dropped from otherwise successful batches
    pub skipped_records: usize,
}

/// Fold batch outcomes into one mapping.
///
/// Outcomes are applied in batch index order, whatever order they arrive
/// in, so a later batch always overwrites an earlier one on key collision.
pub fn merge_outcomes(mut outcomes: Vec<BatchOutcome>) -> ClassifyRun {
    outcomes.sort_by_key(|o| o.index);

    let mut run = ClassifyRun::default();
    for outcome in outcomes {
        match outcome.result {
            Ok(parsed) => {
                run.skipped_records += parsed.skipped;
                run.mapping.merge(parsed.mapping);
                run.successful_batches += 1;
            }
            Err(_) => run.failed_batches += 1,
        }
    }
    run
}
