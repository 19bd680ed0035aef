//! blockgen classify - LLM-assisted block texture classification
//!
//! Sends batches of texture filenames to a pluggable classifier (OpenAI,
//! Mock), normalizes whatever JSON shape comes back, and merges the batch
//! results into one `BlockMapping` in submission order.

pub mod batch;
pub mod config;
pub mod merge;
pub mod prompt;
pub mod provider;
pub mod providers;
pub mod response;

pub use batch::{classify_assets, classify_batch, partition, run_batches, Batch, BatchOutcome};
pub use config::{BlockgenConfig, ClassificationConfig, Dispatch, DispatchMode};
pub use merge::{merge_outcomes, ClassifyRun};
pub use provider::{ClassifyRequest, Classifier};
pub use response::{parse_response, ParsedBatch, ResponseShape};
