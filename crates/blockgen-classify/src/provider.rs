//! Classifier trait and request type

use blockgen_core::Result;
use serde::{Deserialize, Serialize};

/// One categorization call: the chat prompt plus the filenames it lists
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyRequest {
    /// Model identifier sent to the service
    pub model: String,
    /// System instruction
    pub system: String,
    /// User prompt (instructions followed by the comma-joined filenames)
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Filenames of the batch, in batch order
    pub filenames: Vec<String>,
}

/// Trait implemented by each classification provider (OpenAI, Mock).
///
/// A classifier is an opaque text-in/text-out collaborator: it returns the
/// raw response text, which is expected to hold one JSON document, possibly
/// fenced. Failures of the call itself are `ClassificationCallError`s.
pub trait Classifier: Send + Sync {
    /// Provider name (e.g. "openai", "mock")
    fn name(&self) -> &str;

    /// Send one request and return the raw response text
    fn classify(&self, request: &ClassifyRequest) -> Result<String>;
}
