//! Provider registry
//!
//! Maps provider names to concrete classifiers.

pub mod mock;
pub mod openai;

use crate::config::BlockgenConfig;
use crate::provider::Classifier;
use blockgen_core::{BlockgenError, Result};

/// Create a classifier by name with configuration.
///
/// Fails with `MissingCredential` when a networked provider has no API key,
/// so callers can abort before any processing begins.
pub fn create_classifier(name: &str, config: &BlockgenConfig) -> Result<Box<dyn Classifier>> {
    if !config.is_enabled(name) {
        return Err(BlockgenError::ConfigError(format!(
            "Provider '{}' is disabled in config",
            name
        )));
    }

    match name {
        "mock" => Ok(Box::new(mock::MockClassifier::new())),
        "openai" => Ok(Box::new(openai::OpenAiClassifier::from_config(config)?)),
        _ => Err(BlockgenError::ConfigError(format!(
            "Unknown provider '{}'. Available: {}",
            name,
            available_providers().join(", ")
        ))),
    }
}

/// List all available provider names
pub fn available_providers() -> Vec<&'static str> {
    vec!["mock", "openai"]
}
