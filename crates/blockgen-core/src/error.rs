//! Error types for blockgen

use thiserror::Error;

/// The main error type for blockgen operations
#[derive(Debug, Error)]
pub enum BlockgenError {
    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Classification call failed: {0}")]
    ClassificationCallError(String),

    #[error("Classification response is not valid JSON: {0}")]
    ClassificationParseError(String),

    #[error("Missing key: {0}")]
    MissingKey(String),

    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(String),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),
}

/// Result type alias for blockgen operations
pub type Result<T> = std::result::Result<T, BlockgenError>;

impl From<csv::Error> for BlockgenError {
    fn from(err: csv::Error) -> Self {
        BlockgenError::CsvError(err.to_string())
    }
}
