//! Error types for pushbox

use thiserror::Error;

/// Result type for pushbox operations
pub type Result<T> = std::result::Result<T, PushboxError>;

/// Pushbox error types
#[derive(Debug, Error)]
pub enum PushboxError {
    /// Level key not present in the catalog
    #[error("Invalid level: {0}")]
    InvalidLevel(String),

    /// Evaluator configuration rejected
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for PushboxError {
    fn from(err: serde_json::Error) -> Self {
        PushboxError::Serialization(err.to_string())
    }
}
