//! Error types for Routr
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in Routr
#[derive(Debug, Error)]
pub enum RoutrError {
    /// Pattern catalog could not be built
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// LLM API error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Remote tool invocation error
    #[error("Dispatch error: {0}")]
    Dispatch(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Routr operations
pub type Result<T> = std::result::Result<T, RoutrError>;
