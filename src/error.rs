//! Error types for Letter Assist.

use std::time::Duration;

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors from the text-generation collaborator.
///
/// None of these abort a triage: the pipeline catches them and substitutes
/// placeholder summary/reply strings.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Generation request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("Generation timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("Invalid response from generation endpoint: {reason}")]
    InvalidResponse { reason: String },

    #[error("Generation endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
