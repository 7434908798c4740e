//! Configuration types.

use std::time::Duration;

use secrecy::SecretString;

/// Configuration for the text-generation collaborator.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Base URL of the OpenAI-compatible endpoint (no trailing slash).
    pub base_url: String,
    /// API key sent as a bearer token.
    pub api_key: SecretString,
    /// Model identifier understood by the endpoint.
    pub model: String,
    /// Bound on a single generation round-trip. One summary call and one
    /// reply call are made per letter; neither is retried.
    pub timeout: Duration,
}

/// HTTP front-door configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address, e.g. "0.0.0.0:5001".
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5001".to_string(),
        }
    }
}
