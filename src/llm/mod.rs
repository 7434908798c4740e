//! Generation collaborator — summary and reply drafting.
//!
//! The triage core only prepares prompt payloads; the actual generation is
//! a single bounded round-trip per call to an OpenAI-compatible endpoint.
//! Failures never abort a triage — the pipeline substitutes placeholder
//! strings.

pub mod prompts;

use std::sync::Arc;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::config::GenerationConfig;
use crate::error::GenerationError;

/// One generation call: system instructions plus the user payload.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub instructions: String,
    pub input: String,
}

impl GenerationRequest {
    pub fn new(instructions: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            instructions: instructions.into(),
            input: input.into(),
        }
    }
}

/// Provider seam for the generation collaborator.
///
/// The pipeline depends on this trait, never on a concrete client, so tests
/// inject stubs and failures.
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    /// Model identifier, for logging.
    fn model_name(&self) -> &str;

    /// Run one generation round-trip and return the produced text.
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError>;
}

/// Create a generator from configuration.
pub fn create_generator(
    config: &GenerationConfig,
) -> Result<Arc<dyn ReplyGenerator>, GenerationError> {
    let client = OpenAiCompatClient::new(config.clone())?;
    tracing::info!(model = %config.model, base_url = %config.base_url, "Using generation endpoint");
    Ok(Arc::new(client))
}

// ── OpenAI-compatible client ────────────────────────────────────────

/// Temperature for generation calls (replies should stay close to the
/// prompt's structure).
const GENERATION_TEMPERATURE: f32 = 0.3;

/// How many characters of an error body to keep in error messages.
const ERROR_BODY_LIMIT: usize = 512;

/// Client for an OpenAI-compatible `POST {base_url}/chat/completions`
/// endpoint (the reference deployment is Yandex AI Studio's compatibility
/// surface).
pub struct OpenAiCompatClient {
    http: reqwest::Client,
    config: GenerationConfig,
}

impl OpenAiCompatClient {
    pub fn new(config: GenerationConfig) -> Result<Self, GenerationError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GenerationError::RequestFailed {
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { http, config })
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl ChatCompletionResponse {
    fn into_text(self) -> Result<String, GenerationError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| GenerationError::InvalidResponse {
                reason: "no text content in first choice".to_string(),
            })
    }
}

#[async_trait]
impl ReplyGenerator for OpenAiCompatClient {
    fn model_name(&self) -> &str {
        &self.config.model
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.instructions,
                },
                ChatMessage {
                    role: "user",
                    content: &request.input,
                },
            ],
            temperature: GENERATION_TEMPERATURE,
        };

        let url = format!("{}/chat/completions", self.config.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout {
                        timeout: self.config.timeout,
                    }
                } else {
                    GenerationError::RequestFailed {
                        reason: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        let parsed: ChatCompletionResponse =
            response
                .json()
                .await
                .map_err(|e| GenerationError::InvalidResponse {
                    reason: e.to_string(),
                })?;
        parsed.into_text()
    }
}
