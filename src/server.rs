//! HTTP front door — request parsing, validation, and presentation.
//!
//! Thin glue over the pipeline: an empty `text` is rejected before the
//! pipeline runs, internal field names are re-rendered in camelCase for the
//! browser front end, and any unexpected fault becomes a generic 500.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tracing::info;
use uuid::Uuid;

use crate::llm::prompts::{AnswerLength, Tone};
use crate::triage::directory::CompanyProfile;
use crate::triage::pipeline::{LetterRequest, TriagePipeline};
use crate::triage::types::{Category, ExtractedFacts, PriorityResult, TriageResult, UrgencyLevel};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<TriagePipeline>,
}

/// Build the Axum router for the letter service.
pub fn letter_routes(pipeline: Arc<TriagePipeline>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/process", post(process_letter))
        // Catch-panic is outermost so an unexpected fault in any inner
        // layer or handler still becomes a generic 500.
        .layer(
            ServiceBuilder::new()
                .layer(CatchPanicLayer::new())
                .layer(CorsLayer::permissive()),
        )
        .with_state(AppState { pipeline })
}

// ── Health ──────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "letter-assist"
    }))
}

// ── Process ─────────────────────────────────────────────────────────

/// Inbound request from the browser front end.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub answer_length: Option<String>,
    #[serde(default)]
    pub sender_company: Option<String>,
}

/// Outbound triage payload, camelCase for the front end.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResponse {
    pub classification: Category,
    pub extracted_info: ExtractedFacts,
    pub response: String,
    pub urgency: UrgencyLevel,
    pub summary: String,
    pub priority: PriorityView,
}

/// camelCase rendering of [`PriorityResult`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityView {
    pub base_priority: u8,
    pub final_priority: u8,
    pub adjustments: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_profile: Option<CompanyProfileView>,
}

/// camelCase rendering of [`CompanyProfile`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfileView {
    pub base_priority: u8,
    pub segment: String,
    pub risk_level: String,
}

impl From<CompanyProfile> for CompanyProfileView {
    fn from(profile: CompanyProfile) -> Self {
        Self {
            base_priority: profile.base_priority,
            segment: profile.segment,
            risk_level: profile.risk_level,
        }
    }
}

impl From<PriorityResult> for PriorityView {
    fn from(result: PriorityResult) -> Self {
        Self {
            base_priority: result.base_priority,
            final_priority: result.final_priority,
            adjustments: result.adjustments,
            sender_company: result.sender_company,
            company_profile: result.company_profile.map(CompanyProfileView::from),
        }
    }
}

impl From<TriageResult> for ProcessResponse {
    fn from(result: TriageResult) -> Self {
        Self {
            classification: result.category,
            extracted_info: result.facts,
            response: result.reply,
            urgency: result.urgency,
            summary: result.summary,
            priority: result.priority.into(),
        }
    }
}

/// POST /process
///
/// Validates the request, runs the pipeline, renders the triage result.
async fn process_letter(
    State(state): State<AppState>,
    Json(request): Json<ProcessRequest>,
) -> impl IntoResponse {
    if request.text.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Поле 'text' обязательно"})),
        )
            .into_response();
    }

    let request_id = Uuid::new_v4();
    info!(%request_id, chars = request.text.len(), "Processing letter");

    let letter = LetterRequest {
        text: request.text,
        tone: Tone::from_request(request.tone.as_deref()),
        length: AnswerLength::from_request(request.answer_length.as_deref()),
        sender_company: request.sender_company,
    };

    let result = state.pipeline.process(&letter).await;
    Json(ProcessResponse::from(result)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_accepts_camel_case_fields() {
        let json = r#"{
            "text": "Просим предоставить документы",
            "tone": "мягкий",
            "answerLength": "full",
            "senderCompany": "ООО \"Ромашка\""
        }"#;
        let request: ProcessRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.answer_length.as_deref(), Some("full"));
        assert_eq!(request.sender_company.as_deref(), Some("ООО \"Ромашка\""));
    }

    #[test]
    fn request_fields_default_to_absent() {
        let request: ProcessRequest = serde_json::from_str(r#"{"text": "x"}"#).unwrap();
        assert!(request.tone.is_none());
        assert!(request.answer_length.is_none());
        assert!(request.sender_company.is_none());
    }

    #[test]
    fn priority_view_renders_camel_case() {
        let view = PriorityView {
            base_priority: 5,
            final_priority: 7,
            adjustments: vec!["Базовый приоритет 5: отправитель не определён".to_string()],
            sender_company: None,
            company_profile: None,
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["basePriority"], 5);
        assert_eq!(json["finalPriority"], 7);
        assert!(json.get("senderCompany").is_none());
        assert!(json.get("companyProfile").is_none());
    }
}
