//! Pipeline orchestrator — sequences the triage stages and collects the
//! generated summary/reply into a [`TriageResult`].
//!
//! The triage stages are pure and synchronous; the only await points are
//! the two generation calls, and their failure degrades to placeholder
//! strings instead of failing the letter.

use std::sync::Arc;

use tracing::{info, warn};

use crate::llm::prompts::{
    AnswerLength, REPLY_INSTRUCTIONS, SUMMARY_INSTRUCTIONS, Tone, build_reply_prompt,
    build_summary_prompt,
};
use crate::llm::{GenerationRequest, ReplyGenerator};
use crate::triage::classify::Classifier;
use crate::triage::directory::CompanyDirectory;
use crate::triage::extract::FactExtractor;
use crate::triage::normalize::{NormalizedText, normalize};
use crate::triage::priority::PriorityScorer;
use crate::triage::types::{Category, ExtractedFacts, FactKey, TriageResult};
use crate::triage::urgency::UrgencyEstimator;

/// One letter to triage, with optional presentation hints and sender
/// override.
#[derive(Debug, Clone)]
pub struct LetterRequest {
    /// Raw letter text.
    pub text: String,
    /// Tone preset for the generated reply.
    pub tone: Tone,
    /// Length preset for the generated reply.
    pub length: AnswerLength,
    /// Caller-supplied sender organization. Always wins over a company
    /// parsed from the text.
    pub sender_company: Option<String>,
}

impl LetterRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::default(),
            length: AnswerLength::default(),
            sender_company: None,
        }
    }

    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn with_length(mut self, length: AnswerLength) -> Self {
        self.length = length;
        self
    }

    pub fn with_sender_company(mut self, company: impl Into<String>) -> Self {
        self.sender_company = Some(company.into());
        self
    }
}

/// The full triage pipeline. Stateless across invocations; the company
/// directory is shared, immutable configuration.
pub struct TriagePipeline {
    classifier: Classifier,
    extractor: FactExtractor,
    urgency: UrgencyEstimator,
    scorer: PriorityScorer,
    generator: Arc<dyn ReplyGenerator>,
}

impl TriagePipeline {
    /// Pipeline with default rules over the given directory and generator.
    pub fn new(directory: Arc<CompanyDirectory>, generator: Arc<dyn ReplyGenerator>) -> Self {
        Self {
            classifier: Classifier::default_rules(),
            extractor: FactExtractor::new(),
            urgency: UrgencyEstimator::default_markers(),
            scorer: PriorityScorer::new(directory),
            generator,
        }
    }

    /// Swap the fact extractor (tests pin the clock with this).
    pub fn with_extractor(mut self, extractor: FactExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Swap the urgency estimator (e.g. with a trimmed marker set).
    pub fn with_urgency_estimator(mut self, urgency: UrgencyEstimator) -> Self {
        self.urgency = urgency;
        self
    }

    /// Triage one letter.
    ///
    /// normalize → classify → extract → sender override → urgency →
    /// priority → generate summary + reply. No stage is skipped; the
    /// generation calls run concurrently and degrade independently.
    pub async fn process(&self, request: &LetterRequest) -> TriageResult {
        let normalized = normalize(&request.text);

        let category = self.classifier.classify(&normalized);
        let mut facts = self.extractor.extract(&normalized);

        // Caller override beats a text-parsed sender.
        if let Some(company) = request
            .sender_company
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
        {
            facts.insert(FactKey::SenderCompany, company);
        }

        let urgency = self.urgency.estimate(&normalized);

        let sender_company = facts.get(FactKey::SenderCompany).map(String::from);
        let priority = self
            .scorer
            .score(category, urgency, &facts, sender_company.as_deref());

        let summary_call = self.summarize(normalized.as_str());
        let reply_call = self.draft_reply(&normalized, category, &facts, request);
        let (summary, reply) = tokio::join!(summary_call, reply_call);

        info!(
            category = %category,
            urgency = %urgency,
            priority = priority.final_priority,
            facts = facts.len(),
            "Letter triaged"
        );

        TriageResult {
            category,
            facts,
            urgency,
            priority,
            summary,
            reply,
        }
    }

    /// Request a short summary; empty letters get an empty summary without
    /// a generation round-trip.
    async fn summarize(&self, cleaned: &str) -> String {
        if cleaned.is_empty() {
            return String::new();
        }
        let request =
            GenerationRequest::new(SUMMARY_INSTRUCTIONS, build_summary_prompt(cleaned));
        match self.generator.generate(request).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!(error = %e, "Summary generation failed, substituting placeholder");
                format!("Не удалось сформировать краткое резюме письма ({e}).")
            }
        }
    }

    /// Request a draft reply in the requested tone/length.
    async fn draft_reply(
        &self,
        cleaned: &NormalizedText,
        category: Category,
        facts: &ExtractedFacts,
        request: &LetterRequest,
    ) -> String {
        let prompt = build_reply_prompt(
            cleaned.as_str(),
            category,
            facts,
            request.tone,
            request.length,
        );
        match self
            .generator
            .generate(GenerationRequest::new(REPLY_INSTRUCTIONS, prompt))
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "Reply generation failed, substituting placeholder");
                format!("Не удалось сгенерировать ответ: {e}")
            }
        }
    }
}
