//! Shared types for the letter-triage pipeline.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::triage::directory::CompanyProfile;

// ── Category ────────────────────────────────────────────────────────

/// Category assigned to an inbound letter.
///
/// Closed set; exactly one per letter. Serialized as the Russian label the
/// front end displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    /// Central-bank / regulator correspondence.
    #[serde(rename = "Регуляторный запрос")]
    Regulatory,
    /// Complaint or formal claim.
    #[serde(rename = "Жалоба")]
    Complaint,
    /// Partnership or commercial proposal.
    #[serde(rename = "Партнёрское предложение")]
    Partnership,
    /// Document sent for sign-off.
    #[serde(rename = "Запрос на согласование")]
    Approval,
    /// Request to provide information or documents.
    #[serde(rename = "Запрос информации")]
    InfoRequest,
    /// Notification / FYI letter.
    #[serde(rename = "Уведомление")]
    Notification,
    /// Fallback when no rule matched (including empty text).
    #[serde(rename = "Прочая корреспонденция")]
    Other,
}

impl Category {
    /// Display label (Russian, as shown to the operator).
    pub fn label(&self) -> &'static str {
        match self {
            Self::Regulatory => "Регуляторный запрос",
            Self::Complaint => "Жалоба",
            Self::Partnership => "Партнёрское предложение",
            Self::Approval => "Запрос на согласование",
            Self::InfoRequest => "Запрос информации",
            Self::Notification => "Уведомление",
            Self::Other => "Прочая корреспонденция",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ── Urgency ─────────────────────────────────────────────────────────

/// Urgency level derived from the marker cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UrgencyLevel {
    #[serde(rename = "Высокая срочность")]
    High,
    #[serde(rename = "Средняя срочность")]
    Medium,
    #[serde(rename = "Низкая срочность")]
    Low,
}

impl UrgencyLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "Высокая срочность",
            Self::Medium => "Средняя срочность",
            Self::Low => "Низкая срочность",
        }
    }
}

impl std::fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ── Extracted facts ─────────────────────────────────────────────────

/// Key of a fact the extractor can pull out of a letter.
///
/// Ordering is declaration order so fact maps iterate and serialize stably:
/// deadlines first, then document number, amount, sender.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FactKey {
    DeadlineDate,
    DeadlineRelative,
    DeadlineDateEstimated,
    DocumentNumber,
    Amount,
    SenderCompany,
}

impl FactKey {
    /// Wire/display key (matches the JSON the front end consumes).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DeadlineDate => "deadline_date",
            Self::DeadlineRelative => "deadline_relative",
            Self::DeadlineDateEstimated => "deadline_date_estimated",
            Self::DocumentNumber => "document_number",
            Self::Amount => "amount",
            Self::SenderCompany => "sender_company",
        }
    }
}

/// Sparse map of facts extracted from a letter.
///
/// A key is present only when its pattern matched; a non-match is key
/// absence, never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedFacts(BTreeMap<FactKey, String>);

impl ExtractedFacts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: FactKey, value: impl Into<String>) {
        self.0.insert(key, value.into());
    }

    pub fn get(&self, key: FactKey) -> Option<&str> {
        self.0.get(&key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate facts in stable key order.
    pub fn iter(&self) -> impl Iterator<Item = (FactKey, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

// ── Priority ────────────────────────────────────────────────────────

/// Result of priority scoring, with the audit trail of every adjustment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorityResult {
    /// Starting priority before adjustments.
    pub base_priority: u8,
    /// Final priority, clamped to 0..=9.
    pub final_priority: u8,
    /// Human-readable log of each scoring step, in application order:
    /// base → category → urgency → amount.
    pub adjustments: Vec<String>,
    /// Sender company the score was computed against (override or parsed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_company: Option<String>,
    /// Directory profile for the sender, if the company resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_profile: Option<CompanyProfile>,
}

// ── Triage result ───────────────────────────────────────────────────

/// Aggregate result of triaging one letter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageResult {
    /// Assigned category.
    pub category: Category,
    /// Facts pulled out of the text (may be empty).
    pub facts: ExtractedFacts,
    /// Estimated urgency.
    pub urgency: UrgencyLevel,
    /// Priority score with audit trail.
    pub priority: PriorityResult,
    /// Short summary from the generation collaborator (or placeholder).
    pub summary: String,
    /// Draft reply from the generation collaborator (or placeholder).
    pub reply: String,
}
