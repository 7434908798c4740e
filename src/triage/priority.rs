//! Priority scoring with an audit trail.
//!
//! Deterministic additive model over the directory profile, category,
//! urgency, and extracted amount. Every applied step is appended to the
//! adjustment trail in a fixed order (base → category → urgency → amount);
//! consumers rely on that ordering for display and debugging.

use std::sync::Arc;

use crate::triage::directory::CompanyDirectory;
use crate::triage::types::{Category, ExtractedFacts, FactKey, PriorityResult, UrgencyLevel};

/// Base priority for letters from companies missing in the directory.
pub const DEFAULT_BASE_PRIORITY: u8 = 5;

/// Priority the Regulatory category floors the score to.
const REGULATORY_FLOOR: i32 = 8;

/// Amount tiers, in rubles.
const AMOUNT_MAJOR: i64 = 10_000_000;
const AMOUNT_NOTABLE: i64 = 1_000_000;

/// Scores one letter against the injected company directory.
pub struct PriorityScorer {
    directory: Arc<CompanyDirectory>,
}

impl PriorityScorer {
    pub fn new(directory: Arc<CompanyDirectory>) -> Self {
        Self { directory }
    }

    /// Compute the priority for a triaged letter.
    ///
    /// `sender_company` is the resolved sender — the caller override when
    /// one was supplied, otherwise the company parsed from the text.
    pub fn score(
        &self,
        category: Category,
        urgency: UrgencyLevel,
        facts: &ExtractedFacts,
        sender_company: Option<&str>,
    ) -> PriorityResult {
        let mut adjustments = Vec::new();

        // 1. Base: directory profile or the default.
        let profile = sender_company.and_then(|c| self.directory.lookup(c)).cloned();
        let base_priority = match sender_company {
            Some(company) => match &profile {
                Some(p) => {
                    adjustments.push(format!(
                        "Базовый приоритет {}: компания {} (сегмент {})",
                        p.base_priority, company, p.segment
                    ));
                    p.base_priority
                }
                None => {
                    adjustments.push(format!(
                        "Базовый приоритет {DEFAULT_BASE_PRIORITY}: компания {company} не найдена в справочнике"
                    ));
                    DEFAULT_BASE_PRIORITY
                }
            },
            None => {
                adjustments.push(format!(
                    "Базовый приоритет {DEFAULT_BASE_PRIORITY}: отправитель не определён"
                ));
                DEFAULT_BASE_PRIORITY
            }
        };

        let mut priority = i32::from(base_priority);

        // 2. Category.
        match category {
            Category::Complaint => {
                priority += 2;
                adjustments.push("+2: категория «Жалоба»".to_string());
            }
            Category::Regulatory => {
                // A floor, not an increment: max(priority, 8).
                if priority < REGULATORY_FLOOR {
                    priority = REGULATORY_FLOOR;
                    adjustments.push(format!(
                        "Приоритет повышен до {REGULATORY_FLOOR}: категория «Регуляторный запрос»"
                    ));
                }
            }
            Category::Partnership => {
                priority += 1;
                adjustments.push("+1: категория «Партнёрское предложение»".to_string());
            }
            _ => {}
        }

        // 3. Urgency.
        match urgency {
            UrgencyLevel::High => {
                priority += 2;
                adjustments.push("+2: высокая срочность".to_string());
            }
            UrgencyLevel::Medium => {
                priority += 1;
                adjustments.push("+1: средняя срочность".to_string());
            }
            UrgencyLevel::Low => {}
        }

        // 4. Amount. An unparsable amount is skipped silently.
        if let Some(amount) = facts.get(FactKey::Amount).and_then(|a| a.parse::<i64>().ok()) {
            if amount >= AMOUNT_MAJOR {
                priority += 2;
                adjustments.push(format!("+2: сумма не менее {AMOUNT_MAJOR} руб."));
            } else if amount >= AMOUNT_NOTABLE {
                priority += 1;
                adjustments.push(format!("+1: сумма не менее {AMOUNT_NOTABLE} руб."));
            }
        }

        // 5. Clamp to the 0..=9 scale.
        let final_priority = priority.clamp(0, 9) as u8;

        PriorityResult {
            base_priority,
            final_priority,
            adjustments,
            sender_company: sender_company.map(String::from),
            company_profile: profile,
        }
    }
}
