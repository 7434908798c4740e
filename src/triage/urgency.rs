//! Urgency estimation — a two-tier marker cascade.

use tracing::debug;

use crate::triage::normalize::NormalizedText;
use crate::triage::types::UrgencyLevel;

const HIGH_MARKERS: &[&str] = &[
    "срочно",
    "в кратчайшие сроки",
    "немедленно",
    "в ближайшее время",
    "незамедлительно",
    "до конца дня",
];

const MEDIUM_MARKERS: &[&str] = &[
    // The bare "до " prefix also hits the preposition in unrelated sentences
    // ("до встречи", "до момента оплаты"). Remove it per deployment with
    // `without_medium_marker` if it proves too noisy.
    "до ",
    "крайний срок",
    "срок исполнения",
    "просим ответить в течение",
];

/// First-match-wins urgency cascade: High markers, then Medium markers,
/// then Low as the fallback with no marker required.
pub struct UrgencyEstimator {
    high_markers: Vec<&'static str>,
    medium_markers: Vec<&'static str>,
}

impl UrgencyEstimator {
    /// Estimator with the default marker sets.
    pub fn default_markers() -> Self {
        Self {
            high_markers: HIGH_MARKERS.to_vec(),
            medium_markers: MEDIUM_MARKERS.to_vec(),
        }
    }

    /// Drop a single medium marker without touching the rest of the cascade.
    pub fn without_medium_marker(mut self, marker: &str) -> Self {
        self.medium_markers.retain(|m| *m != marker);
        self
    }

    /// Estimate urgency for the letter. Total function: always one of the
    /// three levels, Low when nothing matches (including empty text).
    pub fn estimate(&self, text: &NormalizedText) -> UrgencyLevel {
        let lowered = text.to_lowercase();

        if let Some(hit) = self.high_markers.iter().find(|m| lowered.contains(**m)) {
            debug!(marker = %hit, "High-urgency marker matched");
            return UrgencyLevel::High;
        }

        if let Some(hit) = self.medium_markers.iter().find(|m| lowered.contains(**m)) {
            debug!(marker = %hit, "Medium-urgency marker matched");
            return UrgencyLevel::Medium;
        }

        UrgencyLevel::Low
    }
}

impl Default for UrgencyEstimator {
    fn default() -> Self {
        Self::default_markers()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::normalize::normalize;

    fn estimate(text: &str) -> UrgencyLevel {
        UrgencyEstimator::default_markers().estimate(&normalize(text))
    }

    #[test]
    fn empty_text_is_low() {
        assert_eq!(estimate(""), UrgencyLevel::Low);
    }

    #[test]
    fn no_markers_is_low() {
        assert_eq!(
            estimate("Высылаем протокол встречи для ознакомления."),
            UrgencyLevel::Low
        );
    }

    #[test]
    fn urgent_marker_is_high() {
        assert_eq!(
            estimate("Срочно требуется ваш ответ."),
            UrgencyLevel::High
        );
    }

    #[test]
    fn end_of_day_is_high() {
        assert_eq!(
            estimate("Просим подтвердить до конца дня."),
            UrgencyLevel::High
        );
    }

    #[test]
    fn deadline_marker_is_medium() {
        assert_eq!(
            estimate("Крайний срок подачи отчёта наступил."),
            UrgencyLevel::Medium
        );
    }

    #[test]
    fn high_wins_over_medium() {
        // Both tiers match; the High tier is evaluated first.
        assert_eq!(
            estimate("Немедленно ответьте, крайний срок прошёл."),
            UrgencyLevel::High
        );
    }

    #[test]
    fn bare_preposition_overmatches_to_medium() {
        // Known defect kept as observed behavior: "до " hits the plain
        // preposition too.
        assert_eq!(estimate("Ждём вас до встречи в офисе."), UrgencyLevel::Medium);
    }

    #[test]
    fn bare_preposition_can_be_removed() {
        let estimator = UrgencyEstimator::default_markers().without_medium_marker("до ");
        assert_eq!(
            estimator.estimate(&normalize("Ждём вас до встречи в офисе.")),
            UrgencyLevel::Low
        );
        // The rest of the cascade is untouched.
        assert_eq!(
            estimator.estimate(&normalize("Крайний срок — завтра.")),
            UrgencyLevel::Medium
        );
    }

    #[test]
    fn markers_are_case_insensitive() {
        assert_eq!(estimate("НЕЗАМЕДЛИТЕЛЬНО сообщите."), UrgencyLevel::High);
    }
}
