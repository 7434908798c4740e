//! Fact extraction — dates, deadlines, document numbers, amounts, sender.
//!
//! Every pattern is independent and populates at most one fact key; a
//! non-match is key absence, never an error. The relative-deadline pattern
//! needs "today", which comes from an injectable [`Clock`] so the extractor
//! stays deterministic under test.

use chrono::{Duration, Local, NaiveDate};
use regex::Regex;

use crate::triage::normalize::NormalizedText;
use crate::triage::types::{ExtractedFacts, FactKey};

// ── Clock ───────────────────────────────────────────────────────────

/// Source of "today" for relative-deadline estimation.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall-clock time source used outside tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Fixed time source for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

// ── Extractor ───────────────────────────────────────────────────────

/// Pattern-based fact extractor. Regexes are compiled once at construction.
pub struct FactExtractor {
    clock: Box<dyn Clock>,
    date: Regex,
    relative_days: Regex,
    document_number: Regex,
    amount: Regex,
    sender_company: Regex,
}

impl FactExtractor {
    /// Extractor on the system clock.
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    /// Extractor with an injected clock (tests pin "today" with this).
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            clock,
            // D.M.YYYY with 1-2 digit day/month, e.g. "12.03.2025".
            date: Regex::new(r"\b(\d{1,2}\.\d{1,2}\.\d{4})\b").unwrap(),
            relative_days: Regex::new(r"(?i)в течение\s+(\d+)\s+дн").unwrap(),
            // "№ 123-ФЗ", "№45/2" — ASCII "No." accepted as the marker too.
            document_number: Regex::new(r"(?:№|No\.)\s*([\w/\-]+)").unwrap(),
            // Digit run (embedded spaces allowed) followed by a ruble marker.
            amount: Regex::new(r"(?i)(\d[\d\s]{2,})\s*(?:руб\.?|₽)").unwrap(),
            // Legal form + «»/"/'-quoted name. Longer forms listed first so
            // "ПАО" is not consumed as a bare "АО".
            sender_company: Regex::new(
                r#"\b(ООО|ЗАО|ОАО|ПАО|АО|ИП)\s*[«"']([^»"']+)[»"']"#,
            )
            .unwrap(),
        }
    }

    /// Run all patterns over the normalized text.
    pub fn extract(&self, text: &NormalizedText) -> ExtractedFacts {
        let mut facts = ExtractedFacts::new();
        let raw = text.as_str();

        if let Some(caps) = self.date.captures(raw) {
            facts.insert(FactKey::DeadlineDate, &caps[1]);
        }

        if let Some(caps) = self.relative_days.captures(raw) {
            // Degenerate day counts (non-parsable or out of calendar range)
            // drop the whole fact rather than producing a half-filled pair.
            if let Some((days, estimated)) = caps[1].parse::<i64>().ok().and_then(|days| {
                let estimated = Duration::try_days(days)
                    .and_then(|d| self.clock.today().checked_add_signed(d))?;
                Some((days, estimated))
            }) {
                facts.insert(FactKey::DeadlineRelative, format!("{days} дней"));
                facts.insert(
                    FactKey::DeadlineDateEstimated,
                    estimated.format("%d.%m.%Y").to_string(),
                );
            }
        }

        if let Some(caps) = self.document_number.captures(raw) {
            facts.insert(FactKey::DocumentNumber, &caps[1]);
        }

        if let Some(caps) = self.amount.captures(raw) {
            facts.insert(FactKey::Amount, caps[1].trim().replace(' ', ""));
        }

        if let Some(caps) = self.sender_company.captures(raw) {
            facts.insert(
                FactKey::SenderCompany,
                format!("{} \"{}\"", &caps[1], caps[2].trim()),
            );
        }

        facts
    }
}

impl Default for FactExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::normalize::normalize;

    fn extractor() -> FactExtractor {
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        FactExtractor::with_clock(Box::new(FixedClock(today)))
    }

    fn extract(text: &str) -> ExtractedFacts {
        extractor().extract(&normalize(text))
    }

    #[test]
    fn extracts_absolute_date() {
        let facts = extract("Просим ответить до 12.03.2025 включительно.");
        assert_eq!(facts.get(FactKey::DeadlineDate), Some("12.03.2025"));
    }

    #[test]
    fn extracts_first_date_only() {
        let facts = extract("Срок 1.2.2025, повторный срок 03.04.2025.");
        assert_eq!(facts.get(FactKey::DeadlineDate), Some("1.2.2025"));
    }

    #[test]
    fn extracts_relative_deadline_with_estimate() {
        let facts = extract("Просим предоставить документы в течение 10 дней.");
        assert_eq!(facts.get(FactKey::DeadlineRelative), Some("10 дней"));
        // 01.03.2025 + 10 days
        assert_eq!(
            facts.get(FactKey::DeadlineDateEstimated),
            Some("11.03.2025")
        );
    }

    #[test]
    fn relative_deadline_is_case_insensitive() {
        let facts = extract("В ТЕЧЕНИЕ 5 ДНЕЙ");
        assert_eq!(facts.get(FactKey::DeadlineRelative), Some("5 дней"));
    }

    #[test]
    fn absurd_day_count_is_skipped() {
        let facts = extract("в течение 99999999999999999999 дней");
        assert!(facts.get(FactKey::DeadlineRelative).is_none());
        assert!(facts.get(FactKey::DeadlineDateEstimated).is_none());
    }

    #[test]
    fn extracts_document_number() {
        let facts = extract("Согласно договору № 214-Д/7 направляем акт.");
        assert_eq!(facts.get(FactKey::DocumentNumber), Some("214-Д/7"));
    }

    #[test]
    fn extracts_document_number_ascii_marker() {
        let facts = extract("Contract No. 42-A attached.");
        assert_eq!(facts.get(FactKey::DocumentNumber), Some("42-A"));
    }

    #[test]
    fn extracts_amount_and_strips_spaces() {
        let facts = extract("Задолженность составляет 1 000 000 руб.");
        assert_eq!(facts.get(FactKey::Amount), Some("1000000"));
    }

    #[test]
    fn extracts_amount_with_ruble_sign() {
        let facts = extract("Сумма: 250 000 ₽ за квартал.");
        assert_eq!(facts.get(FactKey::Amount), Some("250000"));
    }

    #[test]
    fn extracts_sender_company() {
        let facts = extract("С уважением, ООО «Ромашка», г. Москва.");
        assert_eq!(facts.get(FactKey::SenderCompany), Some("ООО \"Ромашка\""));
    }

    #[test]
    fn sender_company_name_is_trimmed() {
        let facts = extract(r#"От АО " Вектор Плюс " поступило письмо."#);
        assert_eq!(
            facts.get(FactKey::SenderCompany),
            Some("АО \"Вектор Плюс\"")
        );
    }

    #[test]
    fn pao_is_not_matched_as_ao() {
        let facts = extract("Письмо от ПАО «Северсталь-Инвест».");
        assert_eq!(
            facts.get(FactKey::SenderCompany),
            Some("ПАО \"Северсталь-Инвест\"")
        );
    }

    #[test]
    fn unquoted_company_is_not_extracted() {
        let facts = extract("Письмо от ООО Ромашка без кавычек.");
        assert!(facts.get(FactKey::SenderCompany).is_none());
    }

    #[test]
    fn no_matches_yields_empty_map() {
        let facts = extract("Добрый день! Спасибо за встречу.");
        assert!(facts.is_empty());
    }

    #[test]
    fn patterns_are_independent() {
        let facts = extract(
            "ООО «Альфа» просит оплатить 15 000 000 руб. по договору №77-К в течение 30 дней.",
        );
        assert_eq!(facts.len(), 5);
        assert_eq!(facts.get(FactKey::Amount), Some("15000000"));
        assert_eq!(facts.get(FactKey::DocumentNumber), Some("77-К"));
        assert_eq!(facts.get(FactKey::SenderCompany), Some("ООО \"Альфа\""));
        assert_eq!(facts.get(FactKey::DeadlineRelative), Some("30 дней"));
        assert_eq!(facts.get(FactKey::DeadlineDateEstimated), Some("31.03.2025"));
    }
}
