//! Rule-based letter classification.
//!
//! A fixed, ordered keyword cascade over the lower-cased text: the first
//! rule with any substring hit wins. Rule order is the tie-break policy —
//! a letter mentioning both the regulator and a complaint is Regulatory
//! because that rule is evaluated first.

use tracing::debug;

use crate::triage::normalize::NormalizedText;
use crate::triage::types::Category;

/// A single classification rule: keyword set → category.
#[derive(Debug, Clone)]
pub struct CategoryRule {
    /// Category assigned when any keyword matches.
    pub category: Category,
    /// Lower-case substrings that trigger this rule.
    pub keywords: &'static [&'static str],
}

/// Ordered first-match-wins classifier.
pub struct Classifier {
    rules: Vec<CategoryRule>,
}

impl Classifier {
    /// Classifier with the default rule cascade, highest precedence first.
    pub fn default_rules() -> Self {
        let rules = vec![
            CategoryRule {
                category: Category::Regulatory,
                keywords: &[
                    "банк россии",
                    "центральный банк",
                    "цб рф",
                    "указание банка россии",
                ],
            },
            CategoryRule {
                category: Category::Complaint,
                keywords: &["претензия", "жалоба", "недовольн", "нарушение"],
            },
            CategoryRule {
                category: Category::Partnership,
                keywords: &[
                    "предлагаем сотрудничество",
                    "предлагаем партнёрство",
                    "предлагаем партнерство",
                    "партнёрство",
                    "партнерство",
                    "коммерческое предложение",
                ],
            },
            CategoryRule {
                category: Category::Approval,
                keywords: &[
                    "на согласование",
                    "прошу согласовать",
                    "просим согласовать",
                ],
            },
            CategoryRule {
                category: Category::InfoRequest,
                keywords: &[
                    "просим предоставить",
                    "просим направить",
                    "запрос информации",
                    "просим выслать",
                    "прошу предоставить",
                ],
            },
            CategoryRule {
                category: Category::Notification,
                keywords: &[
                    "уведомляем",
                    "информируем",
                    "сообщаем вам",
                    "доводим до вашего сведения",
                ],
            },
        ];
        Self { rules }
    }

    /// Assign exactly one category to the letter.
    ///
    /// Empty text short-circuits to the fallback without touching the rules.
    pub fn classify(&self, text: &NormalizedText) -> Category {
        if text.is_empty() {
            return Category::Other;
        }

        let lowered = text.to_lowercase();
        for rule in &self.rules {
            if let Some(hit) = rule.keywords.iter().find(|kw| lowered.contains(**kw)) {
                debug!(category = %rule.category, keyword = %hit, "Category rule matched");
                return rule.category;
            }
        }

        Category::Other
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::default_rules()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::normalize::normalize;

    fn classify(text: &str) -> Category {
        Classifier::default_rules().classify(&normalize(text))
    }

    #[test]
    fn empty_text_falls_back() {
        assert_eq!(classify(""), Category::Other);
        assert_eq!(classify("   \n  "), Category::Other);
    }

    #[test]
    fn unmatched_text_falls_back() {
        assert_eq!(
            classify("Добрый день, высылаем протокол встречи."),
            Category::Other
        );
    }

    #[test]
    fn detects_regulatory() {
        assert_eq!(
            classify("В соответствии с указанием Банка России направляем отчётность."),
            Category::Regulatory
        );
    }

    #[test]
    fn detects_complaint() {
        assert_eq!(
            classify("Направляем претензию по договору обслуживания."),
            Category::Complaint
        );
    }

    #[test]
    fn detects_partnership() {
        assert_eq!(
            classify("Предлагаем сотрудничество в сфере эквайринга."),
            Category::Partnership
        );
    }

    #[test]
    fn detects_approval_request() {
        assert_eq!(
            classify("Направляем проект договора на согласование."),
            Category::Approval
        );
    }

    #[test]
    fn detects_info_request() {
        assert_eq!(
            classify("Просим предоставить выписку по счёту за март."),
            Category::InfoRequest
        );
    }

    #[test]
    fn detects_notification() {
        assert_eq!(
            classify("Уведомляем вас об изменении реквизитов."),
            Category::Notification
        );
    }

    #[test]
    fn regulatory_wins_over_complaint() {
        // Both vocabularies present — the Regulatory rule is evaluated first.
        assert_eq!(
            classify("Банк России направил запрос, также заявляем претензию."),
            Category::Regulatory
        );
    }

    #[test]
    fn complaint_wins_over_partnership() {
        assert_eq!(
            classify("Жалоба: предлагаем партнерство расторгнуть."),
            Category::Complaint
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(classify("ПРОСИМ ПРЕДОСТАВИТЬ ДОКУМЕНТЫ"), Category::InfoRequest);
    }
}
