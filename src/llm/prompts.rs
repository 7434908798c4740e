//! Prompt construction for the generation collaborator.
//!
//! The prompts are Russian: the service triages Russian bank
//! correspondence and the reply goes out under the bank's name.

use crate::triage::types::{Category, ExtractedFacts};

// ── Presentation presets ────────────────────────────────────────────

/// Tone preset for the generated reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    /// Standard formal business tone.
    #[default]
    Business,
    /// Polite but softer and friendlier.
    Soft,
    /// More formal and strict.
    Strict,
}

impl Tone {
    /// Lenient parse from the request field; unknown values fall back to
    /// the default business tone.
    pub fn from_request(value: Option<&str>) -> Self {
        match value.map(str::trim).map(str::to_lowercase).as_deref() {
            Some("мягкий") | Some("дружелюбный") | Some("soft") => Self::Soft,
            Some("строгий") | Some("формальный") | Some("strict") => Self::Strict,
            _ => Self::Business,
        }
    }

    fn instruction(&self) -> &'static str {
        match self {
            Self::Soft => "Сохраняй вежливый, но более мягкий и дружелюбный тон.",
            Self::Strict => "Тон более формальный и строгий, без лишних эмоций.",
            Self::Business => "Используй стандартный официальный деловой тон.",
        }
    }
}

/// Length preset for the generated reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnswerLength {
    Short,
    #[default]
    Medium,
    Full,
}

impl AnswerLength {
    /// Lenient parse from the request field; unknown values fall back to
    /// the default medium length.
    pub fn from_request(value: Option<&str>) -> Self {
        match value.map(str::trim).map(str::to_lowercase).as_deref() {
            Some("короткий") | Some("short") => Self::Short,
            Some("полный") | Some("full") => Self::Full,
            _ => Self::Medium,
        }
    }

    fn instruction(&self) -> &'static str {
        match self {
            Self::Short => "Ответ не более 3-4 предложений.",
            Self::Medium => "Ответ не более 8-10 предложений.",
            Self::Full => {
                "Дай развёрнутый ответ с необходимыми пояснениями и дальнейшими шагами."
            }
        }
    }
}

// ── Prompt builders ─────────────────────────────────────────────────

/// System instructions for the summary call.
pub const SUMMARY_INSTRUCTIONS: &str =
    "Ты кратко пересказываешь содержание деловых писем.";

/// System instructions for the reply call.
pub const REPLY_INSTRUCTIONS: &str = "Ты - ассистент деловой переписки банка.";

/// Build the user prompt asking for a short neutral summary.
pub fn build_summary_prompt(text: &str) -> String {
    format!(
        "Тебе дан текст входящего письма.\n\n\
         Задача: кратко пересказать суть письма 2 предложениями на русском языке, \
         нейтральным деловым стилем, без приветствий и лишних деталей.\n\n\
         Письмо:\n\"\"\"{text}\"\"\""
    )
}

/// Render the facts block as a labeled list for the prompt.
fn facts_block(facts: &ExtractedFacts) -> String {
    if facts.is_empty() {
        return "нет дополнительных данных".to_string();
    }
    facts
        .iter()
        .map(|(key, value)| format!("- {}: {}", key.as_str(), value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the user prompt asking for a draft reply on the bank's behalf.
pub fn build_reply_prompt(
    text: &str,
    category: Category,
    facts: &ExtractedFacts,
    tone: Tone,
    length: AnswerLength,
) -> String {
    format!(
        "Ты - ассистент деловой переписки крупного банка. Пиши строго на «Вы», \
         официально-деловым стилем.\n\n\
         Входящее письмо клиента:\n\"\"\"{text}\"\"\"\n\n\
         Категория письма: {category}.\n\
         Извлечённые ключевые факты:\n{facts}\n\n\
         {tone}\n\n\
         Сформируй вежливый, профессиональный ответ от лица банка.\n\
         Структура:\n\
         - Обращение (если нет имени, используй «Уважаемый клиент»)\n\
         - 1-2 абзаца по сути\n\
         - При необходимости: сроки и дальнейшие шаги\n\
         - Завершение с фразой «С уважением, [название банка]».\n\n\
         Не используй неформальных обращений. {length}",
        category = category.label(),
        facts = facts_block(facts),
        tone = tone.instruction(),
        length = length.instruction(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::types::FactKey;

    #[test]
    fn tone_parses_leniently() {
        assert_eq!(Tone::from_request(None), Tone::Business);
        assert_eq!(Tone::from_request(Some("деловой")), Tone::Business);
        assert_eq!(Tone::from_request(Some("МЯГКИЙ")), Tone::Soft);
        assert_eq!(Tone::from_request(Some("формальный")), Tone::Strict);
        assert_eq!(Tone::from_request(Some("что-то ещё")), Tone::Business);
    }

    #[test]
    fn length_parses_leniently() {
        assert_eq!(AnswerLength::from_request(None), AnswerLength::Medium);
        assert_eq!(AnswerLength::from_request(Some("full")), AnswerLength::Full);
        assert_eq!(
            AnswerLength::from_request(Some("короткий")),
            AnswerLength::Short
        );
        assert_eq!(
            AnswerLength::from_request(Some("42")),
            AnswerLength::Medium
        );
    }

    #[test]
    fn summary_prompt_embeds_letter() {
        let prompt = build_summary_prompt("Просим предоставить выписку.");
        assert!(prompt.contains("Просим предоставить выписку."));
        assert!(prompt.contains("2 предложениями"));
    }

    #[test]
    fn reply_prompt_renders_facts_as_list() {
        let mut facts = ExtractedFacts::new();
        facts.insert(FactKey::Amount, "1000000");
        facts.insert(FactKey::DeadlineDate, "12.03.2025");

        let prompt = build_reply_prompt(
            "Текст письма",
            Category::InfoRequest,
            &facts,
            Tone::Business,
            AnswerLength::Medium,
        );
        assert!(prompt.contains("Категория письма: Запрос информации."));
        assert!(prompt.contains("- deadline_date: 12.03.2025"));
        assert!(prompt.contains("- amount: 1000000"));
        assert!(prompt.contains("Используй стандартный официальный деловой тон."));
        assert!(prompt.contains("Ответ не более 8-10 предложений."));
    }

    #[test]
    fn reply_prompt_handles_empty_facts() {
        let prompt = build_reply_prompt(
            "Текст",
            Category::Other,
            &ExtractedFacts::new(),
            Tone::Soft,
            AnswerLength::Short,
        );
        assert!(prompt.contains("нет дополнительных данных"));
        assert!(prompt.contains("мягкий и дружелюбный"));
    }
}
