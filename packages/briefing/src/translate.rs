//! Translation between English and Chinese.
//!
//! The translator is stateless; caching lives on [`SummaryRecord`] and is
//! the caller's job (see [`crate::Briefing::translated`]).
//!
//! [`SummaryRecord`]: crate::types::SummaryRecord

use tracing::{debug, info};

use crate::ai::Ai;
use crate::error::ModelResult;
use crate::language::detect_language;
use crate::prompts::{format_translate_prompt, TRANSLATE_SYSTEM_PROMPT};
use crate::types::{ConversationTurn, Language, FAILURE_MARKER};

/// Temperature for translation: low variance, literal.
pub const TRANSLATE_TEMPERATURE: f32 = 0.3;

/// Translate `text` into `target`.
///
/// No-op short-circuits, returning the input unchanged with no model call:
/// - `text` already classifies as `target`, or
/// - `text` is a failure-marker string (errors are not translated).
///
/// Otherwise the model is instructed to preserve Markdown structure and
/// embedded links verbatim while translating the prose.
pub async fn translate<A: Ai>(
    ai: &A,
    text: &str,
    target: Language,
    model: &str,
) -> ModelResult<String> {
    if text.starts_with(FAILURE_MARKER) {
        debug!("Refusing to translate a failure marker string");
        return Ok(text.to_string());
    }
    if detect_language(text) == target {
        debug!(target = %target, "Text already in target language");
        return Ok(text.to_string());
    }

    let prompt = format_translate_prompt(text, target);
    let translated = ai
        .complete(
            TRANSLATE_SYSTEM_PROMPT,
            &[ConversationTurn::user(prompt)],
            model,
            TRANSLATE_TEMPERATURE,
        )
        .await?;

    info!(target = %target, chars = translated.len(), "Translation produced");
    Ok(translated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockAi;
    use crate::types::SummaryRecord;

    #[tokio::test]
    async fn test_same_language_is_identity_without_model_call() {
        let ai = MockAi::new();
        let text = "Already in English";

        let result = translate(&ai, text, Language::En, "test-model").await.unwrap();

        assert_eq!(result, text);
        assert_eq!(ai.completion_count(), 0);
    }

    #[tokio::test]
    async fn test_failure_marker_is_passed_through() {
        let ai = MockAi::new();
        let record = SummaryRecord::failure("fetch timed out");

        let result = translate(&ai, &record.content, Language::Zh, "test-model")
            .await
            .unwrap();

        assert_eq!(result, record.content);
        assert_eq!(ai.completion_count(), 0);
    }

    #[tokio::test]
    async fn test_cross_language_invokes_model() {
        let ai = MockAi::new().with_reply("- [头条新闻](https://news.example.com/story)");

        let result = translate(
            &ai,
            "- [Top headline](https://news.example.com/story)",
            Language::Zh,
            "test-model",
        )
        .await
        .unwrap();

        assert!(result.contains("头条新闻"));
        assert_eq!(ai.completion_count(), 1);
    }

    #[tokio::test]
    async fn test_model_failure_propagates() {
        let ai = MockAi::new().failing_completions();
        assert!(translate(&ai, "Top stories", Language::Zh, "test-model")
            .await
            .is_err());
    }
}
