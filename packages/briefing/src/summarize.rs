//! Summarization: extracted sample + candidate links → [`SummaryRecord`].

use tracing::info;

use crate::ai::Ai;
use crate::error::ModelResult;
use crate::language::detect_language;
use crate::prompts::{format_summarize_prompt, SUMMARIZE_SYSTEM_PROMPT};
use crate::types::{ConversationTurn, HeadlineLink, SummaryRecord};

/// Temperature for summarization: focused output, natural phrasing.
pub const SUMMARIZE_TEMPERATURE: f32 = 0.4;

/// Summarize an extracted homepage sample.
///
/// Builds one prompt from the sample and the candidate links, invokes the
/// model, and classifies the result's language with the CJK heuristic
/// (see [`crate::language::detect_language`] for the known limits of that
/// classification).
pub async fn summarize<A: Ai>(
    ai: &A,
    sample_text: &str,
    links: &[HeadlineLink],
    model: &str,
) -> ModelResult<SummaryRecord> {
    let prompt = format_summarize_prompt(sample_text, links);

    let content = ai
        .complete(
            SUMMARIZE_SYSTEM_PROMPT,
            &[ConversationTurn::user(prompt)],
            model,
            SUMMARIZE_TEMPERATURE,
        )
        .await?;

    let language = detect_language(&content);

    info!(
        model = %model,
        language = %language,
        chars = content.len(),
        "Summary produced"
    );

    Ok(SummaryRecord::new(content, language))
}
