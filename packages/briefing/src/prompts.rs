//! Model prompts for summarization, translation, and follow-up answering.
//!
//! Prompt text lives here as constants and format functions so the calling
//! modules stay free of string templates.

use crate::types::{HeadlineLink, Language};

/// System role for homepage summarization.
pub const SUMMARIZE_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that summarizes homepage content from news websites.";

/// System role for translation.
pub const TRANSLATE_SYSTEM_PROMPT: &str =
    "You are a professional translator between English and Chinese.";

/// System role for follow-up question answering.
pub const ANSWER_SYSTEM_PROMPT: &str = "You answer follow-up questions about a news summary. \
     Base your answers on the provided summary excerpts and the conversation so far. \
     If the excerpts do not contain the answer, say so instead of guessing.";

/// Build the summarization prompt from the extracted sample and candidate links.
pub fn format_summarize_prompt(sample_text: &str, links: &[HeadlineLink]) -> String {
    let link_list = if links.is_empty() {
        "(none)".to_string()
    } else {
        links
            .iter()
            .map(|l| format!("- {}: {}", l.text, l.url))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "You are reading the homepage of a news website. The content below contains \
         headlines, subheadings, and key blurbs from that homepage.\n\n\
         Summarize the key stories, themes, and highlights as a list in Markdown format, \
         in the source language: if most of the content is in English, summarize in \
         English; if in Chinese, summarize in Chinese. There will be no other languages. \
         Group related items if possible.\n\n\
         When a candidate link below matches a story, attach it to that item as an inline \
         Markdown link on the headline text. Never display a raw URL as visible text.\n\n\
         Candidate links:\n{link_list}\n\n---\n{sample_text}\n"
    )
}

/// Build the translation prompt for `target`.
pub fn format_translate_prompt(text: &str, target: Language) -> String {
    format!(
        "Translate the following text into {}. Preserve the Markdown structure and keep \
         every embedded link exactly as it appears; translate only the prose.\n\n{}",
        target.name(),
        text
    )
}

/// Build the question prompt from retrieved summary excerpts.
pub fn format_answer_prompt(excerpts: &[&str], question: &str) -> String {
    let context = if excerpts.is_empty() {
        "(no matching excerpts)".to_string()
    } else {
        excerpts.join("\n---\n")
    };

    format!("Summary excerpts:\n{context}\n\nQuestion: {question}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_prompt_includes_links() {
        let links = vec![HeadlineLink::new(
            "Floods displace thousands in the delta region",
            "https://news.example.com/floods",
        )];
        let prompt = format_summarize_prompt("Sample homepage text", &links);

        assert!(prompt.contains("Floods displace thousands"));
        assert!(prompt.contains("https://news.example.com/floods"));
        assert!(prompt.contains("Sample homepage text"));
    }

    #[test]
    fn test_summarize_prompt_without_links() {
        let prompt = format_summarize_prompt("Sample homepage text", &[]);
        assert!(prompt.contains("(none)"));
    }

    #[test]
    fn test_translate_prompt_names_target_language() {
        let prompt = format_translate_prompt("- [Headline](https://x.com)", Language::Zh);
        assert!(prompt.contains("Chinese"));
        assert!(prompt.contains("[Headline](https://x.com)"));
    }

    #[test]
    fn test_answer_prompt_joins_excerpts() {
        let prompt = format_answer_prompt(&["first excerpt", "second excerpt"], "What happened?");
        assert!(prompt.contains("first excerpt"));
        assert!(prompt.contains("second excerpt"));
        assert!(prompt.contains("What happened?"));
    }
}
