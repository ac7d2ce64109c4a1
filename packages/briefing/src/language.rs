//! Language classification heuristic.
//!
//! The system supports exactly two languages (English and Chinese), so
//! classification reduces to a character-range check: any CJK Unified
//! Ideograph means Chinese, otherwise English. This is an approximation,
//! not linguistic detection — a mostly-English text with one stray Chinese
//! character classifies as Chinese. It is isolated behind `detect_language`
//! so a real language-identification routine can replace it without
//! touching callers.

use crate::types::Language;

/// Classify text as English or Chinese.
///
/// Returns [`Language::Zh`] if any character falls in the CJK Unified
/// Ideographs range (U+4E00–U+9FFF), otherwise [`Language::En`].
pub fn detect_language(text: &str) -> Language {
    if text.chars().any(is_cjk_ideograph) {
        Language::Zh
    } else {
        Language::En
    }
}

fn is_cjk_ideograph(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_text() {
        assert_eq!(detect_language("Hello world"), Language::En);
        assert_eq!(detect_language(""), Language::En);
        assert_eq!(detect_language("1234 !@#$"), Language::En);
    }

    #[test]
    fn test_chinese_text() {
        assert_eq!(detect_language("你好世界"), Language::Zh);
    }

    #[test]
    fn test_mixed_text_classifies_as_chinese() {
        // A single CJK character dominates the classification
        assert_eq!(detect_language("Hello 你好"), Language::Zh);
    }

    #[test]
    fn test_non_cjk_unicode_is_english() {
        // Japanese kana and Korean hangul are outside U+4E00..U+9FFF
        assert_eq!(detect_language("こんにちは"), Language::En);
        assert_eq!(detect_language("안녕하세요"), Language::En);
    }
}
