//! Core data types for the briefing pipeline.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prefix marking a summary string that represents a failure, not content.
///
/// The typed API ([`crate::Briefing::summarize`]) returns real errors; this
/// marker exists for string-only callers that render whatever they are
/// given (see [`SummaryRecord::failure`]). The Translator also recognizes
/// it and refuses to translate marker strings.
pub const FAILURE_MARKER: &str = "❌";

/// A supported summary language.
///
/// The system is bilingual by design: summaries and translations are
/// always English or Chinese, never anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    /// English
    #[serde(rename = "en")]
    En,

    /// Chinese
    #[serde(rename = "zh")]
    Zh,
}

impl Language {
    /// Human-readable name, used in translation prompts.
    pub fn name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Zh => "Chinese",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Language::En => "en",
            Language::Zh => "zh",
        };
        write!(f, "{}", code)
    }
}

/// A candidate headline link found on the page.
///
/// Produced by the extractor, consumed by the summarizer's prompt
/// construction, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadlineLink {
    /// Visible anchor text (at least 20 characters, not a nav phrase)
    pub text: String,

    /// Absolute URL the anchor points to
    pub url: String,
}

impl HeadlineLink {
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
        }
    }
}

/// The result of one summarization call.
///
/// Holds the original summary, its detected language, and translations
/// produced on demand. The record is owned by the caller and lives for one
/// process session; nothing here is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRecord {
    /// The summary text in its original language
    pub content: String,

    /// Detected language of `content`
    pub language: Language,

    /// Cached translations keyed by target language.
    ///
    /// Invariant: never contains the key equal to `language` — the
    /// original lives only in `content`. [`SummaryRecord::store_translation`]
    /// enforces this.
    pub translations: HashMap<Language, String>,

    /// When this summary was created
    pub created_at: DateTime<Utc>,
}

impl SummaryRecord {
    /// Create a new record from summary content.
    pub fn new(content: impl Into<String>, language: Language) -> Self {
        Self {
            content: content.into(),
            language,
            translations: HashMap::new(),
            created_at: Utc::now(),
        }
    }

    /// Create a failure record: marker-prefixed content, language `En`.
    ///
    /// Callers that only render strings treat any record whose content
    /// starts with [`FAILURE_MARKER`] as an error, not a summary.
    pub fn failure(message: impl fmt::Display) -> Self {
        Self::new(format!("{} {}", FAILURE_MARKER, message), Language::En)
    }

    /// True if this record represents a failure rather than a summary.
    pub fn is_failure(&self) -> bool {
        self.content.starts_with(FAILURE_MARKER)
    }

    /// Look up a translation for `target`, if one is available.
    ///
    /// Asking for the record's own language returns the original content,
    /// which is why `translations` never needs that key.
    pub fn cached_translation(&self, target: Language) -> Option<&str> {
        if target == self.language {
            return Some(&self.content);
        }
        self.translations.get(&target).map(String::as_str)
    }

    /// Store a translation for `target`.
    ///
    /// Returns `false` without storing when `target` equals the record's
    /// own language; the original is never duplicated into the map.
    pub fn store_translation(&mut self, target: Language, text: impl Into<String>) -> bool {
        if target == self.language {
            return false;
        }
        self.translations.insert(target, text.into());
        true
    }
}

/// Who produced a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One turn in a conversation session.
///
/// Turns are append-only and scoped to one summary's session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub text: String,
}

impl ConversationTurn {
    /// Create a user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    /// Create an assistant turn.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}
