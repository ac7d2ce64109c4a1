//! Caller-facing facade over the extraction-summarization-conversation
//! pipeline.
//!
//! The facade itself is stateless apart from its capabilities: summary
//! records and sessions are owned by the caller and passed back in, so a
//! multi-user deployment gives each user its own record/session pair
//! rather than sharing anything process-wide.

use std::sync::Arc;

use tracing::warn;

use crate::ai::{Ai, OpenAiBridge};
use crate::error::{BriefingError, ModelResult, Result};
use crate::extract::extract;
use crate::fetch::{Fetcher, HttpFetcher};
use crate::session::Session;
use crate::summarize::summarize;
use crate::translate::translate;
use crate::types::{Language, SummaryRecord};

/// The briefing pipeline: fetch → extract → summarize, plus translation
/// and conversation sessions over the result.
///
/// Generic over its capabilities so tests can run the whole pipeline with
/// [`crate::testing::MockFetcher`] and [`crate::testing::MockAi`].
pub struct Briefing<F: Fetcher, A: Ai> {
    fetcher: F,
    ai: Arc<A>,
}

impl Briefing<HttpFetcher, OpenAiBridge> {
    /// Production wiring: HTTP fetcher + OpenAI, keyed by `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(HttpFetcher::new(), OpenAiBridge::from_env()?))
    }
}

impl<F: Fetcher, A: Ai> Briefing<F, A> {
    /// Create a pipeline from explicit capabilities.
    pub fn new(fetcher: F, ai: A) -> Self {
        Self {
            fetcher,
            ai: Arc::new(ai),
        }
    }

    /// Fetch `url`, extract its content, and summarize it with `model`.
    ///
    /// Failures surface as typed [`BriefingError`] variants; callers branch
    /// on the error, not on the content.
    pub async fn summarize(&self, url: &str, model: &str) -> Result<SummaryRecord> {
        let page = extract(&self.fetcher, url).await?;
        let record = summarize(self.ai.as_ref(), &page.sample_text, &page.links, model).await?;
        Ok(record)
    }

    /// Like [`Briefing::summarize`], but never fails: errors become a
    /// failure-marked record (content prefixed with
    /// [`crate::types::FAILURE_MARKER`], language `En`).
    ///
    /// For callers that only render strings. Everyone else should prefer
    /// the typed variant.
    pub async fn summarize_lossy(&self, url: &str, model: &str) -> SummaryRecord {
        match self.summarize(url, model).await {
            Ok(record) => record,
            Err(e) => {
                warn!(url = %url, error = %e, "Summarization failed; returning marker record");
                match e {
                    BriefingError::Fetch(e) => {
                        SummaryRecord::failure(format!("Failed to fetch the page: {e}"))
                    }
                    BriefingError::Parse(e) => {
                        SummaryRecord::failure(format!("Failed to extract text: {e}"))
                    }
                    BriefingError::Model(e) => {
                        SummaryRecord::failure(format!("Model error: {e}"))
                    }
                }
            }
        }
    }

    /// Translate a record into `target`, reusing the record's cache.
    ///
    /// A cached translation (or the original, when `target` is the
    /// record's own language) is returned without a model call. A fresh
    /// translation is stored on the record on success; on failure nothing
    /// is stored, so a good cached value is never overwritten.
    pub async fn translated(
        &self,
        record: &mut SummaryRecord,
        target: Language,
        model: &str,
    ) -> ModelResult<String> {
        if let Some(cached) = record.cached_translation(target) {
            return Ok(cached.to_string());
        }

        let translated = translate(self.ai.as_ref(), &record.content, target, model).await?;

        // Marker records pass through translation unchanged; don't cache those.
        if !record.is_failure() {
            record.store_translation(target, translated.clone());
        }

        Ok(translated)
    }

    /// Open a conversation session over a record.
    ///
    /// Each summarize call gets its own session; sessions are never
    /// re-pointed at a different record.
    pub async fn open_session(
        &self,
        record: &SummaryRecord,
        model: impl Into<String>,
    ) -> ModelResult<Session<A>> {
        Session::open(record, model, Arc::clone(&self.ai)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockAi, MockFetcher};

    #[tokio::test]
    async fn test_translated_uses_cache_on_repeat() {
        let briefing = Briefing::new(
            MockFetcher::new(),
            MockAi::new().with_reply("- [要闻](https://x.com/story)"),
        );
        let mut record = SummaryRecord::new("- [Headline](https://x.com/story)", Language::En);

        let first = briefing
            .translated(&mut record, Language::Zh, "test-model")
            .await
            .unwrap();
        let second = briefing
            .translated(&mut record, Language::Zh, "test-model")
            .await
            .unwrap();

        assert_eq!(first, second);
        // Second request was answered from the cache
        assert_eq!(briefing.ai.completion_count(), 1);
    }

    #[tokio::test]
    async fn test_translated_own_language_returns_content() {
        let briefing = Briefing::new(MockFetcher::new(), MockAi::new());
        let mut record = SummaryRecord::new("Original English summary", Language::En);

        let result = briefing
            .translated(&mut record, Language::En, "test-model")
            .await
            .unwrap();

        assert_eq!(result, "Original English summary");
        assert_eq!(briefing.ai.completion_count(), 0);
        assert!(record.translations.is_empty());
    }

    #[tokio::test]
    async fn test_translated_failure_stores_nothing() {
        let briefing = Briefing::new(MockFetcher::new(), MockAi::new().failing_completions());
        let mut record = SummaryRecord::new("English summary", Language::En);

        assert!(briefing
            .translated(&mut record, Language::Zh, "test-model")
            .await
            .is_err());
        assert!(record.translations.is_empty());
    }

    #[tokio::test]
    async fn test_translated_marker_record_not_cached() {
        let briefing = Briefing::new(MockFetcher::new(), MockAi::new());
        let mut record = SummaryRecord::failure("fetch timed out");

        let result = briefing
            .translated(&mut record, Language::Zh, "test-model")
            .await
            .unwrap();

        assert_eq!(result, record.content);
        assert!(record.translations.is_empty());
        assert_eq!(briefing.ai.completion_count(), 0);
    }
}
