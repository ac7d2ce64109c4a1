//! Testing utilities: mock implementations of the trait seams.
//!
//! Useful for exercising the pipeline without real network or model calls.
//! `MockAi` returns scripted completions and deterministic embeddings and
//! records every call for assertions; `MockFetcher` serves canned pages or
//! simulated failures.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::ai::Ai;
use crate::error::{FetchError, ModelError, ModelResult};
use crate::fetch::Fetcher;
use crate::types::{ConversationTurn, Role};

/// Record of one call made to [`MockAi`].
#[derive(Debug, Clone)]
pub enum MockAiCall {
    Complete {
        system: String,
        model: String,
        temperature: f32,
        turn_count: usize,
        last_user_text: String,
    },
    Embed {
        text: String,
    },
}

/// A mock [`Ai`] implementation.
///
/// Completions come from a scripted reply queue (falling back to a default
/// reply); embeddings are deterministic functions of the input text, so
/// identical texts always land at the same point in embedding space.
pub struct MockAi {
    replies: RwLock<VecDeque<String>>,
    default_reply: String,
    fail_completions: AtomicBool,
    fail_next_completion: AtomicBool,
    fail_embeddings: AtomicBool,
    embedding_dim: usize,
    calls: RwLock<Vec<MockAiCall>>,
}

impl Default for MockAi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAi {
    /// Create a mock with default behavior.
    pub fn new() -> Self {
        Self {
            replies: RwLock::new(VecDeque::new()),
            default_reply: "mock reply".to_string(),
            fail_completions: AtomicBool::new(false),
            fail_next_completion: AtomicBool::new(false),
            fail_embeddings: AtomicBool::new(false),
            embedding_dim: 16,
            calls: RwLock::new(Vec::new()),
        }
    }

    /// Queue a scripted reply; replies are consumed in order.
    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.replies.write().unwrap().push_back(reply.into());
        self
    }

    /// Make every completion fail.
    pub fn failing_completions(self) -> Self {
        self.fail_completions.store(true, Ordering::SeqCst);
        self
    }

    /// Make every embedding call fail.
    pub fn failing_embeddings(self) -> Self {
        self.fail_embeddings.store(true, Ordering::SeqCst);
        self
    }

    /// Fail only the next completion, then recover.
    pub fn fail_next_completion(&self) {
        self.fail_next_completion.store(true, Ordering::SeqCst);
    }

    /// All calls made to this mock.
    pub fn calls(&self) -> Vec<MockAiCall> {
        self.calls.read().unwrap().clone()
    }

    /// How many completions were requested.
    pub fn completion_count(&self) -> usize {
        self.calls
            .read()
            .unwrap()
            .iter()
            .filter(|c| matches!(c, MockAiCall::Complete { .. }))
            .count()
    }

    /// Turn counts of each completion, in call order.
    pub fn completion_turn_counts(&self) -> Vec<usize> {
        self.calls
            .read()
            .unwrap()
            .iter()
            .filter_map(|c| match c {
                MockAiCall::Complete { turn_count, .. } => Some(*turn_count),
                _ => None,
            })
            .collect()
    }

    fn deterministic_embedding(&self, text: &str) -> Vec<f32> {
        let digest = Sha256::digest(text.as_bytes());
        digest
            .iter()
            .cycle()
            .take(self.embedding_dim)
            .map(|&b| (b as f32 / 255.0) - 0.5)
            .collect()
    }
}

#[async_trait]
impl Ai for MockAi {
    async fn complete(
        &self,
        system: &str,
        turns: &[ConversationTurn],
        model: &str,
        temperature: f32,
    ) -> ModelResult<String> {
        let last_user_text = turns
            .iter()
            .rev()
            .find(|t| t.role == Role::User)
            .map(|t| t.text.clone())
            .unwrap_or_default();

        self.calls.write().unwrap().push(MockAiCall::Complete {
            system: system.to_string(),
            model: model.to_string(),
            temperature,
            turn_count: turns.len(),
            last_user_text,
        });

        if self.fail_completions.load(Ordering::SeqCst)
            || self.fail_next_completion.swap(false, Ordering::SeqCst)
        {
            return Err(ModelError::Other("mock completion failure".into()));
        }

        Ok(self
            .replies
            .write()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.default_reply.clone()))
    }

    async fn embed(&self, text: &str) -> ModelResult<Vec<f32>> {
        self.calls.write().unwrap().push(MockAiCall::Embed {
            text: text.to_string(),
        });

        if self.fail_embeddings.load(Ordering::SeqCst) {
            return Err(ModelError::Other("mock embedding failure".into()));
        }

        Ok(self.deterministic_embedding(text))
    }
}

/// A mock [`Fetcher`] serving canned pages.
pub struct MockFetcher {
    pages: HashMap<String, String>,
    fail_all: bool,
}

impl Default for MockFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFetcher {
    /// Create a fetcher with no pages; unknown URLs yield HTTP 404.
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            fail_all: false,
        }
    }

    /// Register a page body for a URL.
    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }

    /// Create a fetcher where every request times out.
    pub fn failing() -> Self {
        Self {
            pages: HashMap::new(),
            fail_all: true,
        }
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        if self.fail_all {
            return Err(FetchError::Timeout {
                url: url.to_string(),
            });
        }

        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                status: 404,
                url: url.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_ai_replies_in_order() {
        let ai = MockAi::new().with_reply("first").with_reply("second");

        let turns = [ConversationTurn::user("q")];
        assert_eq!(ai.complete("sys", &turns, "m", 0.0).await.unwrap(), "first");
        assert_eq!(ai.complete("sys", &turns, "m", 0.0).await.unwrap(), "second");
        // Queue exhausted: fall back to the default
        assert_eq!(
            ai.complete("sys", &turns, "m", 0.0).await.unwrap(),
            "mock reply"
        );
        assert_eq!(ai.completion_count(), 3);
    }

    #[tokio::test]
    async fn test_mock_ai_embeddings_are_deterministic() {
        let ai = MockAi::new();

        let a = ai.embed("same text").await.unwrap();
        let b = ai.embed("same text").await.unwrap();
        let c = ai.embed("different text").await.unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 16);
    }

    #[tokio::test]
    async fn test_mock_ai_one_shot_failure_recovers() {
        let ai = MockAi::new();
        let turns = [ConversationTurn::user("q")];

        ai.fail_next_completion();
        assert!(ai.complete("sys", &turns, "m", 0.0).await.is_err());
        assert!(ai.complete("sys", &turns, "m", 0.0).await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_fetcher() {
        let fetcher = MockFetcher::new().with_page("https://x.com", "<p>hi</p>");

        assert_eq!(fetcher.fetch("https://x.com").await.unwrap(), "<p>hi</p>");
        assert!(matches!(
            fetcher.fetch("https://missing.com").await,
            Err(FetchError::Status { status: 404, .. })
        ));
        assert!(matches!(
            MockFetcher::failing().fetch("https://x.com").await,
            Err(FetchError::Timeout { .. })
        ));
    }
}
