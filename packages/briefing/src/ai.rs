//! AI trait for model operations.
//!
//! The trait abstracts the two model capabilities the pipeline needs:
//! chat completion and embedding generation. `OpenAiBridge` is the real
//! implementation over the `openai-client` crate; tests use
//! [`crate::testing::MockAi`].

use async_trait::async_trait;
use tracing::debug;

use openai_client::{ChatRequest, Message, OpenAIClient};

use crate::error::ModelResult;
use crate::types::{ConversationTurn, Role};

/// Model capabilities used by the pipeline.
///
/// Model identifiers are opaque strings chosen by the caller and passed
/// through unchanged; the pipeline places no constraint on them.
#[async_trait]
pub trait Ai: Send + Sync {
    /// Run a chat completion.
    ///
    /// `turns` is the conversation so far, ending with the user message the
    /// model should answer.
    async fn complete(
        &self,
        system: &str,
        turns: &[ConversationTurn],
        model: &str,
        temperature: f32,
    ) -> ModelResult<String>;

    /// Generate an embedding vector for `text`.
    async fn embed(&self, text: &str) -> ModelResult<Vec<f32>>;

    /// Generate embeddings for multiple texts.
    async fn embed_batch(&self, texts: &[&str]) -> ModelResult<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }
}

/// Byte cap on embedding input, below the embedding model's token limit.
const EMBED_MAX_BYTES: usize = 8_000;

/// [`Ai`] implementation over the OpenAI REST client.
#[derive(Clone)]
pub struct OpenAiBridge {
    client: OpenAIClient,
    embedding_model: String,
}

impl OpenAiBridge {
    /// Wrap an existing client.
    pub fn new(client: OpenAIClient) -> Self {
        Self {
            client,
            embedding_model: "text-embedding-3-small".to_string(),
        }
    }

    /// Create from the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> ModelResult<Self> {
        Ok(Self::new(OpenAIClient::from_env()?))
    }

    /// Set the embedding model (default: text-embedding-3-small).
    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding_model = model.into();
        self
    }
}

#[async_trait]
impl Ai for OpenAiBridge {
    async fn complete(
        &self,
        system: &str,
        turns: &[ConversationTurn],
        model: &str,
        temperature: f32,
    ) -> ModelResult<String> {
        let messages = std::iter::once(Message::system(system)).chain(turns.iter().map(|t| {
            match t.role {
                Role::User => Message::user(&t.text),
                Role::Assistant => Message::assistant(&t.text),
            }
        }));

        let request = ChatRequest::new(model)
            .messages(messages)
            .temperature(temperature);

        let response = self.client.chat_completion(request).await?;

        debug!(model = %model, chars = response.content.len(), "Chat completion");
        Ok(response.content)
    }

    async fn embed(&self, text: &str) -> ModelResult<Vec<f32>> {
        let input = openai_client::truncate_to_char_boundary(text, EMBED_MAX_BYTES);
        Ok(self
            .client
            .create_embedding(input, &self.embedding_model)
            .await?)
    }

    async fn embed_batch(&self, texts: &[&str]) -> ModelResult<Vec<Vec<f32>>> {
        let inputs: Vec<&str> = texts
            .iter()
            .map(|t| openai_client::truncate_to_char_boundary(t, EMBED_MAX_BYTES))
            .collect();
        Ok(self
            .client
            .create_embeddings_batch(&inputs, &self.embedding_model)
            .await?)
    }
}
