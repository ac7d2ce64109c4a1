//! Retrieval-augmented conversation over one summary.
//!
//! A [`Session`] snapshots a summary's content at open time: the text is
//! split into overlapping chunks, each chunk is embedded, and follow-up
//! questions retrieve the nearest chunks to condition the model alongside
//! the full turn history. The index is built once and never mutated; a new
//! summary requires a new session.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::ai::Ai;
use crate::error::{AskError, ModelError, ModelResult};
use crate::prompts::{format_answer_prompt, ANSWER_SYSTEM_PROMPT};
use crate::types::{ConversationTurn, SummaryRecord};

/// Chunk size in characters.
pub const CHUNK_CHARS: usize = 500;

/// Overlap between consecutive chunks, so context straddling a chunk
/// boundary is not lost.
pub const CHUNK_OVERLAP_CHARS: usize = 100;

/// Number of chunks retrieved per question.
pub const RETRIEVAL_TOP_K: usize = 4;

/// Temperature for conversational answers.
pub const ANSWER_TEMPERATURE: f32 = 0.5;

/// Split text into overlapping chunks of `size` characters.
///
/// Boundaries are character indices, never byte offsets, so multi-byte
/// text (Chinese summaries in particular) is split safely.
pub fn split_chunks(text: &str, size: usize, overlap: usize) -> Vec<String> {
    assert!(overlap < size, "overlap must be smaller than chunk size");

    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return Vec::new();
    }

    let step = size - overlap;
    let mut chunks = Vec::new();
    let mut start = 0;

    loop {
        let end = (start + size).min(chars.len());
        chunks.push(chars[start..end].iter().collect());
        if end == chars.len() {
            break;
        }
        start += step;
    }

    chunks
}

/// Cosine similarity between two vectors; 0.0 on dimension mismatch.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

#[derive(Debug, Clone)]
struct IndexedChunk {
    text: String,
    embedding: Vec<f32>,
}

/// Immutable nearest-neighbor index over summary chunks.
///
/// Brute-force cosine scan: the index holds a handful of chunks from one
/// summary, so nothing fancier is warranted. Built once per session,
/// discarded with it.
#[derive(Debug, Default)]
pub struct RetrievalIndex {
    chunks: Vec<IndexedChunk>,
}

impl RetrievalIndex {
    /// Build an index by embedding each chunk.
    pub async fn build<A: Ai>(ai: &A, chunks: Vec<String>) -> ModelResult<Self> {
        let refs: Vec<&str> = chunks.iter().map(String::as_str).collect();
        let embeddings = ai.embed_batch(&refs).await?;

        Ok(Self {
            chunks: chunks
                .into_iter()
                .zip(embeddings)
                .map(|(text, embedding)| IndexedChunk { text, embedding })
                .collect(),
        })
    }

    /// Number of indexed chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// True when nothing was indexed.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// The `k` chunks most similar to `query_embedding`, best first.
    pub fn top_chunks(&self, query_embedding: &[f32], k: usize) -> Vec<&str> {
        let mut scored: Vec<(f32, &str)> = self
            .chunks
            .iter()
            .map(|c| (cosine_similarity(query_embedding, &c.embedding), c.text.as_str()))
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        scored.into_iter().map(|(_, text)| text).collect()
    }
}

/// Session lifecycle.
///
/// `Answering` is only ever observable from inside [`Session::ask`]; the
/// exclusive borrow means callers always see `Ready` or `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Ready,
    Answering,
    Closed,
}

/// A conversation scoped to one summary.
///
/// Holds the retrieval index and the append-only turn history. The session
/// snapshots the summary content at open time; translations added to the
/// record afterwards do not affect it. It is never re-pointed at a
/// different record.
pub struct Session<A: Ai> {
    ai: Arc<A>,
    model: String,
    index: RetrievalIndex,
    history: Vec<ConversationTurn>,
    state: SessionState,
}

impl<A: Ai> Session<A> {
    /// Open a session over `record`, building the retrieval index.
    pub async fn open(
        record: &SummaryRecord,
        model: impl Into<String>,
        ai: Arc<A>,
    ) -> ModelResult<Self> {
        let chunks = split_chunks(&record.content, CHUNK_CHARS, CHUNK_OVERLAP_CHARS);
        let index = RetrievalIndex::build(ai.as_ref(), chunks).await?;

        info!(chunk_count = index.len(), "Conversation session opened");

        Ok(Self {
            ai,
            model: model.into(),
            index,
            history: Vec::new(),
            state: SessionState::Ready,
        })
    }

    /// Answer a follow-up question.
    ///
    /// On success exactly one user turn and one assistant turn are
    /// appended. On failure nothing is appended and the session stays
    /// `Ready`; retry is the caller's decision.
    pub async fn ask(&mut self, question: &str) -> Result<String, AskError> {
        if self.state != SessionState::Ready {
            warn!(state = ?self.state, "ask() on a session that is not ready");
            return Err(AskError::Closed);
        }

        self.state = SessionState::Answering;
        let result = self.answer(question).await;
        self.state = SessionState::Ready;

        let answer = result?;
        self.history.push(ConversationTurn::user(question));
        self.history.push(ConversationTurn::assistant(&answer));
        Ok(answer)
    }

    async fn answer(&self, question: &str) -> Result<String, ModelError> {
        let query_embedding = self.ai.embed(question).await?;
        let excerpts = self.index.top_chunks(&query_embedding, RETRIEVAL_TOP_K);

        debug!(
            excerpt_count = excerpts.len(),
            history_turns = self.history.len(),
            "Answering with retrieved context"
        );

        // Full prior history, then the question with its retrieved context
        let mut turns = self.history.clone();
        turns.push(ConversationTurn::user(format_answer_prompt(
            &excerpts, question,
        )));

        self.ai
            .complete(ANSWER_SYSTEM_PROMPT, &turns, &self.model, ANSWER_TEMPERATURE)
            .await
    }

    /// Close the session, releasing the index and history.
    ///
    /// Terminal: `ask` afterwards returns [`AskError::Closed`].
    pub fn close(&mut self) {
        self.index = RetrievalIndex::default();
        self.history = Vec::new();
        self.state = SessionState::Closed;
        info!("Conversation session closed");
    }

    /// The conversation so far.
    pub fn history(&self) -> &[ConversationTurn] {
        &self.history
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Number of indexed chunks (0 after close).
    pub fn chunk_count(&self) -> usize {
        self.index.len()
    }
}
