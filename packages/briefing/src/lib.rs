//! News Homepage Briefing Library
//!
//! Fetches a news homepage, extracts readable text and headline links,
//! summarizes it with a language model, and supports follow-up
//! question-answering and English/Chinese translation over that summary.
//!
//! # Design
//!
//! - Noisy HTML becomes a bounded, deduplicated text sample plus headline
//!   candidates, so prompt cost is fixed regardless of page size
//! - Summaries are structured records carrying their detected language and
//!   on-demand translations; the original is stored exactly once
//! - Follow-up answering is retrieval-augmented: the summary is chunked,
//!   embedded, and queried per question, with full conversation memory
//! - Failures are typed (`FetchError` / `ParseError` / `ModelError`); the
//!   marker-string convention survives only as an explicit lossy helper
//!
//! # Usage
//!
//! ```rust,ignore
//! use briefing::{Briefing, Language};
//!
//! let briefing = Briefing::from_env()?;
//!
//! let mut record = briefing.summarize("https://www.example-news.com", "gpt-4o-mini").await?;
//! let chinese = briefing.translated(&mut record, Language::Zh, "gpt-4o-mini").await?;
//!
//! let mut session = briefing.open_session(&record, "gpt-4o-mini").await?;
//! let answer = session.ask("What are the main economic stories?").await?;
//! ```
//!
//! # Modules
//!
//! - [`fetch`] - page fetching behind the `Fetcher` trait
//! - [`extract`] - text sample and headline-link extraction
//! - [`summarize`] / [`translate`] - model-backed summary and translation
//! - [`session`] - retrieval-augmented conversation sessions
//! - [`testing`] - mock implementations for tests

pub mod ai;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod language;
pub mod pipeline;
pub mod prompts;
pub mod session;
pub mod summarize;
pub mod testing;
pub mod translate;
pub mod types;

// Re-export the caller-facing surface at the crate root
pub use ai::{Ai, OpenAiBridge};
pub use pipeline::Briefing;
pub use error::{
    AskError, BriefingError, ExtractError, FetchError, ModelError, ParseError, Result,
};
pub use extract::{extract, PageExtract};
pub use fetch::{Fetcher, HttpFetcher};
pub use language::detect_language;
pub use session::{Session, SessionState};
pub use summarize::summarize;
pub use translate::translate;
pub use types::{
    ConversationTurn, HeadlineLink, Language, Role, SummaryRecord, FAILURE_MARKER,
};
