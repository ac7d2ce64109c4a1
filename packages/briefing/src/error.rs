//! Typed errors for the briefing library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. Each pipeline stage has its
//! own error kind; `BriefingError` is the composite the facade returns.

use thiserror::Error;

/// Errors from fetching a page over HTTP.
#[derive(Debug, Error)]
pub enum FetchError {
    /// URL could not be parsed
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// Server answered with a non-2xx status
    #[error("HTTP {status} fetching: {url}")]
    Status { status: u16, url: String },

    /// Request exceeded the fetch timeout
    #[error("timeout fetching: {url}")]
    Timeout { url: String },

    /// Network-level failure (connection, DNS, TLS)
    #[error("network error fetching {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Errors from turning fetched markup into a text sample.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Document produced no visible text worth summarizing
    #[error("no readable content in document")]
    EmptyDocument,
}

/// Errors from the language model API.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The OpenAI client reported a failure (network, rate limit, bad response)
    #[error("model API error: {0}")]
    Api(#[from] openai_client::OpenAIError),

    /// The model answered but the content was unusable
    #[error("malformed model response: {0}")]
    Malformed(String),

    /// Failure from a non-API model backend (used by test doubles)
    #[error("model call failed: {0}")]
    Other(String),
}

/// Errors from the extraction stage (fetch + parse).
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Errors from a conversation session.
#[derive(Debug, Error)]
pub enum AskError {
    /// `ask` was called after `close`
    #[error("session is closed")]
    Closed,

    /// The model call behind the answer failed; no turns were recorded
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Composite error for the caller-facing pipeline.
#[derive(Debug, Error)]
pub enum BriefingError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("extraction failed: {0}")]
    Parse(#[from] ParseError),

    #[error("model failed: {0}")]
    Model(#[from] ModelError),
}

impl From<ExtractError> for BriefingError {
    fn from(e: ExtractError) -> Self {
        match e {
            ExtractError::Fetch(e) => BriefingError::Fetch(e),
            ExtractError::Parse(e) => BriefingError::Parse(e),
        }
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, BriefingError>;

/// Result type alias for extraction operations.
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

/// Result type alias for model operations.
pub type ModelResult<T> = std::result::Result<T, ModelError>;
