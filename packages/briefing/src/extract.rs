//! Homepage extraction: bounded text sample + candidate headline links.
//!
//! News homepages are mostly boilerplate. This module turns raw markup into
//! two things the summarizer can afford to put in a prompt:
//!
//! - a deduplicated text sample capped at [`MAX_SAMPLE_LINES`] lines, and
//! - at most [`MAX_LINKS`] headline-link candidates in document order.
//!
//! Link extraction runs on the raw HTML before tag stripping, because on
//! some pages the interesting anchors live inside elements the text pass
//! removes.

use tracing::{debug, info};
use url::Url;

use crate::error::{ExtractResult, FetchError, ParseError};
use crate::fetch::Fetcher;
use crate::types::HeadlineLink;

/// Lines shorter than this are labels and buttons, not content.
pub const MIN_LINE_CHARS: usize = 30;

/// Cap on the text sample, keeping the prompt payload cost-bounded
/// regardless of page size.
pub const MAX_SAMPLE_LINES: usize = 80;

/// Anchor text shorter than this is navigation, not a headline.
pub const MIN_LINK_TEXT_CHARS: usize = 20;

/// Cap on headline-link candidates.
pub const MAX_LINKS: usize = 30;

/// Navigational phrases that disqualify an anchor, matched case-insensitively
/// against the anchor text.
const NAV_BLOCKLIST: &[&str] = &["login", "sign in", "subscribe", "contact", "about", "menu"];

/// The extractor's output: what the summarizer gets to see.
#[derive(Debug, Clone)]
pub struct PageExtract {
    /// Deduplicated, bounded sample of the page's visible text
    pub sample_text: String,

    /// Candidate headline links in document order
    pub links: Vec<HeadlineLink>,
}

/// Fetch `url` and extract a text sample plus headline-link candidates.
///
/// Fetch failures and unreadable markup surface as [`ExtractError`]
/// variants; nothing is retried here.
///
/// [`ExtractError`]: crate::error::ExtractError
pub async fn extract<F: Fetcher>(fetcher: &F, url: &str) -> ExtractResult<PageExtract> {
    let base = Url::parse(url).map_err(|_| FetchError::InvalidUrl {
        url: url.to_string(),
    })?;

    let html = fetcher.fetch(url).await?;

    // Links first: they may live inside elements the text pass strips.
    let links = extract_links(&base, &html);
    let sample_text = extract_sample(&html)?;

    info!(
        url = %url,
        sample_lines = sample_text.lines().count(),
        link_count = links.len(),
        "Page extracted"
    );

    Ok(PageExtract { sample_text, links })
}

/// Extract headline-link candidates from raw HTML.
///
/// Keeps anchors whose visible text is at least [`MIN_LINK_TEXT_CHARS`]
/// characters and not a navigational phrase, resolving relative hrefs
/// against `base`. Candidates stay in document order; first-found wins up
/// to [`MAX_LINKS`].
pub fn extract_links(base: &Url, html: &str) -> Vec<HeadlineLink> {
    let anchor_pattern =
        regex::Regex::new(r#"(?is)<a\b[^>]*?href\s*=\s*["']([^"']+)["'][^>]*>(.*?)</a>"#).unwrap();
    let tag_pattern = regex::Regex::new(r"<[^>]+>").unwrap();

    let mut links = Vec::new();

    for cap in anchor_pattern.captures_iter(html) {
        if links.len() >= MAX_LINKS {
            break;
        }

        let href = cap.get(1).map(|m| m.as_str()).unwrap_or("");
        let inner = cap.get(2).map(|m| m.as_str()).unwrap_or("");

        // Skip anchors, javascript, mailto, tel
        if href.is_empty()
            || href.starts_with('#')
            || href.starts_with("javascript:")
            || href.starts_with("mailto:")
            || href.starts_with("tel:")
        {
            continue;
        }

        // Visible text: inner markup stripped, whitespace collapsed
        let text = decode_entities(&tag_pattern.replace_all(inner, " "));
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");

        if text.chars().count() < MIN_LINK_TEXT_CHARS {
            continue;
        }

        let lowered = text.to_lowercase();
        if NAV_BLOCKLIST.iter().any(|phrase| lowered.contains(phrase)) {
            continue;
        }

        let Ok(resolved) = base.join(href) else {
            continue;
        };

        links.push(HeadlineLink::new(text, resolved.to_string()));
    }

    debug!(link_count = links.len(), "Extracted headline links");
    links
}

/// Extract a bounded text sample from HTML.
///
/// Strips non-content elements, splits the visible text into lines, keeps
/// lines longer than [`MIN_LINE_CHARS`] characters, deduplicates while
/// preserving document order, and truncates to [`MAX_SAMPLE_LINES`] lines.
pub fn extract_sample(html: &str) -> Result<String, ParseError> {
    // Drop non-content elements wholesale before text extraction. One
    // pattern per element type: the regex crate has no backreferences, so a
    // combined alternation could pair an opening tag with the wrong closer.
    let mut text = html.to_string();
    for tag in ["script", "style", "noscript", "nav", "footer", "form"] {
        let block_pattern =
            regex::Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}>")).unwrap();
        text = block_pattern.replace_all(&text, "\n").to_string();
    }

    let img_pattern = regex::Regex::new(r"(?i)<img\b[^>]*>").unwrap();
    let tag_pattern = regex::Regex::new(r"<[^>]+>").unwrap();

    let text = img_pattern.replace_all(&text, "");
    // Tags become line separators so adjacent text nodes stay distinct lines
    let text = tag_pattern.replace_all(&text, "\n");
    let text = decode_entities(&text);

    let mut seen = std::collections::HashSet::new();
    let mut lines = Vec::new();

    for line in text.lines() {
        if lines.len() >= MAX_SAMPLE_LINES {
            break;
        }
        let line = line.trim();
        if line.chars().count() <= MIN_LINE_CHARS {
            continue;
        }
        if seen.insert(line.to_string()) {
            lines.push(line);
        }
    }

    if lines.is_empty() {
        return Err(ParseError::EmptyDocument);
    }

    Ok(lines.join("\n"))
}

/// Decode the handful of HTML entities that matter for news text.
///
/// `&amp;` goes last so escaped entities like `&amp;lt;` decode once, to
/// the literal `&lt;`, instead of twice.
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
