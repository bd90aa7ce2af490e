//! Readable-text extraction for fetched pages
//!
//! This module turns a raw HTML body into:
//! - The page title (from the <title> tag)
//! - The readable text of the page, whitespace-normalized
//!
//! Extraction is CPU-bound and runs on the worker pool, never on the async
//! scheduler.

use scraper::{Html, Node, Selector};
use thiserror::Error;

/// Title used when a page has no usable <title>
pub const NO_TITLE: &str = "No title";

/// Elements whose text is never part of the readable content
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Malformed or unusable page content
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("empty response body")]
    EmptyBody,

    #[error("response body is binary")]
    Binary,

    #[error("no readable text on page")]
    NoReadableText,
}

/// Title and readable text of one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPage {
    pub title: String,
    pub content: String,
}

/// Turns a raw body into readable text
///
/// Implementations are called from worker threads and must be cheap to share.
pub trait ContentExtractor: Send + Sync {
    fn extract(&self, url: &str, body: &str) -> Result<ExtractedPage, ExtractError>;
}

/// HTML readability extractor built on `scraper`
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlExtractor;

impl ContentExtractor for HtmlExtractor {
    fn extract(&self, _url: &str, body: &str) -> Result<ExtractedPage, ExtractError> {
        extract_page(body)
    }
}

/// Extracts the title and readable text from an HTML document
///
/// # Rules
///
/// - Text inside `script`, `style`, `noscript` and `template` is ignored
/// - Text is split into lines, each line is trimmed and split on double
///   spaces into phrases; empty phrases are dropped and the rest are joined
///   with single spaces
/// - A missing or blank <title> becomes [`NO_TITLE`]
///
/// # Returns
///
/// * `Ok(ExtractedPage)` - Page with non-empty content
/// * `Err(ExtractError)` - Empty body, binary body, or no readable text
///
/// # Example
///
/// ```
/// use newsflag::crawler::extract_page;
///
/// let html = r#"<html><head><title>Acme</title></head><body><p>Acme grows</p></body></html>"#;
/// let page = extract_page(html).unwrap();
/// assert_eq!(page.title, "Acme");
/// assert!(page.content.contains("Acme grows"));
/// ```
pub fn extract_page(body: &str) -> Result<ExtractedPage, ExtractError> {
    if body.trim().is_empty() {
        return Err(ExtractError::EmptyBody);
    }
    if body.contains('\0') {
        return Err(ExtractError::Binary);
    }

    let document = Html::parse_document(body);
    let content = normalize_text(&collect_text(&document));
    if content.is_empty() {
        return Err(ExtractError::NoReadableText);
    }

    let title = extract_title(&document).unwrap_or_else(|| NO_TITLE.to_string());
    Ok(ExtractedPage { title, content })
}

fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Collects every visible text node, one per line
fn collect_text(document: &Html) -> String {
    let mut text = String::new();

    for node in document.root_element().descendants() {
        let Node::Text(fragment) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map_or(false, |el| SKIPPED_ELEMENTS.contains(&el.name()))
        });
        if hidden {
            continue;
        }

        text.push_str(fragment);
        text.push('\n');
    }

    text
}

/// Collapses raw page text into a single line of phrases
fn normalize_text(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .flat_map(|line| line.split("  "))
        .map(str::trim)
        .filter(|phrase| !phrase.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
