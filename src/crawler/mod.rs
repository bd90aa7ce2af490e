//! Crawler module for page fetching and text extraction
//!
//! This module contains the fetch side of the pipeline, including:
//! - HTTP fetching with per-URL timeouts
//! - HTML readability extraction on the worker pool
//! - The streaming pipeline that ties both together

mod extract;
mod fetcher;
mod pipeline;

pub use extract::{
    extract_page, ContentExtractor, ExtractError, ExtractedPage, HtmlExtractor, NO_TITLE,
};
pub use fetcher::{build_http_client, is_textual, FetchError, FetchedPage, HttpFetcher, PageFetcher};
pub use pipeline::{OutcomeStream, PageError, StreamingPipeline};
