//! Output module for rendering run results
//!
//! This module handles:
//! - Rendering the JSON response returned to callers
//! - Plain-text summary tables for the terminal
//! - Writing markdown run reports

mod markdown;
mod response;

pub use markdown::{format_markdown_report, generate_markdown_report};
pub use response::{format_summary_table, render_response_json};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to format output: {0}")]
    Format(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
