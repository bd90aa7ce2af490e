//! Newsflag: per-entity news sentiment and negative-news flagging
//!
//! This crate turns candidate web URLs into per-entity sentiment summaries.
//! Pages are fetched concurrently, their readable text is extracted on a
//! bounded worker pool, each page is attributed back to the entity that
//! requested it, classified, and finally aggregated per entity.

pub mod aggregate;
pub mod attribution;
pub mod classify;
pub mod config;
pub mod crawler;
pub mod discovery;
pub mod model;
pub mod output;
pub mod pool;
pub mod run;

use thiserror::Error;

/// Main error type for Newsflag operations
///
/// Only setup and I/O around a run can fail. Per-URL and per-record failures
/// are reported as outcomes and never surface through this type.
#[derive(Debug, Error)]
pub enum NewsflagError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Newsflag operations
pub type Result<T> = std::result::Result<T, NewsflagError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use aggregate::summarize;
pub use attribution::AttributionIndex;
pub use classify::{ClassificationDispatcher, LexiconClassifier, SentimentClassifier};
pub use config::Config;
pub use crawler::StreamingPipeline;
pub use discovery::{EntityDiscovery, EntityExtractor, SearchCollector, StaticSearchCollector};
pub use model::{
    AnalysisRequest, AnalysisResponse, AttributedRecord, ClassificationOutcome, EntityCandidates,
    EntityId, EntitySummary, FetchOutcome, ResultRecord, Sentiment,
};
pub use pool::WorkerPool;
pub use run::{AnalysisRun, RunReport};
