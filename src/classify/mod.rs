//! Sentiment classification
//!
//! This module contains:
//! - The [`SentimentClassifier`] capability (text → label + negative flag)
//! - [`LexiconClassifier`], the built-in word-weight implementation
//! - [`ClassificationDispatcher`], which fans records out to the worker pool

mod dispatcher;
mod lexicon;

pub use dispatcher::{ClassificationDispatcher, DispatchReport, PendingClassification};
pub use lexicon::{lexicon_score, LexiconClassifier, LABEL_MARGIN};

use crate::model::Sentiment;
use thiserror::Error;

/// Result of classifying one text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub label: Sentiment,
    /// Keyword heuristic, computed independently of `label`
    pub negative_flag: bool,
}

/// Failure of the classification capability for one text
#[derive(Debug, Error)]
pub enum ClassificationError {
    #[error("nothing to classify")]
    EmptyInput,

    #[error("classifier failed: {0}")]
    Model(String),
}

/// Text → sentiment capability
///
/// Calls are blocking and may be expensive; they always run on the worker
/// pool. Implementations are constructed once and shared across runs.
pub trait SentimentClassifier: Send + Sync {
    fn classify(&self, text: &str) -> Result<Classification, ClassificationError>;
}
