use crate::model::record::EntityId;
use crate::model::sentiment::Sentiment;
use serde::Serialize;

/// Terminal result of fetching and extracting one URL
///
/// Exactly one is produced per submitted URL. A successful outcome always
/// carries extracted content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchOutcome {
    /// The URL exactly as it was submitted
    pub url: String,

    #[serde(flatten)]
    pub status: FetchStatus,
}

/// Success or failure of a single fetch
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FetchStatus {
    Success { title: String, content: String },
    Failed { error: String },
}

impl FetchOutcome {
    pub fn success(url: impl Into<String>, title: String, content: String) -> Self {
        Self {
            url: url.into(),
            status: FetchStatus::Success { title, content },
        }
    }

    pub fn failed(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status: FetchStatus::Failed {
                error: error.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, FetchStatus::Success { .. })
    }

    pub fn title(&self) -> Option<&str> {
        match &self.status {
            FetchStatus::Success { title, .. } => Some(title),
            FetchStatus::Failed { .. } => None,
        }
    }

    pub fn content(&self) -> Option<&str> {
        match &self.status {
            FetchStatus::Success { content, .. } => Some(content),
            FetchStatus::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            FetchStatus::Failed { error } => Some(error),
            FetchStatus::Success { .. } => None,
        }
    }
}

/// A successfully fetched page tagged with the entity that owns it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributedRecord {
    pub url: String,
    pub entity_id: EntityId,
    pub title: String,
    pub content: String,
}

impl AttributedRecord {
    /// Text handed to the classifier: `"{title}. {content}"`, or just the
    /// content when the title is empty
    pub fn classifier_input(&self) -> String {
        if self.title.is_empty() {
            self.content.clone()
        } else {
            format!("{}. {}", self.title, self.content)
        }
    }
}

/// Sentiment result for one attributed record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationOutcome {
    pub entity_id: EntityId,
    pub url: String,
    pub title: String,
    pub content: String,
    pub sentiment: Sentiment,
    /// Keyword heuristic result, independent of `sentiment`
    pub negative_flag: bool,
}

impl ClassificationOutcome {
    pub fn sentiment_score(&self) -> i8 {
        self.sentiment.score()
    }
}

/// Aggregate sentiment for one entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitySummary {
    pub entity_id: EntityId,
    /// Label derived from `mean_score` via the threshold mapping
    pub average_sentiment: Sentiment,
    /// Arithmetic mean of the per-record scores
    pub mean_score: f64,
    pub negative_flag: bool,
    pub article_count: usize,
}
