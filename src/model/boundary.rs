use crate::model::outcome::EntitySummary;
use crate::model::sentiment::Sentiment;
use serde::{Deserialize, Serialize};

/// Incoming analysis request: a person and the company they are known for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub name: String,
    pub company: String,
}

/// One entity line of the response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityResult {
    pub name: String,
    pub average_sentiment: Sentiment,
    pub negative_news_flag: bool,
    pub total_articles: usize,
}

impl From<&EntitySummary> for EntityResult {
    fn from(summary: &EntitySummary) -> Self {
        Self {
            name: summary.entity_id.to_string(),
            average_sentiment: summary.average_sentiment,
            negative_news_flag: summary.negative_flag,
            total_articles: summary.article_count,
        }
    }
}

/// Response body; an empty `result` list when nothing could be summarized
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub result: Vec<EntityResult>,
}

impl AnalysisResponse {
    pub fn from_summaries(summaries: &[EntitySummary]) -> Self {
        Self {
            result: summaries.iter().map(EntityResult::from).collect(),
        }
    }
}
