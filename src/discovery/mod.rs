//! Entity discovery
//!
//! Turns an [`AnalysisRequest`] into the ordered entity → records mapping the
//! analysis run consumes:
//!
//! 1. Search the initial queries and stream every hit through the pipeline
//! 2. Ask the entity extractor for names found in each fetched page
//! 3. Ask the extractor to deduplicate the merged names
//! 4. Search the follow-up news queries for every entity

mod collector;
mod protocol;
mod queries;

pub use collector::{SearchCollector, StaticSearchCollector};
pub use protocol::{parse_entity_reply, MAX_NAME_CHARS, NO_ENTITIES};
pub use queries::{follow_up_queries, initial_queries};

use crate::crawler::StreamingPipeline;
use crate::model::{AnalysisRequest, EntityCandidates};
use async_trait::async_trait;
use futures::StreamExt;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;

/// Context handed to the extractor when deduplicating
pub const DEDUPLICATE_CONTEXT: &str = "give me unique company names from the list";

#[derive(Debug, Error)]
#[error("entity extractor failed: {0}")]
pub struct ExtractorError(pub String);

/// Text-protocol capability that names the entities in a text
///
/// Replies are either a comma-separated list of names or [`NO_ENTITIES`].
#[async_trait]
pub trait EntityExtractor: Send + Sync {
    /// Names the entities in `text` that relate to `context`
    async fn extract(&self, context: &str, text: &str) -> Result<String, ExtractorError>;

    /// Cleans up a comma-separated list of names
    async fn deduplicate(&self, context: &str, names: &str) -> Result<String, ExtractorError>;
}

/// Drives search, fetching and entity extraction for one request
#[derive(Clone)]
pub struct EntityDiscovery {
    collector: Arc<dyn SearchCollector>,
    extractor: Arc<dyn EntityExtractor>,
    pipeline: StreamingPipeline,
}

impl EntityDiscovery {
    pub fn new(
        collector: Arc<dyn SearchCollector>,
        extractor: Arc<dyn EntityExtractor>,
        pipeline: StreamingPipeline,
    ) -> Self {
        Self {
            collector,
            extractor,
            pipeline,
        }
    }

    /// Runs every discovery step for `request`
    pub async fn discover(&self, request: &AnalysisRequest) -> EntityCandidates {
        tracing::info!(
            "Discovering entities for {} ({})",
            request.name,
            request.company
        );

        let queries = initial_queries(request);
        let mut urls = Vec::new();
        for query in &queries {
            let hits = self.collector.search(query).await;
            urls.extend(
                hits.iter()
                    .filter_map(|hit| hit.normalized_link())
                    .map(str::to_string),
            );
        }
        tracing::info!("Found {} URLs to scrape for entity discovery", urls.len());

        let entities = self.find_entities(&queries.join("; "), urls).await;
        self.collect_candidates(&entities).await
    }

    /// Fetches `urls` and returns the deduplicated entity names found in them
    pub async fn find_entities(&self, context: &str, urls: Vec<String>) -> Vec<String> {
        let mut names = BTreeSet::new();

        let mut outcomes = self.pipeline.stream(urls);
        while let Some(outcome) = outcomes.next().await {
            let Some(content) = outcome.content() else {
                continue;
            };

            match self.extractor.extract(context, content).await {
                Ok(reply) => names.extend(parse_entity_reply(&reply)),
                Err(e) => tracing::warn!("Entity extraction failed for {}: {}", outcome.url, e),
            }
        }

        if names.is_empty() {
            tracing::info!("No entities found");
            return Vec::new();
        }

        let merged = names.into_iter().collect::<Vec<_>>().join(", ");
        let reply = match self.extractor.deduplicate(DEDUPLICATE_CONTEXT, &merged).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!("Entity deduplication failed, keeping merged list: {}", e);
                merged
            }
        };

        parse_entity_reply(&reply)
    }

    /// Searches the follow-up queries for every entity, in order
    pub async fn collect_candidates(&self, entities: &[String]) -> EntityCandidates {
        let mut candidates = EntityCandidates::new();

        for entity in entities {
            tracing::info!("Found entity: {}", entity);
            let mut records = Vec::new();
            for query in follow_up_queries(entity) {
                let mut hits = self.collector.search(&query).await;
                for hit in &mut hits {
                    hit.source_query = query.clone();
                }
                records.extend(hits);
            }
            candidates.register(entity.as_str(), records);
        }

        tracing::info!(
            "Collected {} news records for {} entities",
            candidates.total_records(),
            candidates.len()
        );
        candidates
    }
}
