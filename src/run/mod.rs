//! End-to-end analysis run
//!
//! A run owns everything for one request: it builds the attribution index,
//! streams every candidate URL, attributes and classifies the pages, and
//! aggregates the result. Nothing is kept once the report is returned.

mod stats;

pub use stats::{print_statistics, RunStats};

use crate::aggregate::summarize;
use crate::attribution::AttributionIndex;
use crate::classify::{ClassificationDispatcher, SentimentClassifier};
use crate::config::Config;
use crate::crawler::StreamingPipeline;
use crate::discovery::EntityDiscovery;
use crate::model::{
    AnalysisRequest, AnalysisResponse, ClassificationOutcome, EntityCandidates, EntityId,
    EntitySummary,
};
use crate::pool::WorkerPool;
use chrono::Utc;
use futures::StreamExt;
use std::sync::Arc;

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Per-entity summaries in first-seen order
    pub summaries: Vec<EntitySummary>,

    /// Every successful classification, for reporting
    pub outcomes: Vec<ClassificationOutcome>,

    /// Entities that were registered, in registration order
    pub entities: Vec<EntityId>,

    pub stats: RunStats,
}

impl RunReport {
    /// Registered entities that ended up with no classified article
    pub fn entities_without_articles(&self) -> Vec<&EntityId> {
        self.entities
            .iter()
            .filter(|id| !self.summaries.iter().any(|s| &s.entity_id == *id))
            .collect()
    }

    pub fn response(&self) -> AnalysisResponse {
        AnalysisResponse::from_summaries(&self.summaries)
    }
}

/// Pipeline + dispatcher pair driving one run at a time
///
/// Both stages share the same worker pool. A run can be executed any number
/// of times; each execution is independent.
#[derive(Clone)]
pub struct AnalysisRun {
    pipeline: StreamingPipeline,
    dispatcher: ClassificationDispatcher,
}

impl AnalysisRun {
    pub fn new(pipeline: StreamingPipeline, dispatcher: ClassificationDispatcher) -> Self {
        Self {
            pipeline,
            dispatcher,
        }
    }

    /// Builds the production run from configuration
    ///
    /// # Arguments
    ///
    /// * `config` - The loaded configuration
    /// * `pool` - The process-wide worker pool
    /// * `classifier` - The sentiment classifier, constructed once at startup
    pub fn from_config(
        config: &Config,
        pool: WorkerPool,
        classifier: Arc<dyn SentimentClassifier>,
    ) -> crate::Result<Self> {
        let pipeline = StreamingPipeline::from_config(config, pool.clone())?;
        let dispatcher = ClassificationDispatcher::new(pool, classifier);
        Ok(Self::new(pipeline, dispatcher))
    }

    /// Fetches, attributes, classifies and aggregates every candidate
    ///
    /// Never fails: per-URL and per-record failures only show up in the
    /// statistics, and the worst case is an empty summary list.
    pub async fn execute(&self, candidates: &EntityCandidates) -> RunReport {
        let mut stats = RunStats::new(Utc::now());
        let index = AttributionIndex::build(candidates);

        let urls = index.candidate_urls().to_vec();
        stats.urls_total = urls.len();
        tracing::info!("Found {} news articles to scrape", urls.len());

        // Classification starts as soon as a page is attributed, while the
        // remaining fetches are still in flight
        let mut pending = Vec::new();
        let mut outcomes = self.pipeline.stream(urls);
        while let Some(outcome) = outcomes.next().await {
            if !outcome.is_success() {
                stats.fetch_failed += 1;
                continue;
            }
            stats.fetched_ok += 1;

            match index.attribute(&outcome) {
                Some(record) => pending.push(self.dispatcher.submit(record)),
                None => {
                    tracing::debug!("No entity owns {}, dropping", outcome.url);
                    stats.unattributed += 1;
                }
            }
        }
        stats.attributed = pending.len();

        tracing::info!("Waiting on {} article classifications", pending.len());
        let dispatch = self.dispatcher.finish(pending).await;
        stats.classified = dispatch.outcomes.len();
        stats.classification_failed = dispatch.failed;

        let summaries = summarize(&dispatch.outcomes);
        stats.finished_at = Utc::now();
        tracing::info!(
            "Run complete: {} entities summarized in {:.2}s",
            summaries.len(),
            stats.duration_seconds()
        );

        RunReport {
            summaries,
            outcomes: dispatch.outcomes,
            entities: index.entities().to_vec(),
            stats,
        }
    }

    /// Discovers the entities for `request`, then executes the run
    pub async fn analyze(&self, discovery: &EntityDiscovery, request: &AnalysisRequest) -> RunReport {
        let candidates = discovery.discover(request).await;
        self.execute(&candidates).await
    }
}
