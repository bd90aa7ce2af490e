//! Streaming fetch-and-extract pipeline
//!
//! Every submitted URL becomes its own task: fetch with a per-URL timeout,
//! then hand the body to the shared worker pool for extraction. Outcomes are
//! yielded in completion order, exactly one per submitted URL.

use crate::config::Config;
use crate::crawler::extract::{ContentExtractor, ExtractError, ExtractedPage, HtmlExtractor};
use crate::crawler::fetcher::{FetchError, HttpFetcher, PageFetcher};
use crate::model::FetchOutcome;
use crate::pool::{PoolError, WorkerPool};
use futures::stream::{self, BoxStream, StreamExt};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// Stream of outcomes, in completion order
pub type OutcomeStream = BoxStream<'static, FetchOutcome>;

/// Why a single URL failed
#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Extraction failed: {0}")]
    Extract(#[from] ExtractError),

    #[error("Extraction worker failed: {0}")]
    Worker(String),
}

impl From<PoolError<ExtractError>> for PageError {
    fn from(err: PoolError<ExtractError>) -> Self {
        match err {
            PoolError::Unit(e) => PageError::Extract(e),
            other => PageError::Worker(other.to_string()),
        }
    }
}

/// Concurrent fetch + extract pipeline
///
/// Cheap to clone; clones share the fetcher, extractor, worker pool and fetch
/// limit.
#[derive(Clone)]
pub struct StreamingPipeline {
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn ContentExtractor>,
    pool: WorkerPool,
    fetch_timeout: Duration,
    fetch_limit: Option<Arc<Semaphore>>,
}

impl StreamingPipeline {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        extractor: Arc<dyn ContentExtractor>,
        pool: WorkerPool,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            pool,
            fetch_timeout,
            fetch_limit: None,
        }
    }

    /// Builds the production pipeline: HTTP fetcher and HTML extractor
    ///
    /// # Arguments
    ///
    /// * `config` - Supplies the user agent, fetch timeout and fetch limit
    /// * `pool` - The shared worker pool
    pub fn from_config(config: &Config, pool: WorkerPool) -> crate::Result<Self> {
        let timeout = Duration::from_secs(config.pipeline.fetch_timeout_secs);
        let fetcher = HttpFetcher::new(&config.user_agent, timeout)?;

        Ok(Self::new(Arc::new(fetcher), Arc::new(HtmlExtractor), pool, timeout)
            .with_fetch_limit(config.pipeline.max_in_flight_fetches as usize))
    }

    /// Caps the number of concurrent network fetches; 0 means unbounded
    pub fn with_fetch_limit(mut self, limit: usize) -> Self {
        self.fetch_limit = (limit > 0).then(|| Arc::new(Semaphore::new(limit)));
        self
    }

    /// Starts processing `urls` and returns their outcomes as they complete
    ///
    /// Must be called from within a tokio runtime. Every URL is spawned right
    /// away, so work progresses even while the consumer is busy. Duplicate
    /// URLs are processed independently. Dropping the stream aborts every
    /// fetch still in flight.
    pub fn stream<I>(&self, urls: I) -> OutcomeStream
    where
        I: IntoIterator<Item = String>,
    {
        let mut tasks = JoinSet::new();
        for url in urls {
            let pipeline = self.clone();
            tasks.spawn(async move { pipeline.process(url).await });
        }

        tracing::debug!("Pipeline started with {} URLs", tasks.len());

        stream::unfold(tasks, |mut tasks| async move {
            loop {
                match tasks.join_next().await? {
                    Ok(outcome) => return Some((outcome, tasks)),
                    // Only reachable if a task was aborted from outside
                    Err(e) => tracing::error!("Pipeline task ended abnormally: {}", e),
                }
            }
        })
        .boxed()
    }

    /// Runs `urls` to completion and collects every outcome
    pub async fn collect<I>(&self, urls: I) -> Vec<FetchOutcome>
    where
        I: IntoIterator<Item = String>,
    {
        self.stream(urls).collect().await
    }

    async fn process(self, url: String) -> FetchOutcome {
        let result = AssertUnwindSafe(self.fetch_and_extract(&url))
            .catch_unwind()
            .await;

        match result {
            Ok(Ok(page)) => {
                tracing::debug!("Fetched {} ({} chars)", url, page.content.len());
                FetchOutcome::success(url, page.title, page.content)
            }
            Ok(Err(e)) => {
                tracing::debug!("Failed {}: {}", url, e);
                FetchOutcome::failed(url, e.to_string())
            }
            Err(_) => {
                tracing::warn!("Fetch task for {} panicked", url);
                FetchOutcome::failed(url, "fetch task panicked")
            }
        }
    }

    async fn fetch_and_extract(&self, url: &str) -> Result<ExtractedPage, PageError> {
        validate_url(url)?;

        let permit = match &self.fetch_limit {
            // The semaphore is never closed, so a failed acquire cannot happen
            Some(limit) => Arc::clone(limit).acquire_owned().await.ok(),
            None => None,
        };

        let page = tokio::time::timeout(self.fetch_timeout, self.fetcher.fetch(url))
            .await
            .map_err(|_| FetchError::Timeout(self.fetch_timeout))??;
        drop(permit);

        if page.final_url != url {
            tracing::debug!("{} redirected to {}", url, page.final_url);
        }

        let extractor = Arc::clone(&self.extractor);
        let owned_url = url.to_string();
        let extracted = self
            .pool
            .submit(move || extractor.extract(&owned_url, &page.body))
            .await?;

        Ok(extracted)
    }
}

fn validate_url(url: &str) -> Result<(), FetchError> {
    let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(FetchError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}
