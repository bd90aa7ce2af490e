use crate::classify::{ClassificationError, SentimentClassifier};
use crate::model::{AttributedRecord, ClassificationOutcome};
use crate::pool::{WorkHandle, WorkerPool};
use std::sync::Arc;

/// Outcomes of one classification batch
#[derive(Debug, Clone, Default)]
pub struct DispatchReport {
    /// Outcomes of the units that succeeded, in submission order
    pub outcomes: Vec<ClassificationOutcome>,
    /// Number of units that failed or panicked
    pub failed: usize,
}

/// Fans attributed records out to the worker pool for classification
#[derive(Clone)]
pub struct ClassificationDispatcher {
    pool: WorkerPool,
    classifier: Arc<dyn SentimentClassifier>,
}

impl ClassificationDispatcher {
    pub fn new(pool: WorkerPool, classifier: Arc<dyn SentimentClassifier>) -> Self {
        Self { pool, classifier }
    }

    /// Starts classifying one record and returns right away
    ///
    /// The unit runs as soon as a worker is free. Pass the returned handles
    /// to [`finish`](Self::finish) to settle them.
    pub fn submit(&self, record: AttributedRecord) -> PendingClassification {
        let url = record.url.clone();
        let classifier = Arc::clone(&self.classifier);

        let handle = self.pool.submit(move || {
            let classification = classifier.classify(&record.classifier_input())?;
            Ok::<_, ClassificationError>(ClassificationOutcome {
                entity_id: record.entity_id,
                url: record.url,
                title: record.title,
                content: record.content,
                sentiment: classification.label,
                negative_flag: classification.negative_flag,
            })
        });

        PendingClassification { url, handle }
    }

    /// Waits for every submitted unit and collects the successes
    ///
    /// A unit that fails is logged and left out of the report; it never
    /// affects its siblings or the caller.
    pub async fn finish(&self, pending: Vec<PendingClassification>) -> DispatchReport {
        let (urls, handles): (Vec<_>, Vec<_>) =
            pending.into_iter().map(|p| (p.url, p.handle)).unzip();

        let mut report = DispatchReport::default();
        for (url, result) in urls.into_iter().zip(WorkerPool::await_all(handles).await) {
            match result {
                Ok(outcome) => report.outcomes.push(outcome),
                Err(e) => {
                    tracing::warn!("Classification failed for {}: {}", url, e);
                    report.failed += 1;
                }
            }
        }

        tracing::debug!(
            "Classified {} records ({} failed)",
            report.outcomes.len(),
            report.failed
        );
        report
    }

    /// Classifies every record and waits for the whole batch
    pub async fn classify_batch(&self, records: Vec<AttributedRecord>) -> DispatchReport {
        let pending = records.into_iter().map(|r| self.submit(r)).collect();
        self.finish(pending).await
    }
}

/// A classification unit that has been handed to the pool
#[derive(Debug)]
pub struct PendingClassification {
    url: String,
    handle: WorkHandle<ClassificationOutcome, ClassificationError>,
}
