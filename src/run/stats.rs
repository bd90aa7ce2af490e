//! Run statistics
//!
//! Counters collected while a run streams, attributes and classifies pages.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Counters for one analysis run
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    /// Candidate URLs handed to the pipeline, duplicates included
    pub urls_total: usize,

    /// Outcomes that carried extracted content
    pub fetched_ok: usize,

    /// Outcomes that failed to fetch or extract
    pub fetch_failed: usize,

    /// Successful pages matched to an entity
    pub attributed: usize,

    /// Successful pages no entity registered
    pub unattributed: usize,

    /// Records that produced a classification outcome
    pub classified: usize,

    /// Records whose classification unit failed
    pub classification_failed: usize,
}

impl RunStats {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            finished_at: started_at,
            urls_total: 0,
            fetched_ok: 0,
            fetch_failed: 0,
            attributed: 0,
            unattributed: 0,
            classified: 0,
            classification_failed: 0,
        }
    }

    /// Wall-clock duration of the run in seconds
    pub fn duration_seconds(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }

    /// Share of URLs that were fetched and extracted, as a percentage
    pub fn fetch_success_rate(&self) -> f64 {
        if self.urls_total == 0 {
            0.0
        } else {
            (self.fetched_ok as f64 / self.urls_total as f64) * 100.0
        }
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &RunStats) {
    println!("=== Run Statistics ===\n");

    println!("Fetching:");
    println!("  Candidate URLs: {}", stats.urls_total);
    println!("  Fetched: {}", stats.fetched_ok);
    println!("  Failed: {}", stats.fetch_failed);
    println!("  Success rate: {:.1}%", stats.fetch_success_rate());
    println!();

    println!("Attribution:");
    println!("  Attributed: {}", stats.attributed);
    println!("  Unattributed: {}", stats.unattributed);
    println!();

    println!("Classification:");
    println!("  Classified: {}", stats.classified);
    println!("  Failed: {}", stats.classification_failed);
    println!();

    println!("Duration: {:.2}s", stats.duration_seconds());
}
