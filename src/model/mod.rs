//! Data model shared by every pipeline stage
//!
//! # Components
//!
//! - `ResultRecord` / `EntityCandidates`: raw search hits and the ordered
//!   entity → records mapping built by the caller
//! - `FetchOutcome`: the single terminal result of fetching one URL
//! - `AttributedRecord`, `ClassificationOutcome`, `EntitySummary`: the records
//!   that flow from attribution to aggregation
//! - `Sentiment`: the three-way sentiment label and its score mapping
//! - `AnalysisRequest` / `AnalysisResponse`: the request and response shapes
//!   exchanged with callers

mod boundary;
mod outcome;
mod record;
mod sentiment;

pub use boundary::{AnalysisRequest, AnalysisResponse, EntityResult};
pub use outcome::{
    AttributedRecord, ClassificationOutcome, EntitySummary, FetchOutcome, FetchStatus,
};
pub use record::{EntityCandidates, EntityId, ResultRecord};
pub use sentiment::{Sentiment, NEGATIVE_THRESHOLD, POSITIVE_THRESHOLD};
