use crate::model::ResultRecord;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;

/// Search backend producing hits for a query
///
/// Implementations swallow their own failures and return an empty list.
#[async_trait]
pub trait SearchCollector: Send + Sync {
    async fn search(&self, query: &str) -> Vec<ResultRecord>;
}

/// Collector answering from a fixed query → hits table
///
/// Loaded from a JSON object such as
/// `{"Latest news about Acme": [{"href": "https://..."}]}`. Unknown queries
/// yield no hits.
#[derive(Debug, Clone, Default)]
pub struct StaticSearchCollector {
    hits: HashMap<String, Vec<ResultRecord>>,
}

impl StaticSearchCollector {
    pub fn new(hits: HashMap<String, Vec<ResultRecord>>) -> Self {
        Self { hits }
    }

    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn from_path(path: impl AsRef<Path>) -> crate::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Adds hits for a query
    pub fn insert(&mut self, query: impl Into<String>, records: Vec<ResultRecord>) {
        self.hits.entry(query.into()).or_default().extend(records);
    }
}

#[async_trait]
impl SearchCollector for StaticSearchCollector {
    async fn search(&self, query: &str) -> Vec<ResultRecord> {
        let mut records = self.hits.get(query).cloned().unwrap_or_default();
        for record in &mut records {
            record.source_query = query.to_string();
        }
        records
    }
}
