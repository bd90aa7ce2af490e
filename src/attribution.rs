//! URL → entity attribution
//!
//! The index is an immutable snapshot built once per run, before any fetch
//! starts. When the same link was registered under several entities, the
//! first registered entity owns it.

use crate::model::{AttributedRecord, EntityCandidates, EntityId, FetchOutcome, FetchStatus};
use std::collections::HashMap;

/// Read-only lookup from fetched URL to owning entity
#[derive(Debug, Clone, Default)]
pub struct AttributionIndex {
    owners: HashMap<String, EntityId>,
    entities: Vec<EntityId>,
    urls: Vec<String>,
}

impl AttributionIndex {
    /// Builds the index from an ordered entity → records mapping
    ///
    /// Records without any link are skipped.
    pub fn build(candidates: &EntityCandidates) -> Self {
        let mut index = Self::default();

        for (entity, records) in candidates.iter() {
            index.entities.push(entity.clone());

            for link in records.iter().filter_map(|r| r.normalized_link()) {
                index.urls.push(link.to_string());
                index
                    .owners
                    .entry(link.to_string())
                    .or_insert_with(|| entity.clone());
            }
        }

        tracing::debug!(
            "Attribution index built: {} entities, {} unique URLs",
            index.entities.len(),
            index.owners.len()
        );
        index
    }

    /// Returns the entity owning `url`, if any
    ///
    /// Matching is exact: no normalization is applied to `url`.
    pub fn lookup(&self, url: &str) -> Option<&EntityId> {
        self.owners.get(url)
    }

    /// Every candidate link in registration order, duplicates included
    pub fn candidate_urls(&self) -> &[String] {
        &self.urls
    }

    /// Registered entities in registration order
    pub fn entities(&self) -> &[EntityId] {
        &self.entities
    }

    /// Tags a successful outcome with its owning entity
    ///
    /// Failed outcomes and URLs nobody registered yield `None`.
    pub fn attribute(&self, outcome: &FetchOutcome) -> Option<AttributedRecord> {
        let FetchStatus::Success { title, content } = &outcome.status else {
            return None;
        };

        let entity_id = self.lookup(&outcome.url)?;
        Some(AttributedRecord {
            url: outcome.url.clone(),
            entity_id: entity_id.clone(),
            title: title.clone(),
            content: content.clone(),
        })
    }

    /// Number of distinct indexed URLs
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResultRecord;

    fn candidates() -> EntityCandidates {
        let mut candidates = EntityCandidates::new();
        candidates.register(
            "Acme",
            vec![
                ResultRecord::with_href("https://news.example/acme-1"),
                ResultRecord::with_href("https://news.example/shared"),
            ],
        );
        candidates.register(
            "Globex",
            vec![
                ResultRecord::with_href("https://news.example/shared"),
                ResultRecord {
                    url: Some("https://news.example/globex-1".to_string()),
                    ..ResultRecord::default()
                },
                ResultRecord::default(),
            ],
        );
        candidates
    }

    #[test]
    fn test_lookup() {
        let index = AttributionIndex::build(&candidates());

        assert_eq!(
            index.lookup("https://news.example/acme-1"),
            Some(&EntityId::from("Acme"))
        );
        assert_eq!(
            index.lookup("https://news.example/globex-1"),
            Some(&EntityId::from("Globex"))
        );
        assert_eq!(index.lookup("https://news.example/unknown"), None);
    }

    #[test]
    fn test_first_registered_entity_wins() {
        let index = AttributionIndex::build(&candidates());
        assert_eq!(
            index.lookup("https://news.example/shared"),
            Some(&EntityId::from("Acme"))
        );
    }

    #[test]
    fn test_lookup_is_exact() {
        let index = AttributionIndex::build(&candidates());
        assert_eq!(index.lookup("https://news.example/acme-1/"), None);
        assert_eq!(index.lookup("HTTPS://news.example/acme-1"), None);
    }

    #[test]
    fn test_lookup_is_stable() {
        let index = AttributionIndex::build(&candidates());
        let first = index.lookup("https://news.example/shared").cloned();
        for _ in 0..10 {
            assert_eq!(index.lookup("https://news.example/shared").cloned(), first);
        }
    }

    #[test]
    fn test_candidate_urls_keep_order_and_duplicates() {
        let index = AttributionIndex::build(&candidates());

        assert_eq!(
            index.candidate_urls(),
            &[
                "https://news.example/acme-1".to_string(),
                "https://news.example/shared".to_string(),
                "https://news.example/shared".to_string(),
                "https://news.example/globex-1".to_string(),
            ]
        );
        assert_eq!(index.len(), 3);
        assert_eq!(
            index.entities(),
            &[EntityId::from("Acme"), EntityId::from("Globex")]
        );
    }

    #[test]
    fn test_attribute() {
        let index = AttributionIndex::build(&candidates());

        let ok = FetchOutcome::success(
            "https://news.example/globex-1",
            "Globex".into(),
            "text".into(),
        );
        let record = index.attribute(&ok).unwrap();
        assert_eq!(record.entity_id, EntityId::from("Globex"));
        assert_eq!(record.content, "text");

        let failed = FetchOutcome::failed("https://news.example/globex-1", "HTTP 500");
        assert!(index.attribute(&failed).is_none());

        let stray = FetchOutcome::success("https://elsewhere.example/", "t".into(), "c".into());
        assert!(index.attribute(&stray).is_none());
    }

    #[test]
    fn test_empty_index() {
        let index = AttributionIndex::build(&EntityCandidates::new());
        assert!(index.is_empty());
        assert!(index.candidate_urls().is_empty());
    }
}
