use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier of the logical entity (e.g. a company) records are attributed to
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for EntityId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// A raw search hit as produced by a search backend
///
/// Backends disagree on where the link lives: text results use `href`, news
/// results use `url`, some feeds use `link`. All three are kept and resolved
/// by [`ResultRecord::normalized_link`]. Any field not modelled here is kept
/// verbatim in `raw_metadata`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Search snippet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// The query that produced this hit
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source_query: String,

    #[serde(flatten)]
    pub raw_metadata: serde_json::Map<String, serde_json::Value>,
}

impl ResultRecord {
    /// Creates a record whose primary link is `href`
    pub fn with_href(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            ..Self::default()
        }
    }

    /// Returns the link used for fetching and attribution
    ///
    /// Resolution order is `href`, then `link`, then `url`. Empty strings count
    /// as absent. The value is returned verbatim: matching against fetched URLs
    /// is exact, with no URL canonicalization.
    pub fn normalized_link(&self) -> Option<&str> {
        [&self.href, &self.link, &self.url]
            .into_iter()
            .find_map(|field| field.as_deref().filter(|s| !s.is_empty()))
    }
}

/// Ordered entity → candidate records mapping
///
/// Registration order matters: it decides which entity wins when the same
/// link appears under several entities. Deserializes from a JSON object whose
/// key order is kept as registration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityCandidates {
    entries: Vec<(EntityId, Vec<ResultRecord>)>,
}

impl EntityCandidates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers records for an entity
    ///
    /// Registering an entity a second time appends to its records and keeps
    /// its original registration position.
    pub fn register(&mut self, entity: impl Into<EntityId>, records: Vec<ResultRecord>) {
        let entity = entity.into();
        match self.entries.iter_mut().find(|(id, _)| *id == entity) {
            Some((_, existing)) => existing.extend(records),
            None => self.entries.push((entity, records)),
        }
    }

    /// Iterates entities and their records in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&EntityId, &[ResultRecord])> {
        self.entries
            .iter()
            .map(|(id, records)| (id, records.as_slice()))
    }

    pub fn entities(&self) -> impl Iterator<Item = &EntityId> {
        self.entries.iter().map(|(id, _)| id)
    }

    /// Number of registered entities
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of records across all entities
    pub fn total_records(&self) -> usize {
        self.entries.iter().map(|(_, records)| records.len()).sum()
    }
}

impl<'de> Deserialize<'de> for EntityCandidates {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CandidatesVisitor;

        impl<'de> Visitor<'de> for CandidatesVisitor {
            type Value = EntityCandidates;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of entity name to a list of search results")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut candidates = EntityCandidates::new();
                while let Some((entity, records)) =
                    map.next_entry::<String, Vec<ResultRecord>>()?
                {
                    candidates.register(entity, records);
                }
                Ok(candidates)
            }
        }

        deserializer.deserialize_map(CandidatesVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_link_prefers_href() {
        let record = ResultRecord {
            href: Some("https://a.example/1".to_string()),
            link: Some("https://b.example/1".to_string()),
            url: Some("https://c.example/1".to_string()),
            ..ResultRecord::default()
        };
        assert_eq!(record.normalized_link(), Some("https://a.example/1"));
    }

    #[test]
    fn test_normalized_link_fallbacks() {
        let record = ResultRecord {
            href: Some(String::new()),
            url: Some("https://c.example/1".to_string()),
            ..ResultRecord::default()
        };
        assert_eq!(record.normalized_link(), Some("https://c.example/1"));

        let record = ResultRecord {
            link: Some("https://b.example/1".to_string()),
            url: Some("https://c.example/1".to_string()),
            ..ResultRecord::default()
        };
        assert_eq!(record.normalized_link(), Some("https://b.example/1"));

        assert_eq!(ResultRecord::default().normalized_link(), None);
    }

    #[test]
    fn test_record_keeps_unknown_fields() {
        let json = r#"{"title":"T","url":"https://n.example/a","source":"Reuters","date":"2024-01-01"}"#;
        let record: ResultRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.normalized_link(), Some("https://n.example/a"));
        assert_eq!(record.raw_metadata["source"], "Reuters");
        assert_eq!(record.raw_metadata["date"], "2024-01-01");
    }

    #[test]
    fn test_candidates_preserve_file_order() {
        let json = r#"{
            "Zeta Corp": [{"href": "https://z.example/1"}],
            "Alpha Inc": [{"href": "https://a.example/1"}, {"url": "https://a.example/2"}]
        }"#;
        let candidates: EntityCandidates = serde_json::from_str(json).unwrap();

        let order: Vec<&str> = candidates.entities().map(|e| e.as_str()).collect();
        assert_eq!(order, vec!["Zeta Corp", "Alpha Inc"]);
        assert_eq!(candidates.total_records(), 3);
    }

    #[test]
    fn test_register_twice_appends_in_place() {
        let mut candidates = EntityCandidates::new();
        candidates.register("A", vec![ResultRecord::with_href("https://a/1")]);
        candidates.register("B", vec![ResultRecord::with_href("https://b/1")]);
        candidates.register("A", vec![ResultRecord::with_href("https://a/2")]);

        let order: Vec<&str> = candidates.entities().map(|e| e.as_str()).collect();
        assert_eq!(order, vec!["A", "B"]);
        assert_eq!(candidates.iter().next().unwrap().1.len(), 2);
    }
}
