//! Per-entity aggregation of classification outcomes

use crate::model::{ClassificationOutcome, EntityId, EntitySummary, Sentiment};
use std::collections::HashMap;

/// Groups outcomes by entity and summarizes each group
///
/// Entities appear in the order their first outcome appears. An entity with
/// no outcomes never shows up, so there is no zero-article summary.
///
/// # Example
///
/// ```
/// use newsflag::{summarize, ClassificationOutcome, EntityId, Sentiment};
///
/// let outcome = |sentiment, negative_flag| ClassificationOutcome {
///     entity_id: EntityId::from("Acme"),
///     url: "https://n.example/1".into(),
///     title: String::new(),
///     content: String::new(),
///     sentiment,
///     negative_flag,
/// };
///
/// let summaries = summarize(&[outcome(Sentiment::Positive, false), outcome(Sentiment::Positive, true)]);
/// assert_eq!(summaries[0].average_sentiment, Sentiment::Positive);
/// assert!(summaries[0].negative_flag);
/// ```
pub fn summarize(outcomes: &[ClassificationOutcome]) -> Vec<EntitySummary> {
    struct Group<'a> {
        entity_id: &'a EntityId,
        score_sum: i64,
        count: usize,
        negative_flag: bool,
    }

    let mut groups: Vec<Group<'_>> = Vec::new();
    let mut positions: HashMap<&EntityId, usize> = HashMap::new();

    for outcome in outcomes {
        let slot = *positions.entry(&outcome.entity_id).or_insert_with(|| {
            groups.push(Group {
                entity_id: &outcome.entity_id,
                score_sum: 0,
                count: 0,
                negative_flag: false,
            });
            groups.len() - 1
        });

        let group = &mut groups[slot];
        group.score_sum += i64::from(outcome.sentiment_score());
        group.count += 1;
        group.negative_flag |= outcome.negative_flag;
    }

    groups
        .into_iter()
        .map(|group| {
            let mean_score = group.score_sum as f64 / group.count as f64;
            EntitySummary {
                entity_id: group.entity_id.clone(),
                average_sentiment: Sentiment::from_average(mean_score),
                mean_score,
                negative_flag: group.negative_flag,
                article_count: group.count,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(entity: &str, sentiment: Sentiment, negative_flag: bool) -> ClassificationOutcome {
        ClassificationOutcome {
            entity_id: EntityId::from(entity),
            url: format!("https://n.example/{}", entity),
            title: String::new(),
            content: String::new(),
            sentiment,
            negative_flag,
        }
    }

    fn label_for(sentiments: &[Sentiment]) -> Sentiment {
        let outcomes: Vec<_> = sentiments
            .iter()
            .map(|s| outcome("E", *s, false))
            .collect();
        summarize(&outcomes)[0].average_sentiment
    }

    #[test]
    fn test_threshold_law() {
        use Sentiment::*;
        assert_eq!(label_for(&[Positive, Positive, Positive]), Positive);
        assert_eq!(label_for(&[Negative, Negative]), Negative);
        assert_eq!(label_for(&[Neutral, Neutral]), Neutral);
        assert_eq!(label_for(&[Positive, Negative]), Neutral);
        // 1/3 ≈ 0.333 is above the positive threshold
        assert_eq!(label_for(&[Positive, Neutral, Neutral]), Positive);
        // 1/4 = 0.25 is not
        assert_eq!(label_for(&[Positive, Neutral, Neutral, Neutral]), Neutral);
    }

    #[test]
    fn test_end_to_end_example() {
        let outcomes = vec![
            outcome("E1", Sentiment::Positive, false),
            outcome("E2", Sentiment::Negative, false),
            outcome("E1", Sentiment::Positive, true),
        ];

        let summaries = summarize(&outcomes);
        assert_eq!(
            summaries,
            vec![
                EntitySummary {
                    entity_id: EntityId::from("E1"),
                    average_sentiment: Sentiment::Positive,
                    mean_score: 1.0,
                    negative_flag: true,
                    article_count: 2,
                },
                EntitySummary {
                    entity_id: EntityId::from("E2"),
                    average_sentiment: Sentiment::Negative,
                    mean_score: -1.0,
                    negative_flag: false,
                    article_count: 1,
                },
            ]
        );
    }

    #[test]
    fn test_flag_is_not_overridden_by_label() {
        let outcomes = vec![
            outcome("E", Sentiment::Positive, false),
            outcome("E", Sentiment::Positive, false),
            outcome("E", Sentiment::Positive, true),
        ];
        let summary = &summarize(&outcomes)[0];
        assert_eq!(summary.average_sentiment, Sentiment::Positive);
        assert!(summary.negative_flag);
    }

    #[test]
    fn test_first_seen_order() {
        let outcomes = vec![
            outcome("Zeta", Sentiment::Neutral, false),
            outcome("Alpha", Sentiment::Neutral, false),
            outcome("Zeta", Sentiment::Neutral, false),
        ];
        let order: Vec<_> = summarize(&outcomes)
            .into_iter()
            .map(|s| s.entity_id.to_string())
            .collect();
        assert_eq!(order, vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn test_no_outcomes_no_summaries() {
        assert!(summarize(&[]).is_empty());
    }
}
