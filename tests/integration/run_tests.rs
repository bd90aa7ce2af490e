use crate::{create_test_config, html_page};
use newsflag::output::{format_markdown_report, render_response_json};
use newsflag::{
    AnalysisRun, EntityCandidates, EntityId, EntitySummary, LexiconClassifier, ResultRecord,
    Sentiment, WorkerPool,
};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_article(server: &MockServer, route: &str, title: &str, text: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html_page(title, text), "text/html"))
        .mount(server)
        .await;
}

fn summary_for<'a>(summaries: &'a [EntitySummary], name: &str) -> &'a EntitySummary {
    summaries
        .iter()
        .find(|s| s.entity_id == EntityId::from(name))
        .unwrap_or_else(|| panic!("no summary for {}", name))
}

fn build_run() -> AnalysisRun {
    let config = create_test_config(5);
    let classifier = Arc::new(LexiconClassifier::from_config(&config.classifier));
    AnalysisRun::from_config(&config, WorkerPool::new(2), classifier).unwrap()
}

#[tokio::test]
async fn test_full_run_two_entities() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_article(
        &mock_server,
        "/acme-1",
        "Acme news",
        "Acme posts record profit and strong growth",
    )
    .await;
    mount_article(
        &mock_server,
        "/acme-2",
        "Acme news",
        "Acme growth continues despite a lawsuit, with record profit",
    )
    .await;
    mount_article(
        &mock_server,
        "/globex-1",
        "Globex news",
        "Globex reports heavy losses and layoffs amid decline",
    )
    .await;

    let mut candidates = EntityCandidates::new();
    candidates.register(
        "Acme",
        vec![
            ResultRecord::with_href(format!("{}/acme-1", base)),
            ResultRecord::with_href(format!("{}/acme-2", base)),
        ],
    );
    candidates.register(
        "Globex",
        vec![ResultRecord::with_href(format!("{}/globex-1", base))],
    );

    let report = build_run().execute(&candidates).await;

    assert_eq!(report.summaries.len(), 2);

    // Summaries come in first-seen order, which depends on which fetch
    // finishes first
    let acme = summary_for(&report.summaries, "Acme");
    assert_eq!(acme.average_sentiment, Sentiment::Positive);
    assert!(acme.negative_flag);
    assert_eq!(acme.article_count, 2);

    let globex = summary_for(&report.summaries, "Globex");
    assert_eq!(globex.average_sentiment, Sentiment::Negative);
    assert!(!globex.negative_flag);
    assert_eq!(globex.article_count, 1);

    let json: serde_json::Value =
        serde_json::from_str(&render_response_json(&report.summaries).unwrap()).unwrap();
    let mut results = json["result"].as_array().unwrap().clone();
    results.sort_by_key(|r| r["name"].as_str().unwrap_or_default().to_string());
    assert_eq!(
        serde_json::Value::Array(results),
        serde_json::json!([
            {"name": "Acme", "average_sentiment": "positive", "negative_news_flag": true, "total_articles": 2},
            {"name": "Globex", "average_sentiment": "negative", "negative_news_flag": false, "total_articles": 1}
        ])
    );
}

#[tokio::test]
async fn test_shared_url_goes_to_first_entity() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_article(
        &mock_server,
        "/shared",
        "Joint venture",
        "Acme and Globex announce partnership",
    )
    .await;

    let shared = format!("{}/shared", base);
    let mut candidates = EntityCandidates::new();
    candidates.register("Acme", vec![ResultRecord::with_href(shared.clone())]);
    candidates.register("Globex", vec![ResultRecord::with_href(shared)]);

    let report = build_run().execute(&candidates).await;

    // The URL is fetched twice, but both copies belong to Acme
    assert_eq!(report.summaries.len(), 1);
    assert_eq!(report.summaries[0].entity_id, EntityId::from("Acme"));
    assert_eq!(report.summaries[0].article_count, 2);
    assert_eq!(
        report.entities_without_articles(),
        vec![&EntityId::from("Globex")]
    );
}

#[tokio::test]
async fn test_all_fetches_failing_yields_empty_result() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let mut candidates = EntityCandidates::new();
    candidates.register(
        "Acme",
        vec![
            ResultRecord::with_href(format!("{}/a", base)),
            ResultRecord::with_href(format!("{}/b", base)),
        ],
    );

    let report = build_run().execute(&candidates).await;

    assert!(report.summaries.is_empty());
    assert_eq!(report.stats.fetch_failed, 2);
    assert_eq!(
        serde_json::to_string(&report.response()).unwrap(),
        r#"{"result":[]}"#
    );

    let markdown = format_markdown_report(&report, "hash");
    assert!(markdown.contains("No entities could be summarized."));
}
