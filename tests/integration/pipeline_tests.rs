use crate::{create_test_config, html_page};
use futures::StreamExt;
use newsflag::{StreamingPipeline, WorkerPool};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_page(server: &MockServer, route: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(template)
        .mount(server)
        .await;
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html")
}

#[tokio::test]
async fn test_bad_page_does_not_affect_good_pages() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/bad", html("   ".to_string())).await;
    mount_page(&mock_server, "/good1", html(html_page("One", "First story"))).await;
    mount_page(&mock_server, "/good2", html(html_page("Two", "Second story"))).await;

    let config = create_test_config(5);
    let pipeline = StreamingPipeline::from_config(&config, WorkerPool::new(2)).unwrap();

    let base = mock_server.uri();
    let urls = vec![
        format!("{}/bad", base),
        format!("{}/good1", base),
        format!("{}/good2", base),
    ];
    let outcomes = pipeline.collect(urls).await;

    assert_eq!(outcomes.len(), 3);
    for outcome in &outcomes {
        if outcome.url.ends_with("/bad") {
            assert!(!outcome.is_success());
            assert!(outcome.error().unwrap().contains("Extraction failed"));
        } else {
            assert!(outcome.is_success(), "{} should succeed", outcome.url);
        }
    }

    let good1 = outcomes.iter().find(|o| o.url.ends_with("/good1")).unwrap();
    assert_eq!(good1.title(), Some("One"));
    assert!(good1.content().unwrap().contains("First story"));
}

#[tokio::test]
async fn test_one_outcome_per_submitted_url() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/ok", html(html_page("Ok", "Fine"))).await;
    mount_page(&mock_server, "/error", ResponseTemplate::new(500)).await;

    let config = create_test_config(5);
    let pipeline = StreamingPipeline::from_config(&config, WorkerPool::new(2)).unwrap();

    let base = mock_server.uri();
    let urls = vec![
        format!("{}/ok", base),
        format!("{}/ok", base),
        format!("{}/error", base),
        format!("{}/missing", base),
        "not-a-url".to_string(),
    ];
    let outcomes = pipeline.collect(urls).await;

    assert_eq!(outcomes.len(), 5);
    assert_eq!(outcomes.iter().filter(|o| o.is_success()).count(), 2);

    let error = outcomes.iter().find(|o| o.url.ends_with("/error")).unwrap();
    assert_eq!(error.error(), Some("HTTP 500"));
}

#[tokio::test]
async fn test_slow_page_times_out_and_fast_page_arrives_first() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/slow",
        html(html_page("Slow", "Late")).set_delay(Duration::from_secs(5)),
    )
    .await;
    mount_page(&mock_server, "/fast", html(html_page("Fast", "Early"))).await;

    let config = create_test_config(1);
    let pipeline = StreamingPipeline::from_config(&config, WorkerPool::new(2)).unwrap();

    let base = mock_server.uri();
    let mut stream = pipeline.stream(vec![format!("{}/slow", base), format!("{}/fast", base)]);

    let first = stream.next().await.unwrap();
    assert!(first.url.ends_with("/fast"));
    assert!(first.is_success());

    let second = stream.next().await.unwrap();
    assert!(second.url.ends_with("/slow"));
    assert!(!second.is_success());

    assert!(stream.next().await.is_none());
}
