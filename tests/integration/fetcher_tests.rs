use crate::{create_test_config, html_page};
use newsflag::crawler::{FetchError, HttpFetcher, PageFetcher};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher() -> HttpFetcher {
    let config = create_test_config(5);
    HttpFetcher::new(&config.user_agent, Duration::from_secs(5)).expect("client builds")
}

#[tokio::test]
async fn test_fetch_html_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/story"))
        .and(header(
            "user-agent",
            "TestBot/1.0.0 (+https://example.com/contact; test@example.com)",
        ))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(html_page("Story", "Hello"), "text/html"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/story", mock_server.uri());
    let page = fetcher().fetch(&url).await.expect("fetch succeeds");

    assert_eq!(page.final_url, url);
    assert!(page.body.contains("<title>Story</title>"));
}

#[tokio::test]
async fn test_fetch_follows_redirects() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("location", format!("{}/new", mock_server.uri()).as_str()),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(html_page("Moved", "Here now"), "text/html"),
        )
        .mount(&mock_server)
        .await;

    let page = fetcher()
        .fetch(&format!("{}/old", mock_server.uri()))
        .await
        .expect("redirect is followed");

    assert_eq!(page.final_url, format!("{}/new", mock_server.uri()));
    assert!(page.body.contains("Here now"));
}

#[tokio::test]
async fn test_fetch_non_success_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let result = fetcher()
        .fetch(&format!("{}/gone", mock_server.uri()))
        .await;

    assert!(matches!(result, Err(FetchError::Status(404))));
}

#[tokio::test]
async fn test_fetch_rejects_binary_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/report.pdf"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(b"%PDF-1.4".to_vec(), "application/pdf"),
        )
        .mount(&mock_server)
        .await;

    let result = fetcher()
        .fetch(&format!("{}/report.pdf", mock_server.uri()))
        .await;

    match result {
        Err(FetchError::ContentMismatch(content_type)) => {
            assert_eq!(content_type, "application/pdf")
        }
        other => panic!("expected content mismatch, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_connection_refused() {
    // Nothing listens on port 1
    let result = fetcher().fetch("http://127.0.0.1:1/nothing").await;
    assert!(matches!(
        result,
        Err(FetchError::Connect(_)) | Err(FetchError::Transport(_))
    ));
}
