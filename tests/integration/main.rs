//! Integration tests for Newsflag
//!
//! These tests use wiremock to create mock HTTP servers and drive the real
//! HTTP fetcher, the streaming pipeline and full analysis runs.

mod fetcher_tests;
mod pipeline_tests;
mod run_tests;

use newsflag::config::{Config, UserAgentConfig};

/// Creates a test configuration with a short fetch timeout
pub fn create_test_config(fetch_timeout_secs: u64) -> Config {
    let mut config = Config::default();
    config.pipeline.worker_threads = 2;
    config.pipeline.fetch_timeout_secs = fetch_timeout_secs;
    config.user_agent = UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: "https://example.com/contact".to_string(),
        contact_email: "test@example.com".to_string(),
    };
    config
}

/// Wraps `body` in a minimal HTML document
pub fn html_page(title: &str, body: &str) -> String {
    format!(
        "<html><head><title>{}</title></head><body><p>{}</p></body></html>",
        title, body
    )
}
