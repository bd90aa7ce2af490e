use serde::Deserialize;

/// Main configuration structure for Newsflag
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Fetch and worker pool configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Size of the shared worker pool used for extraction and classification
    #[serde(rename = "worker-threads", default = "default_worker_threads")]
    pub worker_threads: u32,

    /// Per-URL fetch timeout (seconds), covering request and body read
    #[serde(rename = "fetch-timeout-secs", default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Cap on concurrent network fetches; 0 means unbounded
    #[serde(rename = "max-in-flight-fetches", default)]
    pub max_in_flight_fetches: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            worker_threads: default_worker_threads(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            max_in_flight_fetches: 0,
        }
    }
}

/// User agent identification configuration
///
/// Missing keys fall back to the built-in identity.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the fetcher
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the fetcher
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the fetcher
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for fetcher-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "Newsflag".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://example.com/newsflag".to_string(),
            contact_email: "newsflag@example.com".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the `User-Agent` header value
    ///
    /// Format: `Name/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// Sentiment classifier configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    /// Maximum number of characters handed to the label model
    #[serde(rename = "max-input-chars", default = "default_max_input_chars")]
    pub max_input_chars: usize,

    /// Keywords that raise the negative-news flag (substring match, case-insensitive)
    #[serde(rename = "negative-keywords", default = "default_negative_keywords")]
    pub negative_keywords: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            max_input_chars: default_max_input_chars(),
            negative_keywords: default_negative_keywords(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the markdown run report
    #[serde(rename = "report-path", default = "default_report_path")]
    pub report_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_path: default_report_path(),
        }
    }
}

fn default_worker_threads() -> u32 {
    4
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

fn default_max_input_chars() -> usize {
    512
}

fn default_report_path() -> String {
    "./newsflag-report.md".to_string()
}

/// Built-in negative-news keywords
pub const DEFAULT_NEGATIVE_KEYWORDS: &[&str] = &[
    "fraud",
    "scam",
    "lawsuit",
    "corruption",
    "controversy",
    "penalty",
    "fine",
    "arrest",
    "investigation",
    "illegal",
];

fn default_negative_keywords() -> Vec<String> {
    DEFAULT_NEGATIVE_KEYWORDS
        .iter()
        .map(|k| k.to_string())
        .collect()
}
