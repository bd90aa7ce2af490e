//! Configuration module for Newsflag
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; missing sections fall back to their defaults.
//!
//! # Example
//!
//! ```no_run
//! use newsflag::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("newsflag.toml")).unwrap();
//! println!("Worker pool size: {}", config.pipeline.worker_threads);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    ClassifierConfig, Config, OutputConfig, PipelineConfig, UserAgentConfig,
    DEFAULT_NEGATIVE_KEYWORDS,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
