//! Newsflag main entry point
//!
//! This is the command-line interface for the Newsflag news sentiment analyzer.

use anyhow::Context;
use clap::Parser;
use newsflag::config::{load_config_with_hash, validate, Config};
use newsflag::output::{format_summary_table, generate_markdown_report, render_response_json};
use newsflag::run::print_statistics;
use newsflag::{AnalysisRun, EntityCandidates, LexiconClassifier, WorkerPool};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Newsflag: per-entity news sentiment and negative-news flagging
///
/// Newsflag fetches the candidate news pages of each entity, extracts their
/// text, classifies sentiment and reports an average sentiment plus a
/// negative-news flag per entity.
#[derive(Parser, Debug)]
#[command(name = "newsflag")]
#[command(version)]
#[command(about = "Per-entity news sentiment and negative-news flagging", long_about = None)]
struct Cli {
    /// JSON file mapping each entity to its search results
    #[arg(value_name = "CANDIDATES")]
    candidates: PathBuf,

    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print the JSON response instead of the summary table
    #[arg(long)]
    json: bool,

    /// Write a markdown report to the configured report path
    #[arg(long)]
    report: bool,

    /// Validate inputs and show what would be fetched without fetching
    #[arg(long, conflicts_with_all = ["json", "report"])]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = load_configuration(cli.config.as_deref())?;

    tracing::info!("Loading candidates from: {}", cli.candidates.display());
    let candidates = load_candidates(&cli.candidates)?;

    if cli.dry_run {
        handle_dry_run(&config, &candidates);
        return Ok(());
    }

    handle_run(&cli, &config, &config_hash, &candidates).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("newsflag=info,warn"),
            1 => EnvFilter::new("newsflag=debug,info"),
            2 => EnvFilter::new("newsflag=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_configuration(path: Option<&Path>) -> anyhow::Result<(Config, String)> {
    let Some(path) = path else {
        tracing::info!("No configuration file given, using defaults");
        let config = Config::default();
        validate(&config)?;
        return Ok((config, "default".to_string()));
    };

    tracing::info!("Loading configuration from: {}", path.display());
    match load_config_with_hash(path) {
        Ok((config, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok((config, hash))
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            Err(e.into())
        }
    }
}

fn load_candidates(path: &Path) -> anyhow::Result<EntityCandidates> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read candidates file {}", path.display()))?;
    let candidates: EntityCandidates = serde_json::from_str(&json)
        .with_context(|| format!("invalid candidates file {}", path.display()))?;

    tracing::info!(
        "Loaded {} entities with {} records",
        candidates.len(),
        candidates.total_records()
    );
    Ok(candidates)
}

/// Handles the --dry-run mode: shows configuration and what would be fetched
fn handle_dry_run(config: &Config, candidates: &EntityCandidates) {
    println!("=== Newsflag Dry Run ===\n");

    println!("Pipeline Configuration:");
    println!("  Worker threads: {}", config.pipeline.worker_threads);
    println!("  Fetch timeout: {}s", config.pipeline.fetch_timeout_secs);
    match config.pipeline.max_in_flight_fetches {
        0 => println!("  Max in-flight fetches: unbounded"),
        n => println!("  Max in-flight fetches: {}", n),
    }

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nClassifier:");
    println!("  Max input chars: {}", config.classifier.max_input_chars);
    println!(
        "  Negative keywords: {}",
        config.classifier.negative_keywords.join(", ")
    );

    println!("\nOutput:");
    println!("  Report: {}", config.output.report_path);

    println!("\nEntities ({}):", candidates.len());
    let mut url_count = 0;
    for (entity, records) in candidates.iter() {
        let links: Vec<&str> = records.iter().filter_map(|r| r.normalized_link()).collect();
        println!(
            "  - {} ({} records, {} with links)",
            entity,
            records.len(),
            links.len()
        );
        for link in &links {
            println!("    * {}", link);
        }
        url_count += links.len();
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would fetch {} URLs", url_count);
}

/// Handles the main analysis run
async fn handle_run(
    cli: &Cli,
    config: &Config,
    config_hash: &str,
    candidates: &EntityCandidates,
) -> anyhow::Result<()> {
    let pool = WorkerPool::new(config.pipeline.worker_threads as usize);
    let classifier = Arc::new(LexiconClassifier::from_config(&config.classifier));
    let run = AnalysisRun::from_config(config, pool, classifier)?;

    let report = run.execute(candidates).await;

    if cli.json {
        println!("{}", render_response_json(&report.summaries)?);
    } else {
        print!("{}", format_summary_table(&report.summaries));
        if !cli.quiet {
            println!();
            print_statistics(&report.stats);
        }
    }

    if cli.report {
        let path = Path::new(&config.output.report_path);
        generate_markdown_report(&report, config_hash, path)?;
        tracing::info!("Report written to: {}", path.display());
    }

    Ok(())
}
