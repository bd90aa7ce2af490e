//! Markdown report generation
//!
//! This module generates human-readable markdown reports of a run, including
//! per-entity results, run statistics, and the classified articles.

use crate::output::OutputResult;
use crate::run::RunReport;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Maximum characters of article text quoted per row
const EXCERPT_CHARS: usize = 160;

/// Generates a markdown report for a finished run
///
/// # Arguments
///
/// * `report` - The finished run
/// * `config_hash` - Hash of the configuration the run used
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(OutputError)` - Failed to write the report
pub fn generate_markdown_report(
    report: &RunReport,
    config_hash: &str,
    output_path: &Path,
) -> OutputResult<()> {
    let markdown = format_markdown_report(report, config_hash);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a run report as markdown
pub fn format_markdown_report(report: &RunReport, config_hash: &str) -> String {
    let stats = &report.stats;
    let mut md = String::new();

    md.push_str("# Newsflag Run Report\n\n");

    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Started**: {}\n", stats.started_at.to_rfc3339()));
    md.push_str(&format!("- **Finished**: {}\n", stats.finished_at.to_rfc3339()));
    md.push_str(&format!(
        "- **Duration**: {:.2} seconds\n",
        stats.duration_seconds()
    ));
    md.push_str(&format!("- **Config Hash**: {}\n\n", config_hash));

    md.push_str("## Entities\n\n");
    if report.summaries.is_empty() {
        md.push_str("No entities could be summarized.\n\n");
    } else {
        md.push_str("| Entity | Sentiment | Mean Score | Articles | Negative News |\n");
        md.push_str("|--------|-----------|------------|----------|---------------|\n");
        for summary in &report.summaries {
            md.push_str(&format!(
                "| {} | {} | {:.2} | {} | {} |\n",
                escape_cell(summary.entity_id.as_str()),
                summary.average_sentiment,
                summary.mean_score,
                summary.article_count,
                if summary.negative_flag { "yes" } else { "no" }
            ));
        }
        md.push('\n');
    }

    let missing = report.entities_without_articles();
    if !missing.is_empty() {
        md.push_str("### Entities Without Articles\n\n");
        for entity in missing {
            md.push_str(&format!("- {}\n", entity));
        }
        md.push('\n');
    }

    md.push_str("## Statistics\n\n");
    md.push_str("| Stage | Count |\n");
    md.push_str("|-------|-------|\n");
    md.push_str(&format!("| Candidate URLs | {} |\n", stats.urls_total));
    md.push_str(&format!("| Fetched | {} |\n", stats.fetched_ok));
    md.push_str(&format!("| Fetch Failed | {} |\n", stats.fetch_failed));
    md.push_str(&format!("| Attributed | {} |\n", stats.attributed));
    md.push_str(&format!("| Unattributed | {} |\n", stats.unattributed));
    md.push_str(&format!("| Classified | {} |\n", stats.classified));
    md.push_str(&format!(
        "| Classification Failed | {} |\n\n",
        stats.classification_failed
    ));
    md.push_str(&format!(
        "- **Fetch Success Rate**: {:.2}%\n\n",
        stats.fetch_success_rate()
    ));

    if !report.outcomes.is_empty() {
        md.push_str("## Articles\n\n");
        md.push_str("| Entity | Sentiment | Flag | Title | Excerpt |\n");
        md.push_str("|--------|-----------|------|-------|---------|\n");
        for outcome in &report.outcomes {
            md.push_str(&format!(
                "| {} | {} | {} | [{}]({}) | {} |\n",
                escape_cell(outcome.entity_id.as_str()),
                outcome.sentiment,
                if outcome.negative_flag { "⚑" } else { "" },
                escape_cell(&outcome.title),
                outcome.url,
                escape_cell(&excerpt(&outcome.content))
            ));
        }
        md.push('\n');
    }

    md
}

fn excerpt(text: &str) -> String {
    if text.chars().count() <= EXCERPT_CHARS {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(EXCERPT_CHARS).collect();
    cut.push('…');
    cut
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
