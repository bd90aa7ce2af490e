use crate::model::{AnalysisResponse, EntitySummary};
use crate::output::OutputResult;

/// Renders the response body for a set of summaries as pretty JSON
pub fn render_response_json(summaries: &[EntitySummary]) -> OutputResult<String> {
    let response = AnalysisResponse::from_summaries(summaries);
    Ok(serde_json::to_string_pretty(&response)?)
}

/// Formats summaries as an aligned plain-text table
pub fn format_summary_table(summaries: &[EntitySummary]) -> String {
    if summaries.is_empty() {
        return "No entities could be summarized.\n".to_string();
    }

    let width = summaries
        .iter()
        .map(|s| s.entity_id.as_str().chars().count())
        .max()
        .unwrap_or(0)
        .max("Entity".len());

    let mut out = format!(
        "{:<width$}  {:<9}  {:>6}  {:>8}  {}\n",
        "Entity",
        "Sentiment",
        "Mean",
        "Articles",
        "Negative news",
        width = width
    );
    for summary in summaries {
        out.push_str(&format!(
            "{:<width$}  {:<9}  {:>6.2}  {:>8}  {}\n",
            summary.entity_id.as_str(),
            summary.average_sentiment.as_str(),
            summary.mean_score,
            summary.article_count,
            if summary.negative_flag { "yes" } else { "no" },
            width = width
        ));
    }
    out
}
