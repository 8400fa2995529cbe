use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use marketpulse::parser::parse_response;

use super::output::{emit, render_text, OutputFormat, Report};

/// Parse a saved completion without calling the API
pub async fn parse(input: &Path, format: OutputFormat, output: Option<PathBuf>) -> Result<()> {
    let text = tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("Failed to read completion file: {}", input.display()))?;

    let parsed = parse_response(&text);
    tracing::info!(
        input = %input.display(),
        items = parsed.trends.len(),
        "Parsed saved completion"
    );

    let content = match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&parsed)?;
            json.push('\n');
            json
        }
        OutputFormat::Text => render_text(&Report {
            trends: &parsed.trends,
            date_range: parsed.date_range.as_deref(),
            analysis: parsed.analysis.as_ref(),
            sources: &[],
            raw_text: Some(text.as_str()),
        }),
    };

    emit(&content, output.as_deref()).await
}
