use anyhow::{Context, Result};
use clap::ValueEnum;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use marketpulse::models::{AnalysisPair, Citation, TrendItem};
use marketpulse::utils::{normalize_whitespace, truncate_text};

const SCORE_BAR_WIDTH: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Borrowed view of everything a report can show
pub struct Report<'a> {
    pub trends: &'a [TrendItem],
    pub date_range: Option<&'a str>,
    pub analysis: Option<&'a AnalysisPair>,
    pub sources: &'a [Citation],
    /// Shown when no trend item was recognized
    pub raw_text: Option<&'a str>,
}

pub fn render_text(report: &Report<'_>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "YouTube Investment & Tech Trends");
    if let Some(range) = report.date_range {
        let _ = writeln!(out, "Period: {range}");
    }
    let _ = writeln!(out, "================================");

    if report.trends.is_empty() {
        let _ = writeln!(out, "\nNo structured trends recognized.");
        if let Some(raw) = report.raw_text.filter(|r| !r.trim().is_empty()) {
            let _ = writeln!(out, "\nRaw response:\n{}", raw.trim());
        }
    } else {
        let _ = writeln!(out, "\n{}", category_summary(report.trends));

        for (i, item) in report.trends.iter().enumerate() {
            let _ = writeln!(
                out,
                "\n{}. [{}] {}",
                i + 1,
                item.category,
                normalize_whitespace(&item.title)
            );
            let _ = writeln!(
                out,
                "   {} {}",
                score_bar(item.virality_score),
                item.virality_score
            );
            if !item.tags.is_empty() {
                let _ = writeln!(out, "   Tags: {}", item.tags.join(", "));
            }
            for line in item.description.lines() {
                let _ = writeln!(out, "   > {line}");
            }
        }
    }

    if let Some(analysis) = report.analysis {
        let _ = writeln!(out, "\nMarket Trend Analysis (English)");
        let _ = writeln!(out, "--------------------------------");
        let _ = writeln!(out, "{}", analysis.en);
        let _ = writeln!(out, "\n市場趨勢分析 (繁體中文)");
        let _ = writeln!(out, "--------------------------------");
        let _ = writeln!(out, "{}", analysis.zh);
    }

    if !report.sources.is_empty() {
        let _ = writeln!(out, "\nSources ({}):", report.sources.len());
        for source in report.sources {
            let _ = writeln!(out, "  - {}: {}", truncate_text(&source.title, 60), source.uri);
        }
    }

    out
}

/// Horizontal bar for a score; values above 100 render as a full bar
pub fn score_bar(score: u32) -> String {
    let filled = score.min(100) * SCORE_BAR_WIDTH / 100;
    let mut bar = "#".repeat(filled as usize);
    bar.push_str(&".".repeat((SCORE_BAR_WIDTH - filled) as usize));
    format!("[{bar}]")
}

fn category_summary(trends: &[TrendItem]) -> String {
    let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
    for item in trends {
        *counts.entry(item.category_kind().as_str()).or_default() += 1;
    }

    let parts: Vec<String> = counts
        .iter()
        .map(|(category, count)| format!("{category}: {count}"))
        .collect();
    format!("{} items ({})", trends.len(), parts.join(", "))
}

/// Write to `output` when given, stdout otherwise
pub async fn emit(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            tokio::fs::write(path, content)
                .await
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = content.len(), "Output written");
        }
        None => print!("{content}"),
    }
    Ok(())
}
