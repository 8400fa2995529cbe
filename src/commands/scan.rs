use anyhow::{Context, Result};
use std::path::PathBuf;

use marketpulse::config::Config;
use marketpulse::error::MarketPulseErrorTrait;
use marketpulse::scanner::TrendScanner;

use super::output::{emit, render_text, OutputFormat, Report};

/// Arguments of the `scan` command
pub struct ScanParams {
    pub limit: Option<u32>,
    pub analysis: bool,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

pub async fn scan(config: Config, params: ScanParams) -> Result<()> {
    let mut request = config.default_request();
    if let Some(limit) = params.limit {
        request.limit = limit;
    }
    request.include_analysis |= params.analysis;

    let scanner = TrendScanner::from_config(&config)
        .map_err(|e| anyhow::anyhow!(e.user_message()))
        .context("Failed to initialize trend scanner")?;

    let response = scanner
        .scan(request)
        .await
        .map_err(|e| anyhow::anyhow!("{} ({})", e.user_message(), e.category().label()))?;

    let content = match params.format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&response)?;
            json.push('\n');
            json
        }
        OutputFormat::Text => render_text(&Report {
            trends: &response.parsed_trends,
            date_range: response.date_range.as_deref(),
            analysis: response.analysis.as_ref(),
            sources: &response.sources,
            raw_text: response
                .needs_raw_fallback()
                .then_some(response.raw_text.as_str()),
        }),
    };

    emit(&content, params.output.as_deref()).await
}
