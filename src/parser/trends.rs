//! Trend completion parser
//!
//! Recovers trend items, the analysed date range and the bilingual analysis
//! from a completion that follows the `###ITEM###` text protocol.
//!
//! # Format
//!
//! ```text
//! Intro paragraph...
//! ###DATE_RANGE### Oct 20 - Oct 27, 2025
//! ###ITEM###
//! Title: ...
//! Category: Investment
//! Score: 87
//! Tags: A, B, C
//! Summary: ...
//! ###ITEM###
//! ...
//! ###ANALYSIS_START###
//! ###ANALYSIS_EN### ...
//! ###ANALYSIS_ZH### ...
//! ```

use regex::Regex;
use std::sync::LazyLock;
use uuid::Uuid;

use crate::models::{
    AnalysisPair, ParsedResult, TrendItem, DEFAULT_CATEGORY, DEFAULT_VIRALITY_SCORE,
};

pub const DATE_RANGE_MARKER: &str = "###DATE_RANGE###";
pub const ITEM_DELIMITER: &str = "###ITEM###";
pub const ANALYSIS_START_MARKER: &str = "###ANALYSIS_START###";
pub const ANALYSIS_EN_MARKER: &str = "###ANALYSIS_EN###";
pub const ANALYSIS_ZH_MARKER: &str = "###ANALYSIS_ZH###";

static DATE_RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"###DATE_RANGE###\s*(.+)").expect("Invalid regex pattern"));

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Title:\s*(.+)").expect("Invalid regex pattern"));

static CATEGORY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Category:\s*(.+)").expect("Invalid regex pattern"));

static SCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Score:\s*([0-9]+)").expect("Invalid regex pattern"));

static TAGS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Tags:\s*(.+)").expect("Invalid regex pattern"));

// Summary runs to the end of the segment, line breaks included
static SUMMARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Summary:\s*([\s\S]+)").expect("Invalid regex pattern"));

static ANALYSIS_EN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"###ANALYSIS_EN###\s*([\s\S]*?)###ANALYSIS_ZH###").expect("Invalid regex pattern")
});

static ANALYSIS_ZH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"###ANALYSIS_ZH###\s*([\s\S]*)").expect("Invalid regex pattern"));

/// Parse a raw completion into trend items, date range and analysis
///
/// Never fails: text without the expected markers yields an empty
/// [`ParsedResult`].
pub fn parse_response(text: &str) -> ParsedResult {
    let mut regions = text.split(ANALYSIS_START_MARKER);
    let items_region = regions.next().unwrap_or_default();
    let analysis_region = regions.next();

    let date_range = capture(&DATE_RANGE_RE, items_region).map(str::trim).map(String::from);

    let trends: Vec<TrendItem> = items_region
        .split(ITEM_DELIMITER)
        .enumerate()
        .filter(|(_, segment)| !segment.trim().is_empty())
        .filter_map(|(index, segment)| parse_segment(index, segment))
        .collect();

    let analysis = analysis_region.and_then(parse_analysis);

    tracing::debug!(
        items = trends.len(),
        has_date_range = date_range.is_some(),
        has_analysis = analysis.is_some(),
        "Parsed completion"
    );

    ParsedResult {
        trends,
        date_range,
        analysis,
    }
}

/// Parse one item segment
///
/// Returns `None` unless both `Title:` and `Summary:` are present. The other
/// fields fall back to their defaults.
pub fn parse_segment(index: usize, segment: &str) -> Option<TrendItem> {
    let Some(title) = capture(&TITLE_RE, segment) else {
        tracing::trace!(index, "Segment skipped: no title");
        return None;
    };
    let Some(summary) = capture(&SUMMARY_RE, segment) else {
        tracing::trace!(index, "Segment skipped: no summary");
        return None;
    };

    let category = capture(&CATEGORY_RE, segment)
        .map(|c| c.trim().to_string())
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

    let virality_score = capture(&SCORE_RE, segment)
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(DEFAULT_VIRALITY_SCORE);

    let tags = capture(&TAGS_RE, segment)
        .map(split_tags)
        .unwrap_or_default();

    Some(TrendItem {
        id: format!("trend-{index}-{}", Uuid::new_v4().simple()),
        title: title.trim().to_string(),
        description: summary.trim().to_string(),
        category,
        virality_score,
        tags,
    })
}

fn parse_analysis(region: &str) -> Option<AnalysisPair> {
    let en = capture(&ANALYSIS_EN_RE, region)?;
    let zh = capture(&ANALYSIS_ZH_RE, region)?;

    Some(AnalysisPair {
        en: en.trim().to_string(),
        zh: zh.trim().to_string(),
    })
}

fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|tag| tag.trim().to_string())
        .collect()
}

fn capture<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}
