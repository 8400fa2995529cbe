// Core data structures for marketpulse scans

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category assigned upstream when a segment carries no `Category:` line
pub const DEFAULT_CATEGORY: &str = "General";

/// Virality score assigned when a segment has no parseable `Score:` line
pub const DEFAULT_VIRALITY_SCORE: u32 = 50;

/// Trend category enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrendCategory {
    Investment,
    Technology,
    Crypto,
    AI,
    General,
}

impl TrendCategory {
    /// Create from the exact upstream spelling (case-sensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Investment" => Some(Self::Investment),
            "Technology" => Some(Self::Technology),
            "Crypto" => Some(Self::Crypto),
            "AI" => Some(Self::AI),
            "General" => Some(Self::General),
            _ => None,
        }
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Investment => "Investment",
            Self::Technology => "Technology",
            Self::Crypto => "Crypto",
            Self::AI => "AI",
            Self::General => "General",
        }
    }
}

impl std::fmt::Display for TrendCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One trending topic recovered from a completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendItem {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Category text exactly as emitted upstream, not validated
    pub category: String,
    pub virality_score: u32,
    pub tags: Vec<String>,
}

impl TrendItem {
    /// Map the free-text category onto [`TrendCategory`], falling back to General
    pub fn category_kind(&self) -> TrendCategory {
        match TrendCategory::parse(&self.category) {
            Some(kind) => kind,
            None => {
                tracing::debug!(
                    id = %self.id,
                    category = %self.category,
                    "Unrecognized trend category, treating as General"
                );
                TrendCategory::General
            }
        }
    }
}

/// Web reference attached to a grounded completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub uri: String,
    pub title: String,
}

/// Market analysis in English and Traditional Chinese
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisPair {
    pub en: String,
    pub zh: String,
}

/// Output of parsing one completion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedResult {
    pub trends: Vec<TrendItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisPair>,
}

impl ParsedResult {
    /// True when nothing at all was recovered from the text
    pub fn is_empty(&self) -> bool {
        self.trends.is_empty() && self.date_range.is_none() && self.analysis.is_none()
    }
}

/// Full result of one scan, handed to the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub raw_text: String,
    pub parsed_trends: Vec<TrendItem>,
    pub sources: Vec<Citation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisPair>,
    pub fetched_at: DateTime<Utc>,
}

impl SearchResponse {
    /// Assemble a response from the raw completion and its parse
    pub fn new(raw_text: String, parsed: ParsedResult, sources: Vec<Citation>) -> Self {
        Self {
            raw_text,
            parsed_trends: parsed.trends,
            sources,
            date_range: parsed.date_range,
            analysis: parsed.analysis,
            fetched_at: Utc::now(),
        }
    }

    /// Whether the caller should fall back to showing the raw text
    pub fn needs_raw_fallback(&self) -> bool {
        self.parsed_trends.is_empty()
    }
}

/// Parameters of one scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    pub limit: u32,
    pub include_analysis: bool,
}

impl ScanRequest {
    /// Item counts offered by the front end
    pub const ALLOWED_LIMITS: [u32; 4] = [6, 10, 20, 30];

    pub fn new(limit: u32, include_analysis: bool) -> Self {
        Self {
            limit,
            include_analysis,
        }
    }
}

impl Default for ScanRequest {
    fn default() -> Self {
        Self {
            limit: 10,
            include_analysis: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(category: &str) -> TrendItem {
        TrendItem {
            id: "trend-0-x".to_string(),
            title: "NVIDIA earnings".to_string(),
            description: "Coverage by several channels".to_string(),
            category: category.to_string(),
            virality_score: 90,
            tags: vec!["NVDA".to_string()],
        }
    }

    #[test]
    fn test_category_parse_is_case_sensitive() {
        assert_eq!(TrendCategory::parse("AI"), Some(TrendCategory::AI));
        assert_eq!(TrendCategory::parse("ai"), None);
        assert_eq!(TrendCategory::parse("Crypto"), Some(TrendCategory::Crypto));
    }

    #[test]
    fn test_category_roundtrip_all() {
        for category in [
            TrendCategory::Investment,
            TrendCategory::Technology,
            TrendCategory::Crypto,
            TrendCategory::AI,
            TrendCategory::General,
        ] {
            assert_eq!(TrendCategory::parse(category.as_str()), Some(category));
        }
    }

    #[test]
    fn test_category_kind_fallback() {
        assert_eq!(item("Technology").category_kind(), TrendCategory::Technology);
        assert_eq!(item("Finance").category_kind(), TrendCategory::General);
        // The stored text is untouched
        assert_eq!(item("Finance").category, "Finance");
    }

    #[test]
    fn test_trend_item_serializes_camel_case() {
        let json = serde_json::to_value(item("AI")).unwrap();
        assert_eq!(json["viralityScore"], 90);
        assert!(json.get("virality_score").is_none());
    }

    #[test]
    fn test_parsed_result_omits_missing_fields() {
        let json = serde_json::to_value(ParsedResult::default()).unwrap();
        assert!(json.get("dateRange").is_none());
        assert!(json.get("analysis").is_none());
        assert!(ParsedResult::default().is_empty());
    }

    #[test]
    fn test_search_response_raw_fallback() {
        let response =
            SearchResponse::new("plain text".to_string(), ParsedResult::default(), vec![]);
        assert!(response.needs_raw_fallback());
        assert_eq!(response.raw_text, "plain text");
    }

    #[test]
    fn test_citation_serializes_flat() {
        let citation = Citation {
            uri: "https://www.youtube.com/watch?v=abc".to_string(),
            title: "youtube.com".to_string(),
        };
        let json = serde_json::to_value(&citation).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "uri": "https://www.youtube.com/watch?v=abc",
                "title": "youtube.com"
            })
        );
        assert!(json.get("web").is_none());
    }

    #[test]
    fn test_scan_request_default() {
        let request = ScanRequest::default();
        assert_eq!(request.limit, 10);
        assert!(!request.include_analysis);
        assert!(ScanRequest::ALLOWED_LIMITS.contains(&request.limit));
    }
}
