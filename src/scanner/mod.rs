//! Weekly trend scan
//!
//! [`TrendScanner`] issues one grounded generation call per scan and parses
//! the completion into a [`SearchResponse`]. Each call is independent: no
//! state is carried between scans and failures are never retried.

use crate::config::{Config, DEFAULT_TEMPERATURE};
use crate::error::{Error, Result};
use crate::llm::{
    build_prompt, GeminiClient, GenerationRequest, GenerativeSearch, SYSTEM_INSTRUCTION,
};
use crate::models::{ScanRequest, SearchResponse};
use crate::parser::parse_response;

/// Issues trend scans against a generative search backend
pub struct TrendScanner<B> {
    backend: B,
    temperature: f32,
}

impl TrendScanner<GeminiClient> {
    /// Build a scanner backed by Gemini from validated configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        config
            .validate()
            .map_err(|e| Error::config(format!("{e:#}")))?;

        let client = GeminiClient::with_config(config.gemini.clone())?;
        Ok(Self::new(client).with_temperature(config.gemini.temperature))
    }
}

impl<B: GenerativeSearch> TrendScanner<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Fetch this week's trends
    ///
    /// The number of parsed items is whatever the completion contains; it may
    /// differ from `limit`.
    pub async fn fetch_trends(&self, limit: u32, include_analysis: bool) -> Result<SearchResponse> {
        if limit == 0 {
            return Err(Error::InvalidLimit(limit));
        }

        let request = GenerationRequest {
            prompt: build_prompt(limit, include_analysis),
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            temperature: self.temperature,
            enable_search: true,
        };

        tracing::info!(
            limit = %limit,
            include_analysis = %include_analysis,
            model = %self.backend.model(),
            "Requesting weekly trends"
        );

        let completion = self.backend.generate(&request).await.map_err(|e| {
            tracing::error!(error = %e, "Trend request failed");
            Error::from(e)
        })?;

        let parsed = parse_response(&completion.text);

        if parsed.trends.is_empty() {
            tracing::warn!(
                text_len = completion.text.len(),
                "No trend items recognized in completion"
            );
        } else if parsed.trends.len() != limit as usize {
            tracing::info!(
                requested = limit,
                parsed = parsed.trends.len(),
                "Parsed item count differs from requested limit"
            );
        }

        tracing::info!(
            items = parsed.trends.len(),
            sources = completion.citations.len(),
            date_range = ?parsed.date_range,
            has_analysis = parsed.analysis.is_some(),
            "Trend scan completed"
        );

        Ok(SearchResponse::new(completion.text, parsed, completion.citations))
    }

    /// Fetch trends for a [`ScanRequest`]
    pub async fn scan(&self, request: ScanRequest) -> Result<SearchResponse> {
        self.fetch_trends(request.limit, request.include_analysis).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;
    use crate::error::MarketPulseErrorTrait;
    use crate::llm::{Completion, LlmError, LlmResult};
    use crate::models::Citation;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StubBackend {
        reply: std::result::Result<String, u16>,
        seen: Mutex<Vec<GenerationRequest>>,
    }

    impl StubBackend {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                reply: Err(status),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl GenerativeSearch for StubBackend {
        async fn generate(&self, request: &GenerationRequest) -> LlmResult<Completion> {
            self.seen.lock().unwrap().push(request.clone());
            match &self.reply {
                Ok(text) => Ok(Completion {
                    text: text.clone(),
                    citations: vec![Citation {
                        uri: "https://www.youtube.com/watch?v=abc".to_string(),
                        title: "youtube.com".to_string(),
                    }],
                }),
                Err(status) => Err(LlmError::Api {
                    status: *status,
                    message: "stub failure".to_string(),
                }),
            }
        }

        fn model(&self) -> &str {
            "stub"
        }
    }

    const REPLY: &str = "Intro\n###DATE_RANGE### Oct 20 - Oct 27, 2025\n\
        ###ITEM###\nTitle: One\nCategory: AI\nScore: 91\nTags: LLM\nSummary: First\n\
        ###ITEM###\nTitle: Two\nSummary: Second\n";

    #[tokio::test]
    async fn test_fetch_trends_parses_reply() {
        let scanner = TrendScanner::new(StubBackend::replying(REPLY));
        let response = scanner.fetch_trends(6, false).await.unwrap();

        assert_eq!(response.parsed_trends.len(), 2);
        assert_eq!(response.date_range.as_deref(), Some("Oct 20 - Oct 27, 2025"));
        assert_eq!(response.sources.len(), 1);
        assert_eq!(response.raw_text, REPLY);
        assert!(response.analysis.is_none());
    }

    #[tokio::test]
    async fn test_request_carries_contract() {
        let scanner = TrendScanner::new(StubBackend::replying(""));
        scanner.fetch_trends(10, true).await.unwrap();

        let seen = scanner.backend().seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].enable_search);
        assert!((seen[0].temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(seen[0].system_instruction, SYSTEM_INSTRUCTION);
        assert!(seen[0].prompt.contains("exactly 10 distinct items"));
        assert!(seen[0].prompt.contains("300-500 words"));
    }

    #[tokio::test]
    async fn test_zero_limit_rejected_without_call() {
        let scanner = TrendScanner::new(StubBackend::replying(REPLY));
        let err = scanner.fetch_trends(0, false).await.unwrap_err();

        assert!(matches!(err, Error::InvalidLimit(0)));
        assert!(scanner.backend().seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_backend_failure_is_terminal() {
        let scanner = TrendScanner::new(StubBackend::failing(429));
        let err = scanner.scan(ScanRequest::default()).await.unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Llm);
        assert!(err.user_message().contains("quota"));
        assert_eq!(scanner.backend().seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unparseable_reply_is_not_an_error() {
        let scanner = TrendScanner::new(StubBackend::replying("Sorry, no trends today."));
        let response = scanner.fetch_trends(6, false).await.unwrap();

        assert!(response.parsed_trends.is_empty());
        assert!(response.needs_raw_fallback());
    }

    #[test]
    fn test_from_config_requires_api_key() {
        let mut config = Config::default();
        config.gemini.api_key = None;
        let err = TrendScanner::from_config(&config).err().unwrap();
        assert_eq!(err.category(), ErrorCategory::Config);
    }

    #[test]
    fn test_from_config_rejects_invalid_config() {
        let mut config = Config::default();
        config.gemini.api_key = Some("key".to_string());
        config.scan.default_limit = 0;
        let err = TrendScanner::from_config(&config).err().unwrap();
        assert!(matches!(err, Error::Config(_)));
    }
}
