//! Generative search client
//!
//! This module provides Gemini integration with live Google Search grounding.
//! The [`GenerativeSearch`] trait is the seam between the scanner and the
//! HTTP API so scans can run against a stub backend.

pub mod error;
pub mod prompt;
mod types;

pub use error::{LlmError, LlmResult};
pub use prompt::{build_prompt, SYSTEM_INSTRUCTION};

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::config::GeminiConfig;
use crate::models::Citation;
use crate::utils::truncate_text;
use types::{
    ApiErrorEnvelope, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    GoogleSearch, Tool,
};

/// One text-generation call
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// User prompt
    pub prompt: String,

    /// Output format contract
    pub system_instruction: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Ground the answer with live web search
    pub enable_search: bool,
}

/// Text answer plus the citations attached to it
#[derive(Debug, Clone, Default)]
pub struct Completion {
    pub text: String,
    pub citations: Vec<Citation>,
}

/// Backend able to answer a grounded generation request
#[async_trait]
pub trait GenerativeSearch: Send + Sync {
    /// Run one generation call, without retries
    async fn generate(&self, request: &GenerationRequest) -> LlmResult<Completion>;

    /// Model identifier used for the calls
    fn model(&self) -> &str;
}

/// Gemini `generateContent` client
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
    api_key: String,
}

impl GeminiClient {
    /// Create a new client with custom config
    pub fn with_config(config: GeminiConfig) -> LlmResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(LlmError::MissingApiKey)?;

        Url::parse(&config.endpoint)
            .map_err(|e| LlmError::InvalidEndpoint(format!("{}: {e}", config.endpoint)))?;

        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(format!("marketpulse/{}", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }

    fn build_body(request: &GenerationRequest) -> GenerateContentRequest {
        let tools = if request.enable_search {
            vec![Tool {
                google_search: GoogleSearch {},
            }]
        } else {
            Vec::new()
        };

        GenerateContentRequest {
            contents: vec![Content::user(&request.prompt)],
            system_instruction: Some(Content::system(&request.system_instruction)),
            tools,
            generation_config: GenerationConfig {
                temperature: request.temperature,
            },
        }
    }
}

#[async_trait]
impl GenerativeSearch for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> LlmResult<Completion> {
        let url = self.generate_url();
        let body = Self::build_body(request);

        tracing::debug!(
            model = %self.config.model,
            prompt_len = request.prompt.len(),
            search = request.enable_search,
            "Sending generateContent request"
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorEnvelope>(&text) {
                Ok(envelope) => match envelope.error.status {
                    Some(code) => format!("{code}: {}", envelope.error.message),
                    None => envelope.error.message,
                },
                Err(_) => truncate_text(text.trim(), 200),
            };
            tracing::warn!(status = status.as_u16(), message = %message, "Gemini request failed");
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&text).map_err(|e| LlmError::InvalidResponse {
                reason: format!("{e}; body: {}", truncate_text(&text, 200)),
            })?;

        let completion = Completion {
            text: parsed.text(),
            citations: parsed.citations(),
        };

        tracing::debug!(
            text_len = completion.text.len(),
            citations = completion.citations.len(),
            "Received completion"
        );

        Ok(completion)
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key() -> GeminiConfig {
        GeminiConfig {
            api_key: Some("test-key".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_api_key() {
        let result = GeminiClient::with_config(GeminiConfig::default());
        assert!(matches!(result, Err(LlmError::MissingApiKey)));

        let blank = GeminiConfig {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            GeminiClient::with_config(blank),
            Err(LlmError::MissingApiKey)
        ));
    }

    #[test]
    fn test_invalid_endpoint() {
        let config = GeminiConfig {
            endpoint: "::nope".to_string(),
            ..config_with_key()
        };
        assert!(matches!(
            GeminiClient::with_config(config),
            Err(LlmError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_generate_url() {
        let config = GeminiConfig {
            endpoint: "http://localhost:8080/".to_string(),
            ..config_with_key()
        };
        let client = GeminiClient::with_config(config).unwrap();
        assert_eq!(
            client.generate_url(),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(client.model(), "gemini-2.5-flash");
    }

    #[test]
    fn test_body_without_search_has_no_tools() {
        let request = GenerationRequest {
            prompt: "p".to_string(),
            system_instruction: "s".to_string(),
            temperature: 0.7,
            enable_search: false,
        };
        let json = serde_json::to_value(GeminiClient::build_body(&request)).unwrap();
        assert!(json.get("tools").is_none());
    }
}
