//! Configuration management for marketpulse
//!
//! This module handles loading and validating configuration from environment variables,
//! TOML files, and command-line arguments.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::models::ScanRequest;

/// Default Gemini REST endpoint
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Default model identifier
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Sampling temperature used for every scan
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Gemini API configuration
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Scan defaults
    #[serde(default)]
    pub scan: ScanConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Gemini API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// API key; never written back out
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Base URL of the REST API
    pub endpoint: String,

    /// Model identifier
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            request_timeout_secs: 120,
        }
    }
}

impl GeminiConfig {
    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Scan defaults applied when the CLI does not override them
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Number of items requested
    pub default_limit: u32,

    /// Whether to request the bilingual analysis
    pub include_analysis: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        let request = ScanRequest::default();
        Self {
            default_limit: request.limit,
            include_analysis: request.include_analysis,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env();
        Ok(config)
    }

    /// Load configuration from a file
    ///
    /// Environment variables still take precedence, so the API key can stay
    /// out of the file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        config.apply_env();
        Ok(config)
    }

    /// Load from `path` when given, otherwise from the environment alone
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::from_env(),
        }
    }

    fn apply_env(&mut self) {
        if let Some(key) = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .ok()
            .filter(|k| !k.trim().is_empty())
        {
            self.gemini.api_key = Some(key);
        }

        if let Ok(endpoint) = std::env::var("MARKETPULSE_GEMINI_ENDPOINT") {
            self.gemini.endpoint = endpoint;
        }

        if let Ok(model) = std::env::var("MARKETPULSE_MODEL") {
            self.gemini.model = model;
        }

        if let Some(temperature) = std::env::var("MARKETPULSE_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse::<f32>().ok())
        {
            self.gemini.temperature = temperature;
        }

        if let Some(timeout) = std::env::var("MARKETPULSE_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            self.gemini.request_timeout_secs = timeout;
        }

        if let Some(limit) = std::env::var("MARKETPULSE_DEFAULT_LIMIT")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
        {
            self.scan.default_limit = limit;
        }

        if let Ok(level) = std::env::var("MARKETPULSE_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Ok(format) = std::env::var("MARKETPULSE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.gemini.endpoint)
            .with_context(|| format!("Invalid Gemini endpoint: {}", self.gemini.endpoint))?;

        if self.gemini.model.trim().is_empty() {
            anyhow::bail!("model must not be empty");
        }

        if !(0.0..=2.0).contains(&self.gemini.temperature) {
            anyhow::bail!("temperature must be between 0.0 and 2.0");
        }

        if self.gemini.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }

        if !ScanRequest::ALLOWED_LIMITS.contains(&self.scan.default_limit) {
            anyhow::bail!(
                "default_limit must be one of {:?}, got {}",
                ScanRequest::ALLOWED_LIMITS,
                self.scan.default_limit
            );
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            anyhow::bail!("log format must be 'text' or 'json'");
        }

        Ok(())
    }

    /// Scan request built from the configured defaults
    pub fn default_request(&self) -> ScanRequest {
        ScanRequest::new(self.scan.default_limit, self.scan.include_analysis)
    }
}
