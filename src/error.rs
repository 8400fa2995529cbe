//! Unified error handling for the marketpulse crate
//!
//! This module provides a unified error type that wraps the domain-specific
//! errors into a single `Error` enum.
//!
//! # Architecture
//!
//! - [`MarketPulseErrorTrait`] - Common interface implemented by the error types
//! - [`ErrorCategory`] - Classification of errors for user-facing messages
//! - [`Error`] - Unified error enum
//!
//! Parsing never produces an error: malformed completions degrade to empty
//! results instead. Every error here ends the current scan; nothing is retried.

use std::io;
use thiserror::Error;

pub use crate::llm::error::LlmError;

/// Common trait for marketpulse error types
pub trait MarketPulseErrorTrait: std::error::Error {
    /// Single human-readable message for the presentation layer
    fn user_message(&self) -> String;

    /// Get the error category
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Transport failures (connect, TLS, timeout)
    Network,
    /// Rejections and malformed envelopes from the generative API
    Llm,
    /// Configuration and credential errors
    Config,
    /// Invalid caller input
    Input,
    /// File I/O errors
    Storage,
    /// Other/unknown errors
    Other,
}

impl ErrorCategory {
    /// Short label for the category
    pub fn label(&self) -> &'static str {
        match self {
            Self::Network => "network error",
            Self::Llm => "AI service error",
            Self::Config => "configuration error",
            Self::Input => "invalid input",
            Self::Storage => "storage error",
            Self::Other => "error",
        }
    }
}

impl MarketPulseErrorTrait for LlmError {
    fn user_message(&self) -> String {
        match self {
            Self::MissingApiKey => {
                "No API key configured. Set GEMINI_API_KEY and try again.".to_string()
            }
            e if e.is_auth_failure() => {
                format!("The API key was rejected. Please check your API key and try again. ({e})")
            }
            e if e.is_quota_exceeded() => {
                format!("API quota exceeded. Please wait and try again later. ({e})")
            }
            e => e.to_string(),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingApiKey | Self::InvalidEndpoint(_) => ErrorCategory::Config,
            Self::Http(_) => ErrorCategory::Network,
            Self::Api { .. } | Self::InvalidResponse { .. } => ErrorCategory::Llm,
        }
    }
}

/// Unified error type for the marketpulse crate
#[derive(Error, Debug)]
pub enum Error {
    /// Generative search API errors
    #[error(transparent)]
    Llm(#[from] LlmError),

    /// Requested item count is not positive
    #[error("Invalid limit {0}: must be a positive integer")]
    InvalidLimit(u32),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl MarketPulseErrorTrait for Error {
    fn user_message(&self) -> String {
        match self {
            Self::Llm(e) => e.user_message(),
            Self::Other(context) => context.clone(),
            e => e.to_string(),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Llm(e) => e.category(),
            Self::InvalidLimit(_) => ErrorCategory::Input,
            Self::Io(_) => ErrorCategory::Storage,
            Self::Json(_) => ErrorCategory::Other,
            Self::Config(_) => ErrorCategory::Config,
            Self::Other(_) => ErrorCategory::Other,
        }
    }
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a generic error with context
    pub fn other(context: impl Into<String>) -> Self {
        Self::Other(context.into())
    }
}

// Conversion from anyhow::Error
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(format!("{err:#}"))
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category() {
        let err: Error = LlmError::MissingApiKey.into();
        assert_eq!(err.category(), ErrorCategory::Config);

        let err: Error = LlmError::Api {
            status: 500,
            message: "Internal".to_string(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Llm);

        assert_eq!(Error::InvalidLimit(0).category(), ErrorCategory::Input);
    }

    #[test]
    fn test_user_message_for_quota() {
        let err: Error = LlmError::Api {
            status: 429,
            message: "RESOURCE_EXHAUSTED: quota".to_string(),
        }
        .into();
        let message = err.user_message();
        assert!(message.starts_with("API quota exceeded"));
        assert!(message.contains("RESOURCE_EXHAUSTED"));
    }

    #[test]
    fn test_user_message_for_missing_key() {
        let err: Error = LlmError::MissingApiKey.into();
        assert!(err.user_message().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_llm_error_is_transparent() {
        let err: Error = LlmError::InvalidResponse {
            reason: "missing field".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Invalid response from Gemini API: missing field"
        );
    }

    #[test]
    fn test_config_error() {
        let err = Error::config("temperature out of range");
        assert_eq!(err.category(), ErrorCategory::Config);
        assert_eq!(err.user_message(), "Config error: temperature out of range");
    }

    #[test]
    fn test_other_error() {
        let err = Error::other("Something went wrong");
        assert_eq!(err.category(), ErrorCategory::Other);
        assert_eq!(err.user_message(), "Something went wrong");
    }

    #[test]
    fn test_anyhow_conversion_keeps_context() {
        let err: Error = anyhow::anyhow!("inner").context("outer").into();
        assert_eq!(err.to_string(), "outer: inner");
    }
}
