//! Error types for the generative search client

use thiserror::Error;

/// Result type for LLM client operations
pub type LlmResult<T> = Result<T, LlmError>;

/// Errors that can occur while calling the generative search API
#[derive(Error, Debug)]
pub enum LlmError {
    /// No API key configured
    #[error("No API key configured; set GEMINI_API_KEY")]
    MissingApiKey,

    /// Endpoint URL could not be parsed
    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(String),

    /// Transport-level failure (connect, TLS, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("Gemini API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response envelope was not the expected JSON shape
    #[error("Invalid response from Gemini API: {reason}")]
    InvalidResponse { reason: String },
}

impl LlmError {
    /// HTTP status of the failed call, when the API returned one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True for authentication or authorization rejections
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401 | 403)) || matches!(self, Self::MissingApiKey)
    }

    /// True when the API rejected the call for quota or rate limits
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self.status(), Some(429))
    }
}
