//! marketpulse - Weekly YouTube investment and technology trend scanner
//!
//! Asks a grounded generative search model for this week's trending YouTube
//! topics and parses its delimiter-separated answer into typed records.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`llm`] - Gemini client, prompts and the [`llm::GenerativeSearch`] seam
//! - [`parser`] - Completion parsing into trend items
//! - [`scanner`] - One-shot scan orchestration
//! - [`models`] - Core data structures and types
//! - [`utils`] - Common utilities and helpers
//!
//! # Example
//!
//! ```no_run
//! use marketpulse::config::Config;
//! use marketpulse::scanner::TrendScanner;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let scanner = TrendScanner::from_config(&config)?;
//!     let response = scanner.fetch_trends(10, true).await?;
//!     println!("{} trends", response.parsed_trends.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod parser;
pub mod scanner;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, MarketPulseErrorTrait, Result};
    pub use crate::llm::{GeminiClient, GenerativeSearch};
    pub use crate::models::{
        AnalysisPair, Citation, ParsedResult, ScanRequest, SearchResponse, TrendCategory,
        TrendItem,
    };
    pub use crate::parser::parse_response;
    pub use crate::scanner::TrendScanner;
}

// Direct re-exports for convenience
pub use models::{AnalysisPair, Citation, ParsedResult, SearchResponse, TrendItem};
pub use parser::parse_response;
