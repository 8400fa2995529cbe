//! Completion parsing and data extraction
//!
//! This module turns the delimiter-separated text produced by the search model
//! into typed [`TrendItem`](crate::models::TrendItem) records. The delimiters are
//! requested in the system instruction but never enforced upstream, so every
//! parser here degrades to defaults instead of failing.

pub mod trends;

pub use trends::{
    parse_response, parse_segment, ANALYSIS_EN_MARKER, ANALYSIS_START_MARKER, ANALYSIS_ZH_MARKER,
    DATE_RANGE_MARKER, ITEM_DELIMITER,
};
