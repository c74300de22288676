//! Error types for the naver-corpus crawler
//!
//! This module defines custom error types used throughout the application.

use thiserror::Error;

/// Errors that can occur during HTTP fetching operations
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server error with status code
    #[error("Server error: {0}")]
    ServerError(u16),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Maximum retry attempts exceeded
    #[error("Maximum retry attempts exceeded")]
    MaxRetriesExceeded,

    /// Content decoding error
    #[error("Decoding error: {0}")]
    Decode(String),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Whether the failure is transient and the same URL may succeed later
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Http(_) | Self::Timeout | Self::MaxRetriesExceeded => true,
            Self::ServerError(status) => matches!(status, 429 | 500..=599),
            Self::Decode(_) | Self::InvalidUrl(_) => false,
        }
    }
}

/// Errors raised while building a date range
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    /// Date is not a valid YYYYMMDD calendar date
    #[error("Invalid date format: {0}. Expected YYYYMMDD")]
    InvalidDate(String),

    /// End date lies before the start date
    #[error("Invalid range: end {end} is before start {start}")]
    InvalidRange { start: String, end: String },

    /// Step must be at least one day
    #[error("Invalid step: {0} (must be >= 1)")]
    InvalidStep(u32),
}

/// Errors raised by the Korean-ratio computation
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatioError {
    /// The measured text was empty, so the ratio has no denominator
    #[error("Korean ratio is undefined for empty text")]
    DivisionUndefined,
}

/// Errors raised while setting up a crawl run
#[derive(Error, Debug)]
pub enum CrawlerError {
    /// Invalid crawl configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
