//! Configuration management for naver-corpus crawler
//!
//! This module handles loading and validating configuration from environment variables,
//! files, and command-line arguments.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::models::NewsCategory;

/// User-Agent sent with every request; the portal rejects clients without one
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) Chrome/98.0.4758.102";

/// Upper bound for `crawler.request_timeout_secs`
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 600;

/// Upper bound for `crawler.max_retries`
pub const MAX_RETRIES: u32 = 10;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Crawler configuration
    pub crawler: CrawlerConfig,

    /// Listing page configuration
    pub listing: ListingConfig,

    /// Body extraction configuration
    pub extract: ExtractConfig,

    /// Output configuration
    pub output: OutputConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Crawler-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Number of article workers and in-flight listing requests
    pub max_concurrent_requests: usize,

    /// Rate limit (requests per second)
    pub rate_limit: u32,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// Retries on 429/5xx and network failures
    pub max_retries: u32,

    /// User agent string
    pub user_agent: String,
}

/// Listing page configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Section codes to crawl (e.g. 101 = economy)
    pub categories: Vec<u32>,

    /// Listing pages requested per category and date
    pub max_page: u32,
}

/// Body extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Keep the leading reporter byline in the first line
    pub include_reporter_name: bool,

    /// Minimum share of Hangul syllables for a body to be accepted
    pub min_korean_ratio: f64,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Root directory; one sub-directory per crawled day is created under it
    pub root: PathBuf,
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

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_requests: 8,
            rate_limit: 10,
            request_timeout_secs: 30,
            max_retries: 3,
            user_agent: String::from(DEFAULT_USER_AGENT),
        }
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            categories: NewsCategory::corpus_default()
                .iter()
                .map(NewsCategory::to_section_id)
                .collect(),
            max_page: 200,
        }
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            include_reporter_name: false,
            min_korean_ratio: 0.5,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
        }
    }
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
        let defaults = Self::default();

        let max_concurrent_requests = std::env::var("NAVER_CORPUS_MAX_CONCURRENT_REQUESTS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(defaults.crawler.max_concurrent_requests);

        let rate_limit = std::env::var("NAVER_CORPUS_RATE_LIMIT")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(defaults.crawler.rate_limit);

        let request_timeout_secs = std::env::var("NAVER_CORPUS_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.crawler.request_timeout_secs);

        let max_retries = std::env::var("NAVER_CORPUS_MAX_RETRIES")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(defaults.crawler.max_retries);

        let user_agent = std::env::var("NAVER_CORPUS_USER_AGENT")
            .unwrap_or_else(|_| String::from(DEFAULT_USER_AGENT));

        let categories = match std::env::var("NAVER_CORPUS_CATEGORIES") {
            Ok(raw) => parse_category_list(&raw)?,
            Err(_) => defaults.listing.categories,
        };

        let max_page = std::env::var("NAVER_CORPUS_MAX_PAGE")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(defaults.listing.max_page);

        let include_reporter_name = std::env::var("NAVER_CORPUS_INCLUDE_REPORTER_NAME")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let output_root = std::env::var("NAVER_CORPUS_OUTPUT")
            .map(PathBuf::from)
            .unwrap_or(defaults.output.root);

        let log_level =
            std::env::var("NAVER_CORPUS_LOG_LEVEL").unwrap_or_else(|_| String::from("info"));

        let log_format =
            std::env::var("NAVER_CORPUS_LOG_FORMAT").unwrap_or_else(|_| String::from("text"));

        Ok(Self {
            crawler: CrawlerConfig {
                max_concurrent_requests,
                rate_limit,
                request_timeout_secs,
                max_retries,
                user_agent,
            },
            listing: ListingConfig {
                categories,
                max_page,
            },
            extract: ExtractConfig {
                include_reporter_name,
                ..defaults.extract
            },
            output: OutputConfig { root: output_root },
            logging: LoggingConfig {
                level: log_level,
                format: log_format,
            },
        })
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::with_source(format!("Failed to read config file: {}", path.display()), e)
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.crawler.max_concurrent_requests == 0 {
            return Err(Error::config("max_concurrent_requests must be greater than 0"));
        }

        if self.crawler.rate_limit == 0 {
            return Err(Error::config("rate_limit must be positive"));
        }

        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.crawler.request_timeout_secs) {
            return Err(Error::config(format!(
                "request_timeout_secs must be within 1..={MAX_REQUEST_TIMEOUT_SECS}"
            )));
        }

        if self.crawler.max_retries > MAX_RETRIES {
            return Err(Error::config(format!("max_retries must be at most {MAX_RETRIES}")));
        }

        if self.listing.categories.is_empty() {
            return Err(Error::config("at least one category is required"));
        }

        if let Some(unknown) = self
            .listing
            .categories
            .iter()
            .find(|id| NewsCategory::from_section_id(**id).is_none())
        {
            return Err(Error::config(format!("unknown category code: {unknown}")));
        }

        if self.listing.max_page == 0 {
            return Err(Error::config("max_page must be greater than 0"));
        }

        if !(0.0..=1.0).contains(&self.extract.min_korean_ratio) {
            return Err(Error::config("min_korean_ratio must be within 0.0..=1.0"));
        }

        Ok(())
    }

    /// Configured categories; unknown codes are dropped (rejected by `validate`)
    pub fn categories(&self) -> Vec<NewsCategory> {
        self.listing
            .categories
            .iter()
            .filter_map(|id| NewsCategory::from_section_id(*id))
            .collect()
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.crawler.request_timeout_secs)
    }
}

/// Parse a comma separated category list ("101,economy,사회")
fn parse_category_list(raw: &str) -> Result<Vec<u32>> {
    raw.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| {
            NewsCategory::parse(part)
                .map(|c| c.to_section_id())
                .ok_or_else(|| Error::config(format!("unknown category: {}", part.trim())))
        })
        .collect()
}
