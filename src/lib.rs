//! naver-corpus - Korean news corpus builder
//!
//! Crawls Naver News listing pages for a day, collects article URLs and turns
//! each article page into clean Korean body text, one file per article.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`crawler`] - Listing crawl, fetching and the article worker pool
//! - [`parser`] - Body extraction and text filters
//! - [`models`] - Core data structures and types
//! - [`storage`] - Plain text output files
//! - [`utils`] - Common utilities and helpers
//!
//! # Example
//!
//! ```no_run
//! use naver_corpus::config::Config;
//! use naver_corpus::crawler::{build_listing_requests, DateRange, NaverFetcher, NewsListCrawler};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let range = DateRange::single_day("20240101")?;
//!     let requests = build_listing_requests(&config.categories(), &range, config.listing.max_page)?;
//!
//!     let fetcher = Arc::new(NaverFetcher::from_config(&config)?);
//!     let outcome = NewsListCrawler::new(fetcher, 8).collect_urls(requests).await;
//!     println!("Found {} article URLs", outcome.urls.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod crawler;
pub mod error;
pub mod models;
pub mod parser;
pub mod storage;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::crawler::{DateRange, NaverFetcher, NewsListCrawler, PageFetcher};
    pub use crate::error::{Error, Result};
    pub use crate::models::{AbsenceReason, ArticleUrlSet, ExtractedArticle, NewsCategory};
    pub use crate::parser::ContentExtractor;
    pub use crate::storage::TextWriter;
}

// Direct re-exports for convenience
pub use models::{AbsenceReason, ArticleUrlSet, ExtractedArticle, NewsCategory};
