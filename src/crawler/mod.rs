//! Web crawling functionality with rate limiting
//!
//! A run has two phases. The listing phase walks every category, date and
//! page and builds the article URL set ([`list`]). The article phase feeds
//! that set through a bounded worker pool that fetches, extracts and stores
//! each article ([`pipeline`]).

pub mod date;
pub mod fetcher;
pub mod headers;
pub mod list;
pub mod pipeline;
pub mod url;

pub use date::DateRange;
pub use fetcher::{NaverFetcher, PageFetcher};
pub use list::{build_listing_requests, ListingOutcome, ListingRequest, NewsListCrawler};
pub use pipeline::{CrawlerPipeline, PipelineBuilder, PipelineConfig, StatsSnapshot};
pub use url::UrlExtractor;
