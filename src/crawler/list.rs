//! Listing page crawl
//!
//! A crawl run requests every combination of category, date and page number,
//! extracts article links from each listing page and folds them into one
//! deduplicated [`ArticleUrlSet`].

use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use std::sync::Arc;

use crate::crawler::date::{format_date, DateRange};
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::headers::section_referer;
use crate::crawler::url::UrlExtractor;
use crate::models::{ArticleUrlSet, NewsCategory};
use crate::utils::error::CrawlerError;
use crate::utils::truncate_url;

/// One listing page to request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListingRequest {
    pub category: NewsCategory,
    pub date: NaiveDate,
    pub page: u32,
}

impl ListingRequest {
    pub fn new(category: NewsCategory, date: NaiveDate, page: u32) -> Self {
        Self {
            category,
            date,
            page,
        }
    }

    /// Listing page URL for this request
    pub fn to_url(&self) -> String {
        ListUrlBuilder::main_list(self.category, &format_date(self.date), self.page)
    }

    /// Referer sent with this request
    pub fn referer(&self) -> String {
        section_referer(Some(self.category))
    }
}

/// Every listing request of one run: categories × dates × pages `1..=max_page`
///
/// # Errors
///
/// Returns `CrawlerError::InvalidConfig` when no category is given or
/// `max_page` is zero.
///
/// # Examples
///
/// ```
/// use naver_corpus::crawler::date::DateRange;
/// use naver_corpus::crawler::list::build_listing_requests;
/// use naver_corpus::models::NewsCategory;
///
/// let range = DateRange::parse("20240101", "20240102", 1).unwrap();
/// let requests = build_listing_requests(
///     &[NewsCategory::Economy, NewsCategory::IT],
///     &range,
///     3,
/// ).unwrap();
/// assert_eq!(requests.len(), 2 * 2 * 3);
/// ```
pub fn build_listing_requests(
    categories: &[NewsCategory],
    range: &DateRange,
    max_page: u32,
) -> Result<Vec<ListingRequest>, CrawlerError> {
    if categories.is_empty() {
        return Err(CrawlerError::InvalidConfig(
            "at least one category is required".to_string(),
        ));
    }

    if max_page == 0 {
        return Err(CrawlerError::InvalidConfig(
            "max_page must be greater than 0".to_string(),
        ));
    }

    let dates = range.dates();
    let mut requests = Vec::with_capacity(categories.len() * dates.len() * max_page as usize);

    for &category in categories {
        for &date in &dates {
            for page in 1..=max_page {
                requests.push(ListingRequest::new(category, date, page));
            }
        }
    }

    Ok(requests)
}

/// URL builder for Naver News listing pages
pub struct ListUrlBuilder;

impl ListUrlBuilder {
    /// Build main news list URL
    ///
    /// Format: `https://news.naver.com/main/list.nhn?mode=LSD&mid=shm&sid1={section_id}&date={date}&page={page}`
    ///
    /// # Examples
    ///
    /// ```
    /// use naver_corpus::crawler::list::ListUrlBuilder;
    /// use naver_corpus::models::NewsCategory;
    ///
    /// let url = ListUrlBuilder::main_list(NewsCategory::Economy, "20241215", 1);
    /// assert!(url.contains("sid1=101"));
    /// assert!(url.contains("date=20241215"));
    /// assert!(url.contains("page=1"));
    /// ```
    #[must_use]
    pub fn main_list(category: NewsCategory, date: &str, page: u32) -> String {
        format!(
            "https://news.naver.com/main/list.nhn?mode=LSD&mid=shm&sid1={}&date={}&page={}",
            category.to_section_id(),
            date,
            page
        )
    }
}

/// Result of the listing phase
#[derive(Debug, Default)]
pub struct ListingOutcome {
    /// Deduplicated article URLs
    pub urls: ArticleUrlSet,

    /// Listing pages fetched successfully
    pub pages_fetched: usize,

    /// Listing pages that failed to fetch
    pub pages_failed: usize,

    /// Fetched listing pages that held no article link
    pub empty_pages: usize,
}

/// Listing page crawler
pub struct NewsListCrawler<F: PageFetcher> {
    fetcher: Arc<F>,
    url_extractor: UrlExtractor,
    concurrency: usize,
}

impl<F: PageFetcher> NewsListCrawler<F> {
    /// Create a list crawler keeping at most `concurrency` requests in flight
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use naver_corpus::crawler::fetcher::NaverFetcher;
    /// use naver_corpus::crawler::list::NewsListCrawler;
    /// use std::sync::Arc;
    ///
    /// let fetcher = Arc::new(NaverFetcher::new(10).unwrap());
    /// let crawler = NewsListCrawler::new(fetcher, 8);
    /// ```
    #[must_use]
    pub fn new(fetcher: Arc<F>, concurrency: usize) -> Self {
        Self {
            fetcher,
            url_extractor: UrlExtractor::new(),
            concurrency: concurrency.max(1),
        }
    }

    /// Fetch every listing page and collect the article URL set
    ///
    /// A failed page is logged and skipped; it never aborts the run. The set
    /// is complete when this returns and is not touched again.
    pub async fn collect_urls(&self, requests: Vec<ListingRequest>) -> ListingOutcome {
        let total = requests.len();
        tracing::info!(
            requests = total,
            concurrency = self.concurrency,
            "Starting listing crawl"
        );

        let mut pages = stream::iter(requests)
            .map(|request| async move {
                let url = request.to_url();
                let result = self.fetcher.fetch_page(&url, &request.referer()).await;
                (request, url, result)
            })
            .buffer_unordered(self.concurrency);

        let mut outcome = ListingOutcome::default();

        while let Some((request, url, result)) = pages.next().await {
            match result {
                Ok(html) => {
                    outcome.pages_fetched += 1;

                    let links = self.url_extractor.extract_urls(&html, false);
                    if links.is_empty() {
                        outcome.empty_pages += 1;
                    }

                    let found = links.len();
                    let added = outcome.urls.extend_from_page(links);

                    tracing::debug!(
                        category = %request.category,
                        date = %format_date(request.date),
                        page = request.page,
                        found,
                        added,
                        total = outcome.urls.len(),
                        "Processed listing page"
                    );
                }
                Err(e) => {
                    outcome.pages_failed += 1;
                    tracing::warn!(
                        url = %truncate_url(&url, 120),
                        error = %e,
                        recoverable = e.is_recoverable(),
                        "Listing page failed, skipping"
                    );
                }
            }
        }

        tracing::info!(
            urls = outcome.urls.len(),
            pages_fetched = outcome.pages_fetched,
            pages_failed = outcome.pages_failed,
            empty_pages = outcome.empty_pages,
            "Completed URL collection"
        );

        outcome
    }
}
