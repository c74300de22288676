//! HTTP fetcher with rate limiting and EUC-KR encoding support
//!
//! This module provides a specialized HTTP fetcher for Naver News pages
//! with features including:
//! - A fixed User-Agent and browser-like headers
//! - Rate limiting with governor
//! - Automatic retry with exponential backoff
//! - EUC-KR encoding detection and conversion (listing pages are served as EUC-KR)
//! - Per-request timeout reported as [`FetchError::Timeout`]

use crate::crawler::headers::build_naver_headers;
use crate::utils::error::FetchError;
use async_trait::async_trait;
use encoding_rs::{EUC_KR, UTF_8};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use reqwest::{Client, Response};
use std::num::NonZeroU32;
use std::time::Duration;
use url::Url;

/// Source of raw page markup
///
/// The crawl driver only needs the decoded body of a page; status handling,
/// retries and decoding live behind this seam.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return its decoded body text
    async fn fetch_page(&self, url: &str, referer: &str) -> Result<String, FetchError>;
}

/// Naver News fetcher
///
/// This fetcher handles the complexities of fetching Naver News pages,
/// including rate limiting, retry logic, and EUC-KR encoding.
pub struct NaverFetcher {
    /// HTTP client with configured timeout and compression
    client: Client,

    /// Rate limiter to control request frequency
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,

    /// User-Agent sent with every request
    user_agent: String,

    /// Maximum number of retry attempts for failed requests
    max_retries: u32,

    /// Base delay in milliseconds for exponential backoff
    base_delay_ms: u64,

    /// Optional base URL override for testing with mock servers
    base_url: Option<String>,
}

impl NaverFetcher {
    /// Create a new fetcher with default settings
    ///
    /// # Arguments
    ///
    /// * `requests_per_second` - Maximum number of requests per second
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn new(requests_per_second: u32) -> Result<Self, FetchError> {
        Self::with_config(
            requests_per_second,
            3,
            Duration::from_secs(30),
            crate::config::DEFAULT_USER_AGENT,
        )
    }

    /// Create a new fetcher with custom configuration
    ///
    /// # Arguments
    ///
    /// * `requests_per_second` - Maximum number of requests per second
    /// * `max_retries` - Maximum number of retry attempts
    /// * `timeout` - Request timeout duration
    /// * `user_agent` - Fixed User-Agent header value
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn with_config(
        requests_per_second: u32,
        max_retries: u32,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .cookie_store(true)
            .build()?;

        let rate = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::per_second(rate);
        let rate_limiter = RateLimiter::direct(quota);

        Ok(Self {
            client,
            rate_limiter,
            user_agent: user_agent.to_string(),
            max_retries,
            base_delay_ms: 1000,
            base_url: None,
        })
    }

    /// Build a fetcher from the crawler section of the configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn from_config(config: &crate::config::Config) -> Result<Self, FetchError> {
        Self::with_config(
            config.crawler.rate_limit,
            config.crawler.max_retries,
            config.request_timeout(),
            &config.crawler.user_agent,
        )
    }

    /// Route every request to `base_url` (used with mock servers)
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.trim_end_matches('/').to_string());
        self
    }

    /// Override the first backoff delay
    #[must_use]
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay_ms = base_delay.as_millis() as u64;
        self
    }

    /// Fetch a page with retry logic and rate limiting
    ///
    /// # Errors
    ///
    /// Returns various `FetchError` variants depending on the failure mode
    pub async fn fetch(&self, url: &str, referer: &str) -> Result<String, FetchError> {
        let full_url = self.resolve_url(url)?;

        // Wait for rate limiter
        self.rate_limiter.until_ready().await;

        self.fetch_with_retry(&full_url, referer).await
    }

    /// Apply the base URL override and check the result parses
    fn resolve_url(&self, url: &str) -> Result<String, FetchError> {
        let full_url = match &self.base_url {
            Some(base) if !url.starts_with("http://") && !url.starts_with("https://") => {
                format!("{base}{url}")
            }
            Some(base) => match Url::parse(url) {
                // Keep path and query, swap the origin for the mock server
                Ok(parsed) => {
                    let query = parsed.query().map(|q| format!("?{q}")).unwrap_or_default();
                    format!("{base}{}{query}", parsed.path())
                }
                Err(_) => return Err(FetchError::InvalidUrl(url.to_string())),
            },
            None => url.to_string(),
        };

        Url::parse(&full_url).map_err(|_| FetchError::InvalidUrl(url.to_string()))?;
        Ok(full_url)
    }

    /// Fetch with exponential backoff retry logic
    async fn fetch_with_retry(&self, url: &str, referer: &str) -> Result<String, FetchError> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            // Apply exponential backoff for retries
            if attempt > 0 {
                let delay = self.backoff_delay_ms(attempt);
                tracing::debug!(url, attempt, delay_ms = delay, "Retrying request");
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }

            let headers = build_naver_headers(&self.user_agent, referer);

            match self.client.get(url).headers(headers).send().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        return self.decode_response(response).await;
                    } else if Self::should_retry(status.as_u16()) {
                        last_error = Some(FetchError::ServerError(status.as_u16()));
                        continue;
                    } else {
                        return Err(FetchError::ServerError(status.as_u16()));
                    }
                }
                Err(e) => {
                    if e.is_timeout() {
                        last_error = Some(FetchError::Timeout);
                    } else {
                        last_error = Some(FetchError::Http(e));
                    }
                }
            }
        }

        // All retries exhausted; a timeout stays a timeout for the caller's logs
        match last_error {
            Some(FetchError::Timeout) => Err(FetchError::Timeout),
            _ => Err(FetchError::MaxRetriesExceeded),
        }
    }

    /// Delay before retry `attempt` (1-based): `base * 2^(attempt-1)`, saturating
    fn backoff_delay_ms(&self, attempt: u32) -> u64 {
        let factor = 2_u64.saturating_pow(attempt.saturating_sub(1));
        self.base_delay_ms.saturating_mul(factor)
    }

    /// Determine if a status code should trigger a retry
    ///
    /// Retry on 429 and 500/502/503/504; client errors such as 403 or 404
    /// fail immediately.
    fn should_retry(status: u16) -> bool {
        matches!(status, 429 | 500 | 502 | 503 | 504)
    }

    /// Decode response body handling both UTF-8 and EUC-KR encodings
    async fn decode_response(&self, response: Response) -> Result<String, FetchError> {
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
            .unwrap_or_default();

        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Http(e)
            }
        })?;

        self.decode_bytes(&bytes, &content_type)
    }

    /// Decode bytes to UTF-8 string with encoding detection
    ///
    /// This method tries multiple strategies:
    /// 1. Check Content-Type header for charset
    /// 2. Check the HTML meta charset in the first KiB
    /// 3. Try UTF-8 decoding
    /// 4. Fallback to EUC-KR if UTF-8 fails
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Decode` if decoding fails with all strategies
    pub fn decode_bytes(&self, bytes: &[u8], content_type: &str) -> Result<String, FetchError> {
        let content_type = content_type.to_lowercase();
        if content_type.contains("charset=euc-kr") || content_type.contains("charset=ks_c_5601") {
            return self.decode_euc_kr(bytes);
        }

        if content_type.contains("charset=utf-8") {
            return self.decode_utf8(bytes);
        }

        let head = String::from_utf8_lossy(&bytes[..bytes.len().min(1024)]).to_lowercase();
        if head.contains("charset=euc-kr") || head.contains("charset=\"euc-kr\"") {
            return self.decode_euc_kr(bytes);
        }

        if let Ok(text) = self.decode_utf8(bytes) {
            return Ok(text);
        }

        self.decode_euc_kr(bytes).map_err(|_| {
            FetchError::Decode("Failed to decode content with UTF-8 or EUC-KR".to_string())
        })
    }

    /// Decode bytes as UTF-8
    fn decode_utf8(&self, bytes: &[u8]) -> Result<String, FetchError> {
        let (cow, _encoding, had_errors) = UTF_8.decode(bytes);

        if had_errors {
            return Err(FetchError::Decode("UTF-8 decoding errors".to_string()));
        }

        Ok(cow.into_owned())
    }

    /// Decode bytes as EUC-KR
    fn decode_euc_kr(&self, bytes: &[u8]) -> Result<String, FetchError> {
        let (cow, _encoding, had_errors) = EUC_KR.decode(bytes);

        if had_errors {
            return Err(FetchError::Decode("EUC-KR decoding errors".to_string()));
        }

        Ok(cow.into_owned())
    }
}

#[async_trait]
impl PageFetcher for NaverFetcher {
    async fn fetch_page(&self, url: &str, referer: &str) -> Result<String, FetchError> {
        self.fetch(url, referer).await
    }
}
