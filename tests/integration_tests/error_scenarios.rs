//! Error scenario integration tests
//!
//! Tests various failure modes and error handling:
//! 1. HTTP error responses on listing and article pages
//! 2. Connection failures
//! 3. Malformed and unexpected HTML
//! 4. URLs that cannot be fetched at all

use chrono::NaiveDate;
use naver_corpus::crawler::fetcher::{NaverFetcher, PageFetcher};
use naver_corpus::crawler::list::{ListingRequest, NewsListCrawler};
use naver_corpus::crawler::pipeline::PipelineBuilder;
use naver_corpus::models::{AbsenceReason, NewsCategory};
use naver_corpus::utils::error::FetchError;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::fixtures::{
    article_path, article_url, listing_html, mock_fetcher, written_files, ERROR_404_HTML,
    KOREAN_ARTICLE_HTML, MALFORMED_HTML,
};

// ============================================================================
// Listing Errors
// ============================================================================

#[tokio::test]
async fn test_failed_listing_page_is_skipped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/main/list.nhn"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing_html(&[article_url("001", "0014000001")])),
        )
        .mount(&server)
        .await;

    // Retried once, then given up on
    Mock::given(method("GET"))
        .and(path("/main/list.nhn"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let requests = vec![
        ListingRequest::new(NewsCategory::IT, day, 1),
        ListingRequest::new(NewsCategory::IT, day, 2),
    ];

    let outcome = NewsListCrawler::new(mock_fetcher(&server, 1, Duration::from_secs(5)), 2)
        .collect_urls(requests)
        .await;

    assert_eq!(outcome.pages_fetched, 1);
    assert_eq!(outcome.pages_failed, 1);
    assert!(outcome.urls.contains(&article_url("001", "0014000001")));
}

#[tokio::test]
async fn test_every_listing_page_failing_yields_empty_set() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let requests = (1..=4)
        .map(|page| ListingRequest::new(NewsCategory::Society, day, page))
        .collect();

    let outcome = NewsListCrawler::new(mock_fetcher(&server, 2, Duration::from_secs(5)), 4)
        .collect_urls(requests)
        .await;

    assert_eq!(outcome.pages_failed, 4);
    assert!(outcome.urls.is_empty());
}

// ============================================================================
// Article Errors
// ============================================================================

#[tokio::test]
async fn test_article_http_errors_do_not_stop_the_run() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(article_path("001", "0000000404")))
        .respond_with(ResponseTemplate::new(404).set_body_string(ERROR_404_HTML))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(article_path("001", "0000000500")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(article_path("001", "0000000200")))
        .respond_with(ResponseTemplate::new(200).set_body_string(KOREAN_ARTICLE_HTML))
        .mount(&server)
        .await;

    let pipeline = PipelineBuilder::new()
        .workers(2)
        .output_dir(temp_dir.path().to_path_buf())
        .build(mock_fetcher(&server, 1, Duration::from_secs(5)))
        .unwrap();

    let stats = pipeline
        .run(vec![
            article_url("001", "0000000404"),
            article_url("001", "0000000500"),
            article_url("001", "0000000200"),
        ])
        .await
        .unwrap();

    assert_eq!(stats.saved_count, 1);
    assert_eq!(stats.failed_count, 2);
    assert_eq!(stats.timeout_count, 0);
    assert_eq!(written_files(temp_dir.path()).len(), 1);
}

#[tokio::test]
async fn test_unexpected_pages_are_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(article_path("005", "0000000001")))
        .respond_with(ResponseTemplate::new(200).set_body_string(ERROR_404_HTML))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(article_path("005", "0000000002")))
        .respond_with(ResponseTemplate::new(200).set_body_string(MALFORMED_HTML))
        .mount(&server)
        .await;

    let pipeline = PipelineBuilder::new()
        .workers(2)
        .output_dir(temp_dir.path().to_path_buf())
        .build(mock_fetcher(&server, 0, Duration::from_secs(5)))
        .unwrap();

    let stats = pipeline
        .run(vec![
            article_url("005", "0000000001"),
            article_url("005", "0000000002"),
        ])
        .await
        .unwrap();

    assert_eq!(stats.rejected_count, 2);
    assert_eq!(stats.rejected_for(AbsenceReason::StructuralMissing), 1);
    assert_eq!(stats.rejected_for(AbsenceReason::EmptyAfterStrip), 1);
    assert!(written_files(temp_dir.path()).is_empty());
}

#[tokio::test]
async fn test_unfetchable_urls_fail_without_request() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(KOREAN_ARTICLE_HTML))
        .expect(0)
        .mount(&server)
        .await;

    let pipeline = PipelineBuilder::new()
        .workers(1)
        .output_dir(temp_dir.path().to_path_buf())
        .build(mock_fetcher(&server, 0, Duration::from_secs(5)))
        .unwrap();

    let stats = pipeline
        .run(vec![
            "/main/read.nhn?oid=001".to_string(),
            "javascript:void(0)".to_string(),
        ])
        .await
        .unwrap();

    assert_eq!(stats.failed_count, 2);
    assert_eq!(stats.saved_count, 0);
}

// ============================================================================
// Network Errors
// ============================================================================

#[tokio::test]
async fn test_connection_refused() {
    // Nothing listens on port 1
    let fetcher = NaverFetcher::with_config(10, 1, Duration::from_millis(500), "test")
        .unwrap()
        .with_base_url("http://127.0.0.1:1")
        .with_base_delay(Duration::from_millis(10));

    let result = fetcher
        .fetch_page(&article_url("001", "0014000001"), "https://news.naver.com/")
        .await;

    assert!(matches!(
        result,
        Err(FetchError::MaxRetriesExceeded) | Err(FetchError::Timeout)
    ));
}

#[tokio::test]
async fn test_timeout_is_reported_as_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(KOREAN_ARTICLE_HTML)
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let fetcher: Arc<NaverFetcher> = mock_fetcher(&server, 1, Duration::from_millis(100));
    let result = fetcher
        .fetch_page(&article_url("001", "0014000001"), "https://news.naver.com/")
        .await;

    assert!(matches!(result, Err(FetchError::Timeout)));
}
