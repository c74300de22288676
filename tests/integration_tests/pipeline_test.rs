//! End-to-end pipeline integration tests
//!
//! Tests the complete workflow of one crawl day:
//! 1. Listing pages (mocked) into the URL set
//! 2. Article fetch (mocked)
//! 3. Body extraction and filtering
//! 4. Text file output
//! 5. Statistics tracking

use chrono::NaiveDate;
use naver_corpus::config::Config;
use naver_corpus::crawler::list::{ListingRequest, NewsListCrawler};
use naver_corpus::crawler::pipeline::{CrawlerPipeline, PipelineBuilder, PipelineConfig};
use naver_corpus::models::{AbsenceReason, NewsCategory};
use naver_corpus::parser::ContentExtractor;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::fixtures::{
    article_path, article_url, listing_html, mock_fetcher, written_files, EMPTY_LISTING_HTML,
    ENGLISH_ARTICLE_HTML, KOREAN_ARTICLE_HTML, KOREAN_ARTICLE_TEXT,
};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

async fn mount_article(server: &MockServer, office: &str, id: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(article_path(office, id)))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

// ============================================================================
// Complete Crawl Day
// ============================================================================

#[tokio::test]
async fn test_crawl_day_listing_to_files() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start().await;

    let good = article_url("001", "0014000001");
    let english = article_url("001", "0014000002");
    let slow = article_url("001", "0014000003");

    Mock::given(method("GET"))
        .and(path("/main/list.nhn"))
        .and(query_param("sid1", "101"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_html(&[
            good.clone(),
            english.clone(),
        ])))
        .mount(&server)
        .await;

    // Page 2 repeats one link and adds the slow article
    Mock::given(method("GET"))
        .and(path("/main/list.nhn"))
        .and(query_param("sid1", "101"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(listing_html(&[good.clone(), slow])),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/main/list.nhn"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EMPTY_LISTING_HTML))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(article_path("001", "0014000001")))
        .respond_with(ResponseTemplate::new(200).set_body_string(KOREAN_ARTICLE_HTML))
        .expect(1)
        .mount(&server)
        .await;
    mount_article(&server, "001", "0014000002", ENGLISH_ARTICLE_HTML).await;
    Mock::given(method("GET"))
        .and(path(article_path("001", "0014000003")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(KOREAN_ARTICLE_HTML)
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let fetcher = mock_fetcher(&server, 0, Duration::from_secs(10));

    // Listing phase
    let requests = (1..=3)
        .map(|page| ListingRequest::new(NewsCategory::Economy, day(), page))
        .collect();
    let listing = NewsListCrawler::new(Arc::clone(&fetcher), 2)
        .collect_urls(requests)
        .await;

    assert_eq!(listing.pages_fetched, 3);
    assert_eq!(listing.pages_failed, 0);
    assert_eq!(listing.empty_pages, 1);
    assert_eq!(listing.urls.len(), 3);

    // Article phase
    let output_dir = temp_dir.path().join("20240115");
    let pipeline = PipelineBuilder::new()
        .workers(3)
        .output_dir(output_dir.clone())
        .job_timeout(Duration::from_millis(500))
        .build(fetcher)
        .unwrap();

    let stats = pipeline.run(listing.urls.into_sorted_vec()).await.unwrap();

    assert_eq!(stats.total_jobs, 3);
    assert_eq!(stats.saved_count, 1);
    assert_eq!(stats.rejected_count, 1);
    assert_eq!(stats.rejected_for(AbsenceReason::LowKoreanRatio), 1);
    assert_eq!(stats.failed_count, 1);
    assert_eq!(stats.timeout_count, 1);

    let files = written_files(&output_dir);
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].extension().unwrap(), "txt");
    assert_eq!(std::fs::read_to_string(&files[0]).unwrap(), KOREAN_ARTICLE_TEXT);
}

// ============================================================================
// Output Layout
// ============================================================================

#[tokio::test]
async fn test_pipeline_from_config_writes_under_day() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start().await;

    for id in ["0000000001", "0000000002", "0000000003"] {
        mount_article(&server, "020", id, KOREAN_ARTICLE_HTML).await;
    }

    let mut config = Config::default();
    config.output.root = temp_dir.path().to_path_buf();
    config.crawler.max_concurrent_requests = 2;

    let day_dir = config.output.root.join("20240115");
    let pipeline = CrawlerPipeline::new(
        PipelineConfig::from_config(&config, day_dir.clone()),
        mock_fetcher(&server, 0, Duration::from_secs(5)),
    )
    .unwrap();

    let urls = ["0000000001", "0000000002", "0000000003"]
        .iter()
        .map(|id| article_url("020", id))
        .collect();
    let stats = pipeline.run(urls).await.unwrap();

    assert_eq!(stats.saved_count, 3);
    assert!(stats.bytes_fetched > 0);
    assert_eq!(stats.success_rate(), 1.0);

    // Identical bodies still get distinct files
    let files = written_files(&day_dir);
    assert_eq!(files.len(), 3);
    for file in &files {
        assert_eq!(file.parent().unwrap(), day_dir);
        assert_eq!(std::fs::read_to_string(file).unwrap(), KOREAN_ARTICLE_TEXT);
    }
}

#[tokio::test]
async fn test_reporter_name_kept_when_enabled() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start().await;
    mount_article(&server, "001", "0014000001", KOREAN_ARTICLE_HTML).await;

    let pipeline = PipelineBuilder::new()
        .workers(1)
        .output_dir(temp_dir.path().to_path_buf())
        .extractor(ContentExtractor::new(true, 0.5))
        .build(mock_fetcher(&server, 0, Duration::from_secs(5)))
        .unwrap();

    let stats = pipeline
        .run(vec![article_url("001", "0014000001")])
        .await
        .unwrap();
    assert_eq!(stats.saved_count, 1);

    let files = written_files(temp_dir.path());
    let text = std::fs::read_to_string(&files[0]).unwrap();
    assert!(text.starts_with("(서울=연합뉴스) 김철수 기자 = 용인"));
    assert_eq!(text.lines().count(), 2);
}

#[tokio::test]
async fn test_rejected_articles_write_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start().await;
    mount_article(&server, "001", "0014000002", ENGLISH_ARTICLE_HTML).await;

    let pipeline = PipelineBuilder::new()
        .workers(2)
        .output_dir(temp_dir.path().to_path_buf())
        .build(mock_fetcher(&server, 0, Duration::from_secs(5)))
        .unwrap();

    let stats = pipeline
        .run(vec![article_url("001", "0014000002")])
        .await
        .unwrap();

    assert_eq!(stats.rejected_count, 1);
    assert_eq!(stats.saved_count, 0);
    assert!(written_files(temp_dir.path()).is_empty());
}
