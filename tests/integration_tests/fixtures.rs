//! Test fixtures for integration tests
//!
//! Provides sample HTML data and helper functions for testing

use naver_corpus::crawler::fetcher::NaverFetcher;
use std::sync::Arc;
use std::time::Duration;
use wiremock::MockServer;

/// Article body that passes every filter
pub const KOREAN_ARTICLE_HTML: &str = r#"
<!DOCTYPE html>
<html lang="ko">
<head>
    <meta charset="UTF-8">
    <title>경제 뉴스</title>
</head>
<body>
    <h2 class="media_end_head_headline">반도체 국가산단 조성 가속</h2>
    <div id="dic_area" class="go_trans _article_content">
        (서울=연합뉴스) 김철수 기자 = 용인 반도체 국가산단 조성이 가속화되고 있다.<br>
        <span class="end_photo_org"><em class="img_desc">산단 예정지 전경</em></span><br>
        LH와 삼성전자가 부지 매입 계약을 체결했다.<br>
        업계에서는 착공 시점이 앞당겨질 것으로 본다<br>
        kimcs@yna.co.kr
    </div>
</body>
</html>
"#;

/// Expected corpus text for [`KOREAN_ARTICLE_HTML`]
pub const KOREAN_ARTICLE_TEXT: &str =
    "용인 반도체 국가산단 조성이 가속화되고 있다.LH와 삼성전자가 부지 매입 계약을 체결했다.";

/// Article written in English; fails the language gate
pub const ENGLISH_ARTICLE_HTML: &str = r#"
<html><body>
    <div id="dic_area">
        Samsung Electronics reported record quarterly earnings.<br>
        Analysts expect the trend to continue next year.
    </div>
</body></html>
"#;

/// Page without a body container
pub const ERROR_404_HTML: &str = r#"
<!DOCTYPE html>
<html>
<head><title>페이지를 찾을 수 없습니다</title></head>
<body><div class="error_msg">요청하신 페이지를 찾을 수 없습니다.</div></body>
</html>
"#;

/// Truncated markup
pub const MALFORMED_HTML: &str = r#"<html><body><div id="dic_area"><p>닫히지 않은 태그"#;

/// Listing page that has run past the last real page
pub const EMPTY_LISTING_HTML: &str = r#"
<html><body>
    <div class="list_body newsflash_body"><div class="result_none">기사가 없습니다.</div></div>
</body></html>
"#;

/// Generate an article URL on the real portal host
pub fn article_url(office: &str, article_id: &str) -> String {
    format!("https://n.news.naver.com/mnews/article/{office}/{article_id}")
}

/// Path part of [`article_url`], for mock matchers
pub fn article_path(office: &str, article_id: &str) -> String {
    format!("/mnews/article/{office}/{article_id}")
}

/// Listing page linking to `urls` from the headline block
pub fn listing_html(urls: &[String]) -> String {
    let items: String = urls
        .iter()
        .map(|url| format!(r#"<li><dl><dt><a href="{url}">제목</a></dt><dd>요약</dd></dl></li>"#))
        .collect();

    format!(
        r#"<html><body><div class="list_body newsflash_body">
<ul class="type06_headline">{items}</ul>
<ul class="type06"></ul>
</div></body></html>"#
    )
}

/// Fetcher routed to the mock server with short retry delays
pub fn mock_fetcher(server: &MockServer, max_retries: u32, timeout: Duration) -> Arc<NaverFetcher> {
    Arc::new(
        NaverFetcher::with_config(100, max_retries, timeout, "naver-corpus-test")
            .unwrap()
            .with_base_url(&server.uri())
            .with_base_delay(Duration::from_millis(10)),
    )
}

/// Names of the files written to `dir`, sorted
pub fn written_files(dir: &std::path::Path) -> Vec<std::path::PathBuf> {
    let mut files: Vec<_> = std::fs::read_dir(dir)
        .map(|entries| entries.filter_map(|e| e.ok()).map(|e| e.path()).collect())
        .unwrap_or_default();
    files.sort();
    files
}
