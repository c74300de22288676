use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, REFERER,
    USER_AGENT,
};

use crate::models::NewsCategory;

/// Build browser-like headers for Naver News requests
///
/// The User-Agent is fixed per crawler; the portal rejects requests that
/// arrive without one. Header values that are not valid ASCII are skipped.
///
/// # Examples
///
/// ```
/// use naver_corpus::crawler::headers::build_naver_headers;
///
/// let headers = build_naver_headers(
///     "Mozilla/5.0 (Windows NT 10.0; Win64; x64) Chrome/98.0.4758.102",
///     "https://news.naver.com"
/// );
/// assert!(headers.contains_key("user-agent"));
/// ```
pub fn build_naver_headers(user_agent: &str, referer: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();

    if let Ok(value) = HeaderValue::from_str(user_agent) {
        headers.insert(USER_AGENT, value);
    }
    if let Ok(value) = HeaderValue::from_str(referer) {
        headers.insert(REFERER, value);
    }
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("ko-KR,ko;q=0.9,en-US;q=0.8,en;q=0.7"),
    );
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate"));
    headers.insert(
        HeaderName::from_static("upgrade-insecure-requests"),
        HeaderValue::from_static("1"),
    );

    headers
}

/// Referer for requests made while crawling a category
///
/// # Examples
///
/// ```
/// use naver_corpus::crawler::headers::section_referer;
/// use naver_corpus::models::NewsCategory;
///
/// let referer = section_referer(Some(NewsCategory::Economy));
/// assert_eq!(referer, "https://news.naver.com/main/main.nhn?mode=LSD&mid=shm&sid1=101");
/// ```
pub fn section_referer(category: Option<NewsCategory>) -> String {
    match category {
        Some(category) => format!(
            "https://news.naver.com/main/main.nhn?mode=LSD&mid=shm&sid1={}",
            category.to_section_id()
        ),
        None => String::from("https://news.naver.com/"),
    }
}
