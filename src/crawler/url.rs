//! Article link extraction from listing pages
//!
//! A listing page keeps its headline links in two consecutive `<ul>` blocks:
//! `ul.type06_headline` and the list right after it. Each article is an item
//! whose bare `<dt>` wraps the link.

use scraper::{ElementRef, Html};
use url::Url;

use crate::parser::selectors::{is_bare_item, is_list, ANCHOR, HEADLINE_LIST, ITEM};

/// Article URL extractor for listing pages
#[derive(Debug, Default, Clone, Copy)]
pub struct UrlExtractor;

impl UrlExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Extract article URLs from listing page HTML
    ///
    /// URLs come back in document order and may repeat; callers deduplicate
    /// across pages. A page without a headline block yields an empty vector.
    /// `_reserved` is accepted for interface stability and has no effect.
    ///
    /// # Examples
    ///
    /// ```
    /// use naver_corpus::crawler::url::UrlExtractor;
    ///
    /// let html = r#"
    ///     <ul class="type06_headline">
    ///         <li><dl><dt class="photo"><a href="https://n.news.naver.com/a/1"><img></a></dt>
    ///         <dt><a href="https://n.news.naver.com/a/1">제목</a></dt></dl></li>
    ///     </ul>
    ///     <ul class="type06">
    ///         <li><dl><dt><a href="https://n.news.naver.com/a/2">제목</a></dt></dl></li>
    ///     </ul>"#;
    ///
    /// let urls = UrlExtractor::new().extract_urls(html, false);
    /// assert_eq!(urls, vec!["https://n.news.naver.com/a/1", "https://n.news.naver.com/a/2"]);
    /// ```
    pub fn extract_urls(&self, html: &str, _reserved: bool) -> Vec<String> {
        let document = Html::parse_document(html);

        let Some(headline) = document.select(&HEADLINE_LIST).next() else {
            tracing::trace!("No headline block on listing page");
            return Vec::new();
        };

        let following = headline
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .find(is_list);

        std::iter::once(headline)
            .chain(following)
            .flat_map(|list| list.select(&ITEM))
            .filter(is_bare_item)
            .filter_map(|item| item_href(&item))
            .collect()
    }
}

/// `href` of the first link inside an item, skipping blank items
fn item_href(item: &ElementRef<'_>) -> Option<String> {
    if !item.inner_html().trim().is_empty() {
        item.select(&ANCHOR)
            .next()
            .and_then(|anchor| anchor.value().attr("href"))
            .map(str::to_string)
    } else {
        None
    }
}

/// Whether `url` is an absolute http(s) URL
///
/// # Examples
///
/// ```
/// use naver_corpus::crawler::url::is_fetchable_url;
///
/// assert!(is_fetchable_url("https://n.news.naver.com/mnews/article/001/0014123456"));
/// assert!(!is_fetchable_url("javascript:void(0)"));
/// assert!(!is_fetchable_url("/main/read.nhn"));
/// ```
pub fn is_fetchable_url(url: &str) -> bool {
    Url::parse(url)
        .map(|parsed| matches!(parsed.scheme(), "http" | "https") && parsed.host().is_some())
        .unwrap_or(false)
}
