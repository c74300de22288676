//! Article body extraction
//!
//! Turns an article page into normalized body text through a fixed sequence
//! of gates. Each gate either passes the text on or rejects the page with an
//! [`AbsenceReason`]; nothing is retried and no gate is revisited.

use scraper::{Html, Node};

use crate::config::ExtractConfig;
use crate::models::{AbsenceReason, ExtractedArticle};
use crate::parser::byline::strip_byline;
use crate::parser::ratio::korean_character_ratio;
use crate::parser::sanitize::{split_universal_lines, trim_lines};
use crate::parser::selectors::BODY;

/// Extracts body text from Naver News article pages
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentExtractor {
    include_reporter_name: bool,
    min_korean_ratio: f64,
}

impl Default for ContentExtractor {
    fn default() -> Self {
        Self::from_config(&ExtractConfig::default())
    }
}

impl ContentExtractor {
    pub fn new(include_reporter_name: bool, min_korean_ratio: f64) -> Self {
        Self {
            include_reporter_name,
            min_korean_ratio,
        }
    }

    pub fn from_config(config: &ExtractConfig) -> Self {
        Self::new(config.include_reporter_name, config.min_korean_ratio)
    }

    pub fn include_reporter_name(&self) -> bool {
        self.include_reporter_name
    }

    /// Extract the body of one article page
    ///
    /// Gates, in order:
    /// 1. the page must have a `#dic_area` body container
    /// 2. only the container's own text is kept; text nested in child
    ///    elements (captions, ads, photo credits) is dropped and `<br>`
    ///    becomes a line break
    /// 3. lines are trimmed and the result must not be empty
    /// 4. the Hangul ratio, whitespace ignored, must reach the threshold
    /// 5. only lines ending in `.` are kept
    /// 6. unless reporter names are kept, a leading byline is stripped from
    ///    the first line, which is then joined to the rest without a separator
    /// 7. the result must not be empty and must still pass the ratio gate
    ///
    /// # Examples
    ///
    /// ```
    /// use naver_corpus::parser::content::ContentExtractor;
    /// use naver_corpus::models::{AbsenceReason, ExtractedArticle};
    ///
    /// let extractor = ContentExtractor::new(true, 0.5);
    /// let html = r#"<div id="dic_area">오늘 비가 온다.<br>사진<br>내일도 비가 온다.</div>"#;
    /// assert_eq!(
    ///     extractor.extract(html),
    ///     ExtractedArticle::Present("오늘 비가 온다.\n내일도 비가 온다.".to_string())
    /// );
    ///
    /// let missing = extractor.extract("<html><body>no body</body></html>");
    /// assert_eq!(missing, ExtractedArticle::Absent(AbsenceReason::StructuralMissing));
    /// ```
    pub fn extract(&self, html: &str) -> ExtractedArticle {
        let Some(raw) = body_text(html) else {
            return self.reject(AbsenceReason::StructuralMissing);
        };

        let text = trim_lines(&raw);
        if text.is_empty() {
            return self.reject(AbsenceReason::EmptyAfterStrip);
        }

        if let Some(reason) = self.language_gate(&text) {
            return self.reject(reason);
        }

        let sentences = keep_sentences(&text);

        let content = if self.include_reporter_name {
            sentences
        } else {
            remove_leading_byline(&sentences)
        };

        if content.is_empty() {
            return self.reject(AbsenceReason::EmptyAfterFilter);
        }

        // Filtering can shift the balance toward non-Hangul lines
        if let Some(reason) = self.language_gate(&content) {
            return self.reject(reason);
        }

        ExtractedArticle::Present(content)
    }

    fn language_gate(&self, text: &str) -> Option<AbsenceReason> {
        match korean_character_ratio(text, true) {
            Ok(ratio) if ratio < self.min_korean_ratio => {
                tracing::trace!(ratio, threshold = self.min_korean_ratio, "Hangul ratio too low");
                Some(AbsenceReason::LowKoreanRatio)
            }
            Ok(_) => None,
            Err(_) => Some(AbsenceReason::EmptyAfterStrip),
        }
    }

    fn reject(&self, reason: AbsenceReason) -> ExtractedArticle {
        tracing::debug!(reason = %reason, "Article rejected");
        ExtractedArticle::Absent(reason)
    }
}

/// Direct text children of the body container joined by newlines
///
/// Returns `None` when the page has no body container.
fn body_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let body = document.select(&BODY).next()?;

    let pieces: Vec<&str> = body
        .children()
        .filter_map(|node| match node.value() {
            Node::Text(text) => Some(&**text),
            _ => None,
        })
        .collect();

    Some(pieces.join("\n"))
}

/// Keep non-empty lines whose last character is a period
fn keep_sentences(text: &str) -> String {
    split_universal_lines(text)
        .into_iter()
        .filter(|line| line.ends_with('.'))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strip the byline from the first line and glue the remainder straight on
fn remove_leading_byline(text: &str) -> String {
    match text.split_once('\n') {
        Some((first, rest)) => format!("{}{}", strip_byline(first), rest),
        None => strip_byline(text).into_owned(),
    }
}
