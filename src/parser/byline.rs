//! Leading byline removal
//!
//! Korean wire copy usually opens with a source tag and reporter credit such
//! as `(서울=연합뉴스) 홍길동 기자 = `. Only the first line of a body is
//! passed here.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// One leading byline, in priority order:
/// 1. source tags followed by reporter clauses (`[..]`/`(..)` then `이름 기자`, optional `=`)
/// 2. a source tag alone
/// 3. reporter clauses alone, optional `=`
static BYLINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?:\[.+\]|\(.+\))(?:\s?(?:[가-힣 ]{2,} (?:기자|특파원),?)+\s*=?)+|(?:\[.+\]|\(.+\))|(?:[가-힣 ]{2,} (?:기자|특파원),?)+\s*=?)\s*",
    )
    .expect("byline pattern is valid")
});

/// Remove one leading byline from `line`
///
/// The rest of the line is returned untouched; a line without a byline is
/// borrowed back as-is.
///
/// # Examples
///
/// ```
/// use naver_corpus::parser::byline::strip_byline;
///
/// assert_eq!(strip_byline("(서울=뉴스) 김기자 기자 = 오늘 비가 온다."), "오늘 비가 온다.");
/// assert_eq!(strip_byline("[속보] 환율 급등."), "환율 급등.");
/// assert_eq!(strip_byline("홍길동 기자 정부가 발표했다."), "정부가 발표했다.");
/// assert_eq!(strip_byline("정부가 오늘 발표했다."), "정부가 오늘 발표했다.");
/// ```
pub fn strip_byline(line: &str) -> Cow<'_, str> {
    BYLINE_REGEX.replace(line, "")
}
