//! Text normalization helpers for extracted article bodies
//!
//! These work on plain text after markup has been removed and never look at
//! HTML themselves.

/// Whitespace for line trimming and ratio counting
///
/// Unicode `White_Space` plus the information separators `\x1c` to `\x1f`,
/// which count as blanks when splitting and stripping text.
pub fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1C}'..='\u{1F}').contains(&c)
}

/// Trim whitespace from each line and from the whole text
///
/// Lines are split on `\n` only; a stray `\r` ends up trimmed with the rest
/// of the surrounding whitespace. See [`is_space`] for what counts as
/// whitespace.
///
/// # Examples
///
/// ```
/// use naver_corpus::parser::sanitize::trim_lines;
///
/// let text = "\n  Line 1  \n  Line 2  \n\n";
/// assert_eq!(trim_lines(text), "Line 1\nLine 2");
/// ```
pub fn trim_lines(text: &str) -> String {
    text.split('\n')
        .map(|line| line.trim_matches(is_space))
        .collect::<Vec<_>>()
        .join("\n")
        .trim_matches(is_space)
        .to_string()
}

/// Whether `c` ends a line under universal line-boundary rules
///
/// Besides `\n` and `\r` this covers vertical tab, form feed, the
/// file/group/record separators, NEL and the Unicode line and paragraph
/// separators.
pub fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\u{0B}'
            | '\u{0C}'
            | '\u{1C}'
            | '\u{1D}'
            | '\u{1E}'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Split text into lines on every universal line boundary
///
/// `\r\n` counts as one boundary. A trailing boundary does not produce an
/// empty final line.
///
/// # Examples
///
/// ```
/// use naver_corpus::parser::sanitize::split_universal_lines;
///
/// let lines = split_universal_lines("가.\r\n나.\u{2028}다.\n");
/// assert_eq!(lines, vec!["가.", "나.", "다."]);
/// ```
pub fn split_universal_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if !is_line_boundary(c) {
            continue;
        }

        lines.push(&text[start..idx]);
        let mut next = idx + c.len_utf8();

        if c == '\r' {
            if let Some(&(lf_idx, '\n')) = chars.peek() {
                chars.next();
                next = lf_idx + 1;
            }
        }

        start = next;
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }

    lines
}

/// Remove every [`is_space`] character
///
/// # Examples
///
/// ```
/// use naver_corpus::parser::sanitize::remove_whitespace;
///
/// assert_eq!(remove_whitespace(" 가 나\t다\n"), "가나다");
/// ```
pub fn remove_whitespace(text: &str) -> String {
    text.chars().filter(|c| !is_space(*c)).collect()
}
