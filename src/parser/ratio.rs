//! Korean character ratio used as a language gate for article bodies

use crate::parser::sanitize::remove_whitespace;
use crate::utils::error::RatioError;

/// Whether `c` is a precomposed Hangul syllable (U+AC00 to U+D7A3)
pub fn is_hangul_syllable(c: char) -> bool {
    ('가'..='힣').contains(&c)
}

/// Fraction of characters in `text` that are Hangul syllables
///
/// With `ignore_whitespace` every whitespace character is removed before
/// counting, so layout does not dilute the ratio. Jamo and compatibility jamo
/// are not syllables and count against the ratio.
///
/// # Errors
///
/// Returns `RatioError::DivisionUndefined` when nothing is left to measure.
///
/// # Examples
///
/// ```
/// use naver_corpus::parser::ratio::korean_character_ratio;
///
/// let ratio = korean_character_ratio("한국 ab", true).unwrap();
/// assert_eq!(ratio, 0.5);
/// assert!(korean_character_ratio("   ", true).is_err());
/// ```
pub fn korean_character_ratio(text: &str, ignore_whitespace: bool) -> Result<f64, RatioError> {
    let (total, korean) = if ignore_whitespace {
        let compact = remove_whitespace(text);
        count_chars(&compact)
    } else {
        count_chars(text)
    };

    if total == 0 {
        return Err(RatioError::DivisionUndefined);
    }

    Ok(korean as f64 / total as f64)
}

fn count_chars(text: &str) -> (usize, usize) {
    text.chars().fold((0, 0), |(total, korean), c| {
        (total + 1, korean + usize::from(is_hangul_syllable(c)))
    })
}
