//! HTML parsing and text extraction
//!
//! This module turns Naver News article pages into normalized body text and
//! holds the text-level filters the extraction is built from.

pub mod byline;
pub mod content;
pub mod ratio;
pub mod sanitize;
pub mod selectors;

pub use byline::strip_byline;
pub use content::ContentExtractor;
pub use ratio::korean_character_ratio;
