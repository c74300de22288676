// Core data structures for naver-corpus crawler

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// News category enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NewsCategory {
    Politics = 100,
    Economy = 101,
    Society = 102,
    Culture = 103,
    World = 104,
    IT = 105,
}

impl NewsCategory {
    /// Create from section ID
    pub fn from_section_id(id: u32) -> Option<Self> {
        match id {
            100 => Some(Self::Politics),
            101 => Some(Self::Economy),
            102 => Some(Self::Society),
            103 => Some(Self::Culture),
            104 => Some(Self::World),
            105 => Some(Self::IT),
            _ => None,
        }
    }

    /// Get section ID for URL building
    pub fn to_section_id(&self) -> u32 {
        *self as u32
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Politics => "politics",
            Self::Economy => "economy",
            Self::Society => "society",
            Self::Culture => "culture",
            Self::World => "world",
            Self::IT => "it",
        }
    }

    /// Get Korean name
    pub fn korean_name(&self) -> &'static str {
        match self {
            Self::Politics => "정치",
            Self::Economy => "경제",
            Self::Society => "사회",
            Self::Culture => "생활/문화",
            Self::World => "세계",
            Self::IT => "IT/과학",
        }
    }

    /// Create from string (section code, English or Korean name)
    pub fn parse(s: &str) -> Option<Self> {
        if let Ok(id) = s.trim().parse::<u32>() {
            return Self::from_section_id(id);
        }

        match s.trim().to_lowercase().as_str() {
            "politics" | "정치" => Some(Self::Politics),
            "economy" | "경제" => Some(Self::Economy),
            "society" | "사회" => Some(Self::Society),
            "culture" | "생활/문화" | "문화" => Some(Self::Culture),
            "world" | "세계" => Some(Self::World),
            "it" | "it/과학" | "과학" => Some(Self::IT),
            _ => None,
        }
    }

    /// Get all categories
    pub fn all() -> Vec<Self> {
        vec![
            Self::Politics,
            Self::Economy,
            Self::Society,
            Self::Culture,
            Self::World,
            Self::IT,
        ]
    }

    /// Categories crawled when none are configured
    ///
    /// World (104) is left out: its bodies are too often mostly English.
    pub fn corpus_default() -> Vec<Self> {
        vec![Self::Economy, Self::Society, Self::Culture, Self::IT]
    }
}

impl std::fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why an article page produced no body text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbsenceReason {
    /// The page has no body container
    StructuralMissing,
    /// The body container held no text once markup was stripped
    EmptyAfterStrip,
    /// Too few Hangul syllables in the body
    LowKoreanRatio,
    /// No complete sentence survived line filtering
    EmptyAfterFilter,
}

impl AbsenceReason {
    /// Stable reason code used in logs and statistics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StructuralMissing => "structural-missing",
            Self::EmptyAfterStrip => "empty-after-strip",
            Self::LowKoreanRatio => "low-korean-ratio",
            Self::EmptyAfterFilter => "empty-after-filter",
        }
    }

    pub fn all() -> [Self; 4] {
        [
            Self::StructuralMissing,
            Self::EmptyAfterStrip,
            Self::LowKoreanRatio,
            Self::EmptyAfterFilter,
        ]
    }
}

impl std::fmt::Display for AbsenceReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of extracting body text from one article page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedArticle {
    /// Normalized body text, never empty
    Present(String),
    /// The page was filtered out
    Absent(AbsenceReason),
}

impl ExtractedArticle {
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Borrow the body text, if any
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Present(text) => Some(text),
            Self::Absent(_) => None,
        }
    }

    /// Reason the page was rejected, if it was
    pub fn reason(&self) -> Option<AbsenceReason> {
        match self {
            Self::Present(_) => None,
            Self::Absent(reason) => Some(*reason),
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Present(text) => Some(text),
            Self::Absent(_) => None,
        }
    }
}

/// Deduplicated article URLs gathered from every listing page of a run
///
/// Filled during the listing phase, then handed to the fetch phase by value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleUrlSet {
    urls: HashSet<String>,
}

impl ArticleUrlSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add URLs from one listing page, returning how many were new
    pub fn extend_from_page<I>(&mut self, urls: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let before = self.urls.len();
        self.urls.extend(urls);
        self.urls.len() - before
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    /// Consume the set into a sorted vector for deterministic job ordering
    pub fn into_sorted_vec(self) -> Vec<String> {
        let mut urls: Vec<String> = self.urls.into_iter().collect();
        urls.sort();
        urls
    }
}

impl FromIterator<String> for ArticleUrlSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            urls: iter.into_iter().collect(),
        }
    }
}
