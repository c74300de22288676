//! CSS selectors for Naver News listing and article pages

use lazy_static::lazy_static;
use scraper::{ElementRef, Selector};

// Helper macro to parse selectors safely at compile time
macro_rules! parse_selector {
    ($s:expr) => {
        Selector::parse($s).expect(concat!("Invalid CSS selector: ", $s))
    };
}

lazy_static! {
    /// Article body container on article pages
    pub static ref BODY: Selector = parse_selector!("#dic_area");

    /// First block of headline links on a listing page
    pub static ref HEADLINE_LIST: Selector = parse_selector!("ul.type06_headline");

    /// Item marker inside a headline block
    pub static ref ITEM: Selector = parse_selector!("dt");

    /// First link of an item
    pub static ref ANCHOR: Selector = parse_selector!("a[href]");
}

/// Whether `element` is a `<dt>` written without any attribute
///
/// Listing items carry the link in a bare `<dt>`; the thumbnail is wrapped in
/// `<dt class="photo">` and must not be counted as a second item.
pub fn is_bare_item(element: &ElementRef<'_>) -> bool {
    element.value().name() == "dt" && element.value().attrs().next().is_none()
}

/// Whether `element` is a `<ul>` list block
pub fn is_list(element: &ElementRef<'_>) -> bool {
    element.value().name() == "ul"
}
