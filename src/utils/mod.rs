//! Common utilities and helper functions
//!
//! This module provides shared utilities used across the application.

pub mod error;

/// Truncate a URL for single-line progress output
pub fn truncate_url(url: &str, max_len: usize) -> &str {
    if url.len() <= max_len {
        return url;
    }

    // Back off to a char boundary so multi-byte paths don't split
    let mut end = max_len;
    while !url.is_char_boundary(end) {
        end -= 1;
    }
    &url[..end]
}
