//! Integration tests module
//!
//! End-to-end tests of a crawl day against a mock portal: listing pages are
//! collected into the URL set, article pages go through the worker pipeline
//! and land as text files.

pub mod error_scenarios;
pub mod fixtures;
pub mod pipeline_test;
