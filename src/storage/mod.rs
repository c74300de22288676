//! Output storage
//!
//! Accepted article bodies are written as plain text files, one per article.

pub mod text;

pub use text::TextWriter;
