//! Substring search over the in-memory quote collection.
//!
//! # Responsibility
//! - Match quotes, authors and books independently against one query.
//! - Keep result order tied to first occurrence in the collection.

pub mod matcher;

pub use matcher::{search_quotes, QuoteMatchScope, SearchQuery, SearchResults};
