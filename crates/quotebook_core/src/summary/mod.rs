//! Derived author and book aggregates.
//!
//! # Responsibility
//! - Group quotes by case-insensitive trimmed author name or book title.
//! - Keep first-seen casing for display and sort groups for listing.
//!
//! # Invariants
//! - Summaries are recomputed from the full collection and never persisted.
//! - The sum of `quote_count` across groups equals the number of quotes.

pub mod aggregate;

pub use aggregate::{
    collate, grouping_key, summarize_authors, summarize_books, AuthorSummary, BookSummary,
};
