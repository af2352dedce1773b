//! Core logic for Quotebook, a personal quotes library.
//! This crate owns the quote collection, its persistence and the CSV backup
//! format; front ends only call into it.

pub mod config;
pub mod csv;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod store;
pub mod summary;

pub use config::QuotebookConfig;
pub use csv::{export_csv, parse_import, tokenize_line, CsvError, CsvResult};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::quote::{Quote, QuoteDraft, QuoteField, QuoteId, QuoteValidationError, MAX_TAGS};
pub use repo::{ImportReport, QuoteRepository, RepoError, RepoResult};
pub use search::{QuoteMatchScope, SearchQuery, SearchResults};
pub use store::{MemoryQuoteStore, QuoteStore, SqliteQuoteStore, StoreError, StoreResult};
pub use summary::{AuthorSummary, BookSummary};

/// Minimal health-check API for front-end wiring.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
