//! Library-level configuration consumed by front ends.
//!
//! # Responsibility
//! - Collect the knobs a front end needs to open a repository: database
//!   location, logging and search scope.
//! - Turn that configuration into a ready `QuoteRepository`.

use crate::logging::{default_log_level, init_logging, LogLevel, LoggingError};
use crate::repo::{QuoteRepository, RepoResult};
use crate::search::QuoteMatchScope;
use crate::store::SqliteQuoteStore;
use std::path::PathBuf;

/// Default database file name when none is configured.
pub const DEFAULT_DB_FILE_NAME: &str = "quotebook.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotebookConfig {
    /// Database file. `None` keeps everything in memory.
    pub db_path: Option<PathBuf>,
    pub log_level: LogLevel,
    /// Logging is enabled only when a directory is set.
    pub log_dir: Option<PathBuf>,
    pub search_scope: QuoteMatchScope,
}

impl Default for QuotebookConfig {
    fn default() -> Self {
        Self {
            db_path: Some(PathBuf::from(DEFAULT_DB_FILE_NAME)),
            log_level: default_log_level(),
            log_dir: None,
            search_scope: QuoteMatchScope::default(),
        }
    }
}

impl QuotebookConfig {
    /// Configuration for a throwaway in-memory session.
    pub fn in_memory() -> Self {
        Self {
            db_path: None,
            ..Self::default()
        }
    }

    /// Starts file logging when `log_dir` is set. Returns whether logging is
    /// active after the call.
    pub fn init_logging(&self) -> Result<bool, LoggingError> {
        let Some(log_dir) = self.log_dir.as_ref() else {
            return Ok(false);
        };
        let log_dir = log_dir.to_str().ok_or_else(|| {
            LoggingError::InvalidDirectory(format!(
                "log_dir must be valid UTF-8, got `{}`",
                log_dir.display()
            ))
        })?;
        init_logging(self.log_level.as_str(), log_dir)?;
        Ok(true)
    }

    /// Opens the configured store and loads every quote.
    pub fn open_repository(&self) -> RepoResult<QuoteRepository<SqliteQuoteStore>> {
        let store = match self.db_path.as_ref() {
            Some(path) => SqliteQuoteStore::new(path),
            None => SqliteQuoteStore::in_memory(),
        };
        Ok(QuoteRepository::open(store)?.with_search_scope(self.search_scope))
    }
}

#[cfg(test)]
mod tests {
    use super::QuotebookConfig;
    use crate::model::quote::QuoteDraft;
    use crate::search::QuoteMatchScope;

    #[test]
    fn in_memory_config_opens_empty_repository() {
        let repo = QuotebookConfig::in_memory().open_repository().unwrap();
        assert!(repo.is_empty());
    }

    #[test]
    fn logging_is_skipped_without_directory() {
        assert!(!QuotebookConfig::in_memory().init_logging().unwrap());
    }

    #[test]
    fn search_scope_is_applied_to_repository() {
        let config = QuotebookConfig {
            search_scope: QuoteMatchScope::AllFields,
            ..QuotebookConfig::in_memory()
        };
        let mut repo = config.open_repository().unwrap();
        repo.add(QuoteDraft::new("Be water.", "Striking Thoughts", "Bruce Lee"))
            .unwrap();
        assert_eq!(repo.search("bruce").quotes.len(), 1);
    }
}
