//! `QuoteRepository` implementation and its error type.

use crate::csv::{self, CsvError};
use crate::model::quote::{Quote, QuoteDraft, QuoteId, QuoteValidationError};
use crate::search::{search_quotes, QuoteMatchScope, SearchQuery, SearchResults};
use crate::store::{QuoteStore, StoreError};
use crate::summary::{
    grouping_key, summarize_authors, summarize_books, AuthorSummary, BookSummary,
};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::Instant;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error kinds reported by repository operations.
#[derive(Debug)]
pub enum RepoError {
    /// A required field is missing or a tag is malformed.
    Validation(QuoteValidationError),
    /// `update` referenced an unknown id.
    NotFound(QuoteId),
    /// The store could not be opened or loaded.
    StorageUnavailable(StoreError),
    /// One create/upsert/delete call failed against an opened store.
    Persistence(StoreError),
    /// CSV import aborted before any record was written.
    Csv(CsvError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "quote not found: {id}"),
            Self::StorageUnavailable(err) => write!(f, "storage unavailable: {err}"),
            Self::Persistence(err) => write!(f, "persistence failed: {err}"),
            Self::Csv(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::StorageUnavailable(err) | Self::Persistence(err) => Some(err),
            Self::Csv(err) => Some(err),
        }
    }
}

impl From<QuoteValidationError> for RepoError {
    fn from(value: QuoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<CsvError> for RepoError {
    fn from(value: CsvError) -> Self {
        Self::Csv(value)
    }
}

/// Outcome of a best-effort CSV import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Quotes that were persisted and appended to the collection.
    pub accepted: Vec<Quote>,
    /// Rows with too few fields.
    pub skipped_short: usize,
    /// Rows with an empty quote, book or author after cleanup.
    pub skipped_incomplete: usize,
    /// Rows matching an existing quote on text, book and author.
    pub skipped_duplicate: usize,
    /// Rows whose persistence call failed.
    pub failed: usize,
}

impl ImportReport {
    /// Total rows that were not imported.
    pub fn skipped(&self) -> usize {
        self.skipped_short + self.skipped_incomplete + self.skipped_duplicate + self.failed
    }
}

/// In-memory quote collection kept in step with a persistence backend.
pub struct QuoteRepository<S: QuoteStore> {
    store: S,
    quotes: Vec<Quote>,
    scope: QuoteMatchScope,
}

impl<S: QuoteStore> QuoteRepository<S> {
    /// Wraps a store without touching it. Call `load_all` before use.
    pub fn new(store: S) -> Self {
        Self {
            store,
            quotes: Vec::new(),
            scope: QuoteMatchScope::default(),
        }
    }

    /// Opens the store and loads the full collection.
    pub fn open(store: S) -> RepoResult<Self> {
        let mut repo = Self::new(store);
        repo.load_all()?;
        Ok(repo)
    }

    /// Sets the quote match scope used by `search`.
    pub fn with_search_scope(mut self, scope: QuoteMatchScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current in-memory snapshot.
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Replaces the in-memory snapshot with the store contents.
    ///
    /// Opens the store first if needed; both open and read failures surface
    /// as `StorageUnavailable` and leave the previous snapshot untouched.
    pub fn load_all(&mut self) -> RepoResult<&[Quote]> {
        let started_at = Instant::now();
        let loaded = self.store.open().and_then(|()| self.store.get_all());
        self.quotes = match loaded {
            Ok(quotes) => quotes,
            Err(err) => {
                error!(
                    "event=quotes_load module=repo status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(RepoError::StorageUnavailable(err));
            }
        };

        info!(
            "event=quotes_load module=repo status=ok count={} duration_ms={}",
            self.quotes.len(),
            started_at.elapsed().as_millis()
        );
        Ok(&self.quotes)
    }

    /// Validates and persists a new quote.
    ///
    /// The quote is appended before the store call and removed again if the
    /// call fails.
    pub fn add(&mut self, draft: QuoteDraft) -> RepoResult<Quote> {
        let quote = Quote::create(draft)?;
        self.quotes.push(quote.clone());

        if let Err(err) = self.store.create(&quote) {
            self.quotes.retain(|existing| existing.id != quote.id);
            warn!(
                "event=quote_add module=repo status=error id={} error={}",
                quote.id, err
            );
            return Err(RepoError::Persistence(err));
        }

        debug!("event=quote_add module=repo status=ok id={}", quote.id);
        Ok(quote)
    }

    /// Replaces text, book, author and tags of an existing quote.
    ///
    /// On a persistence failure memory keeps the new values.
    pub fn update(&mut self, id: QuoteId, draft: QuoteDraft) -> RepoResult<Quote> {
        let index = self
            .quotes
            .iter()
            .position(|quote| quote.id == id)
            .ok_or(RepoError::NotFound(id))?;
        let fields = draft.normalize()?;

        let quote = &mut self.quotes[index];
        quote.apply(fields);
        let updated = quote.clone();

        if let Err(err) = self.store.upsert(&updated) {
            warn!("event=quote_update module=repo status=error id={id} error={err}");
            return Err(RepoError::Persistence(err));
        }

        debug!("event=quote_update module=repo status=ok id={id}");
        Ok(updated)
    }

    /// Removes a quote. Unknown ids are not an error.
    pub fn remove(&mut self, id: QuoteId) -> RepoResult<()> {
        let before = self.quotes.len();
        self.quotes.retain(|quote| quote.id != id);
        let removed = before != self.quotes.len();

        if let Err(err) = self.store.delete(id) {
            warn!("event=quote_remove module=repo status=error id={id} error={err}");
            return Err(RepoError::Persistence(err));
        }

        debug!("event=quote_remove module=repo status=ok id={id} removed={removed}");
        Ok(())
    }

    pub fn find_by_id(&self, id: QuoteId) -> Option<&Quote> {
        self.quotes.iter().find(|quote| quote.id == id)
    }

    /// Searches with the repository's configured quote scope.
    pub fn search(&self, text: &str) -> SearchResults {
        self.search_with(&SearchQuery::new(text).with_scope(self.scope))
    }

    pub fn search_with(&self, query: &SearchQuery) -> SearchResults {
        search_quotes(&self.quotes, query)
    }

    pub fn list_authors(&self) -> Vec<AuthorSummary> {
        summarize_authors(&self.quotes)
    }

    pub fn list_books(&self) -> Vec<BookSummary> {
        summarize_books(&self.quotes)
    }

    /// Quotes whose trimmed author name equals `name` ignoring case.
    pub fn quotes_by_author(&self, name: &str) -> Vec<Quote> {
        let key = grouping_key(name);
        self.quotes
            .iter()
            .filter(|quote| grouping_key(&quote.author_name) == key)
            .cloned()
            .collect()
    }

    /// Quotes whose trimmed book title equals `title` ignoring case.
    pub fn quotes_by_book(&self, title: &str) -> Vec<Quote> {
        let key = grouping_key(title);
        self.quotes
            .iter()
            .filter(|quote| grouping_key(&quote.book_title) == key)
            .cloned()
            .collect()
    }

    /// Serializes the current snapshot to CSV text.
    pub fn export_csv(&self) -> String {
        csv::export_csv(&self.quotes)
    }

    /// Writes the CSV export to `path`.
    pub fn export_csv_file(&self, path: impl AsRef<Path>) -> RepoResult<()> {
        std::fs::write(path, self.export_csv()).map_err(|err| RepoError::Csv(CsvError::Write(err)))
    }

    /// Imports quotes from CSV text.
    ///
    /// Rows matching a quote that existed before this import (same text,
    /// book and author) are skipped. Each accepted row is persisted one at a
    /// time; a failing row is logged and left out without aborting the rest.
    pub fn import_csv(&mut self, text: &str) -> RepoResult<ImportReport> {
        let started_at = Instant::now();
        let parsed = csv::parse_import(text).inspect_err(|err| {
            warn!("event=quotes_import module=repo status=error error={err}");
        })?;

        let existing_count = self.quotes.len();
        let mut report = ImportReport {
            skipped_short: parsed.skipped_short,
            skipped_incomplete: parsed.skipped_incomplete,
            ..ImportReport::default()
        };

        for row in parsed.rows {
            let duplicate = self.quotes[..existing_count].iter().any(|quote| {
                quote.same_content(&row.quote_text, &row.book_title, &row.author_name)
            });
            if duplicate {
                report.skipped_duplicate += 1;
                continue;
            }

            let quote = match Quote::create(QuoteDraft::new(
                row.quote_text,
                row.book_title,
                row.author_name,
            )) {
                Ok(quote) => quote,
                Err(err) => {
                    debug!(
                        "event=quotes_import module=repo status=skip line={} error={err}",
                        row.line
                    );
                    report.skipped_incomplete += 1;
                    continue;
                }
            };

            match self.store.create(&quote) {
                Ok(()) => {
                    self.quotes.push(quote.clone());
                    report.accepted.push(quote);
                }
                Err(err) => {
                    error!(
                        "event=quotes_import module=repo status=row_error line={} error={err}",
                        row.line
                    );
                    report.failed += 1;
                }
            }
        }

        info!(
            "event=quotes_import module=repo status=ok accepted={} skipped={} failed={} duration_ms={}",
            report.accepted.len(),
            report.skipped(),
            report.failed,
            started_at.elapsed().as_millis()
        );
        Ok(report)
    }

    /// Reads `path` and imports it. Read failures abort before any write.
    pub fn import_csv_file(&mut self, path: impl AsRef<Path>) -> RepoResult<ImportReport> {
        let text = csv::read_import_file(path)?;
        self.import_csv(&text)
    }
}
