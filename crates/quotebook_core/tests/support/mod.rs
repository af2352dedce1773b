//! Shared fixtures for integration tests.

#![allow(dead_code)]

use quotebook_core::db::DbError;
use quotebook_core::{
    MemoryQuoteStore, Quote, QuoteDraft, QuoteId, QuoteStore, StoreError, StoreResult,
};

/// Memory store that fails selected operations on demand.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryQuoteStore,
    pub fail_open: bool,
    pub fail_create: bool,
    pub fail_upsert: bool,
    pub fail_delete: bool,
    /// Fails `create` only for quotes whose text equals this value.
    pub fail_create_text: Option<String>,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn injected() -> StoreError {
    StoreError::Db(DbError::Sqlite(rusqlite::Error::InvalidQuery))
}

impl QuoteStore for FlakyStore {
    fn open(&mut self) -> StoreResult<()> {
        if self.fail_open {
            return Err(StoreError::Unavailable(DbError::Sqlite(
                rusqlite::Error::InvalidQuery,
            )));
        }
        self.inner.open()
    }

    fn get_all(&self) -> StoreResult<Vec<Quote>> {
        self.inner.get_all()
    }

    fn create(&mut self, quote: &Quote) -> StoreResult<()> {
        let text_matches = self
            .fail_create_text
            .as_deref()
            .is_some_and(|text| text == quote.quote_text);
        if self.fail_create || text_matches {
            return Err(injected());
        }
        self.inner.create(quote)
    }

    fn upsert(&mut self, quote: &Quote) -> StoreResult<()> {
        if self.fail_upsert {
            return Err(injected());
        }
        self.inner.upsert(quote)
    }

    fn delete(&mut self, id: QuoteId) -> StoreResult<()> {
        if self.fail_delete {
            return Err(injected());
        }
        self.inner.delete(id)
    }
}

pub fn draft(text: &str, book: &str, author: &str) -> QuoteDraft {
    QuoteDraft::new(text, book, author)
}
