//! In-process quote store.
//!
//! Mirrors `SqliteQuoteStore` semantics without any I/O. Useful for tests and
//! throwaway sessions.

use super::{QuoteStore, StoreError, StoreResult};
use crate::model::quote::{Quote, QuoteId};

#[derive(Debug, Default)]
pub struct MemoryQuoteStore {
    opened: bool,
    records: Vec<Quote>,
}

impl MemoryQuoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `records`, as if loaded from an
    /// earlier session.
    pub fn with_records(records: Vec<Quote>) -> Self {
        Self {
            opened: false,
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn ensure_open(&self) -> StoreResult<()> {
        if self.opened {
            Ok(())
        } else {
            Err(StoreError::NotOpened)
        }
    }
}

impl QuoteStore for MemoryQuoteStore {
    fn open(&mut self) -> StoreResult<()> {
        self.opened = true;
        Ok(())
    }

    fn get_all(&self) -> StoreResult<Vec<Quote>> {
        self.ensure_open()?;
        Ok(self.records.clone())
    }

    fn create(&mut self, quote: &Quote) -> StoreResult<()> {
        self.ensure_open()?;
        if self.records.iter().any(|record| record.id == quote.id) {
            return Err(StoreError::DuplicateKey(quote.id));
        }
        self.records.push(quote.clone());
        Ok(())
    }

    fn upsert(&mut self, quote: &Quote) -> StoreResult<()> {
        self.ensure_open()?;
        match self.records.iter_mut().find(|record| record.id == quote.id) {
            Some(record) => *record = quote.clone(),
            None => self.records.push(quote.clone()),
        }
        Ok(())
    }

    fn delete(&mut self, id: QuoteId) -> StoreResult<()> {
        self.ensure_open()?;
        self.records.retain(|record| record.id != id);
        Ok(())
    }
}
