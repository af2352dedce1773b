//! Persistence backends for quote records.
//!
//! # Responsibility
//! - Define the key-value record store contract consumed by the repository.
//! - Provide SQLite (durable) and in-memory (ephemeral) implementations.
//!
//! # Invariants
//! - Records are keyed by `Quote::id`.
//! - `create` never overwrites; `upsert` always does.
//! - `delete` of a missing key succeeds.
//! - Operations other than `open` fail with `NotOpened` until `open` succeeds.

use crate::db::DbError;
use crate::model::quote::{Quote, QuoteId};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryQuoteStore;
pub use sqlite::SqliteQuoteStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Backend error for open and record operations.
#[derive(Debug)]
pub enum StoreError {
    /// The backing storage could not be opened or bootstrapped.
    Unavailable(DbError),
    /// Storage opened but lacks a table this store relies on.
    MissingRequiredTable(&'static str),
    /// An operation ran before `open` succeeded.
    NotOpened,
    /// `create` targeted an id that already exists.
    DuplicateKey(QuoteId),
    Db(DbError),
    /// A persisted row could not be decoded into a valid quote.
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(err) => write!(f, "quote storage unavailable: {err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "quote storage is missing required table `{table}`")
            }
            Self::NotOpened => write!(f, "quote storage has not been opened"),
            Self::DuplicateKey(id) => write!(f, "quote already exists: {id}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted quote data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unavailable(err) | Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Record store contract behind `QuoteRepository`.
pub trait QuoteStore {
    /// Opens the backend. Calling it again after success is a no-op.
    fn open(&mut self) -> StoreResult<()>;
    /// Returns every stored quote in insertion order.
    fn get_all(&self) -> StoreResult<Vec<Quote>>;
    /// Inserts a new record, failing with `DuplicateKey` if the id exists.
    fn create(&mut self, quote: &Quote) -> StoreResult<()>;
    /// Inserts or replaces the record with the same id.
    fn upsert(&mut self, quote: &Quote) -> StoreResult<()>;
    /// Removes the record if present.
    fn delete(&mut self, id: QuoteId) -> StoreResult<()>;
}
