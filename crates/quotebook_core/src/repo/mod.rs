//! Quote repository: the single source of truth for a session.
//!
//! # Responsibility
//! - Own the in-memory quote collection loaded from a `QuoteStore`.
//! - Mirror every mutation into the store so both stay consistent.
//! - Serve reads (search, aggregation, export) from memory.
//!
//! # Invariants
//! - Validation and not-found errors are raised before any mutation.
//! - A failed `add` leaves no trace in memory.
//! - A failed `update` or `remove` may leave memory ahead of the store;
//!   callers resynchronize with `load_all`.

pub mod quote_repo;

pub use quote_repo::{ImportReport, QuoteRepository, RepoError, RepoResult};
