//! Quote domain model.
//!
//! # Responsibility
//! - Define the canonical quote record persisted by every backend.
//! - Own field normalization and validation rules for writes.
//!
//! # Invariants
//! - Every quote is identified by a stable, non-nil `QuoteId`.
//! - Core text fields are trimmed and non-empty before persistence.

pub mod quote;
