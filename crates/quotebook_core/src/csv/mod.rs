//! CSV backup format for the quote collection.
//!
//! # Responsibility
//! - Serialize quotes into the fixed `Quote,Book Title,Author Name` layout.
//! - Tokenize and validate import text into candidate rows.
//!
//! # Invariants
//! - Export always writes the three columns in fixed order with every field
//!   quoted and inner quotes doubled.
//! - Import accepts columns in any order and aborts as a whole on
//!   `EmptyFile`, `MalformedHeader` or `Read`.
//! - Embedded newlines inside quoted fields are not supported; input is split
//!   into lines before tokenizing.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod codec;

pub use codec::{
    export_csv, parse_import, read_import_file, tokenize_line, CsvCell, ImportRow, ParsedImport,
    EXPORT_HEADER,
};

pub type CsvResult<T> = Result<T, CsvError>;

/// Import failures that abort the whole import.
#[derive(Debug)]
pub enum CsvError {
    /// Fewer than two non-blank lines (header plus at least one row).
    EmptyFile,
    /// Header lacks one or more required columns.
    MalformedHeader { missing: Vec<&'static str> },
    /// Source text could not be read.
    Read(std::io::Error),
    /// Export text could not be written.
    Write(std::io::Error),
}

impl Display for CsvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFile => write!(f, "CSV file does not contain data"),
            Self::MalformedHeader { missing } => write!(
                f,
                "invalid CSV header: missing column(s) {}; expected Quote, Book Title, Author Name",
                missing.join(", ")
            ),
            Self::Read(err) => write!(f, "failed to read CSV file: {err}"),
            Self::Write(err) => write!(f, "failed to write CSV file: {err}"),
        }
    }
}

impl Error for CsvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read(err) | Self::Write(err) => Some(err),
            _ => None,
        }
    }
}

