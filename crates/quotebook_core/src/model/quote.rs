//! Quote record and write-side validation.
//!
//! # Responsibility
//! - Define the `Quote` entity and its wire layout.
//! - Normalize user input (`QuoteDraft`) into canonical field values.
//!
//! # Invariants
//! - `id` is assigned once at creation and never changes.
//! - `quote_text`, `book_title` and `author_name` are trimmed and non-empty.
//! - `tags` holds at most `MAX_TAGS` entries matching `[A-Za-z0-9-]+`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Maximum number of tags a quote may carry.
pub const MAX_TAGS: usize = 5;

static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9-]+$").expect("valid tag regex"));

/// Stable identifier and storage key of a quote.
pub type QuoteId = Uuid;

/// Names the required text fields, used in validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteField {
    QuoteText,
    BookTitle,
    AuthorName,
}

impl QuoteField {
    /// Returns the field name as shown to users.
    pub fn label(self) -> &'static str {
        match self {
            Self::QuoteText => "quote text",
            Self::BookTitle => "book title",
            Self::AuthorName => "author name",
        }
    }
}

/// Validation failures detected before any mutation happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteValidationError {
    /// A required field is empty after trimming.
    EmptyField(QuoteField),
    /// Tag contains characters outside `[A-Za-z0-9-]`.
    InvalidTag(String),
    /// More than `MAX_TAGS` distinct tags were supplied.
    TooManyTags { count: usize, max: usize },
    /// Quote id is the nil UUID.
    NilId,
}

impl Display for QuoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "{} is required", field.label()),
            Self::InvalidTag(tag) => {
                write!(f, "invalid tag `{tag}`: only letters, digits and `-` are allowed")
            }
            Self::TooManyTags { count, max } => {
                write!(f, "too many tags: {count} given, at most {max} allowed")
            }
            Self::NilId => write!(f, "quote id must not be nil"),
        }
    }
}

impl Error for QuoteValidationError {}

/// Canonical quote record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: QuoteId,
    pub quote_text: String,
    pub book_title: String,
    pub author_name: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Quote {
    /// Builds a quote with a fresh id from validated input.
    pub fn create(draft: QuoteDraft) -> Result<Self, QuoteValidationError> {
        Self::with_id(Uuid::new_v4(), draft)
    }

    /// Builds a quote with a caller-provided id.
    ///
    /// Used by store read paths and tests where identity already exists.
    pub fn with_id(id: QuoteId, draft: QuoteDraft) -> Result<Self, QuoteValidationError> {
        if id.is_nil() {
            return Err(QuoteValidationError::NilId);
        }
        let fields = draft.normalize()?;
        Ok(Self {
            id,
            quote_text: fields.quote_text,
            book_title: fields.book_title,
            author_name: fields.author_name,
            tags: fields.tags,
        })
    }

    /// Replaces all mutable fields with already-normalized values.
    pub fn apply(&mut self, fields: QuoteDraft) {
        self.quote_text = fields.quote_text;
        self.book_title = fields.book_title;
        self.author_name = fields.author_name;
        self.tags = fields.tags;
    }

    /// Checks stored field invariants without rewriting values.
    pub fn validate(&self) -> Result<(), QuoteValidationError> {
        if self.id.is_nil() {
            return Err(QuoteValidationError::NilId);
        }
        QuoteDraft::from(self).normalize().map(|_| ())
    }

    /// Returns true when text, book and author match exactly.
    pub fn same_content(&self, quote_text: &str, book_title: &str, author_name: &str) -> bool {
        self.quote_text == quote_text
            && self.book_title == book_title
            && self.author_name == author_name
    }
}

/// User-supplied quote fields for add/update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteDraft {
    pub quote_text: String,
    pub book_title: String,
    pub author_name: String,
    pub tags: Vec<String>,
}

impl QuoteDraft {
    pub fn new(
        quote_text: impl Into<String>,
        book_title: impl Into<String>,
        author_name: impl Into<String>,
    ) -> Self {
        Self {
            quote_text: quote_text.into(),
            book_title: book_title.into(),
            author_name: author_name.into(),
            tags: Vec::new(),
        }
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Trims every field and validates the result.
    ///
    /// Blank tags are dropped and exact duplicates collapse onto their first
    /// position before the tag limit is checked.
    pub fn normalize(self) -> Result<Self, QuoteValidationError> {
        let quote_text = required(self.quote_text, QuoteField::QuoteText)?;
        let book_title = required(self.book_title, QuoteField::BookTitle)?;
        let author_name = required(self.author_name, QuoteField::AuthorName)?;
        let tags = normalize_tags(self.tags)?;
        Ok(Self {
            quote_text,
            book_title,
            author_name,
            tags,
        })
    }
}

impl From<&Quote> for QuoteDraft {
    fn from(value: &Quote) -> Self {
        Self {
            quote_text: value.quote_text.clone(),
            book_title: value.book_title.clone(),
            author_name: value.author_name.clone(),
            tags: value.tags.clone(),
        }
    }
}

fn required(value: String, field: QuoteField) -> Result<String, QuoteValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(QuoteValidationError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

/// Trims, validates and deduplicates tags while keeping input order.
pub fn normalize_tags(tags: Vec<String>) -> Result<Vec<String>, QuoteValidationError> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !TAG_RE.is_match(trimmed) {
            return Err(QuoteValidationError::InvalidTag(trimmed.to_string()));
        }
        if !normalized.iter().any(|existing| existing == trimmed) {
            normalized.push(trimmed.to_string());
        }
    }

    if normalized.len() > MAX_TAGS {
        return Err(QuoteValidationError::TooManyTags {
            count: normalized.len(),
            max: MAX_TAGS,
        });
    }

    Ok(normalized)
}
