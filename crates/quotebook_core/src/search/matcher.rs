//! Case-insensitive substring matcher.
//!
//! # Invariants
//! - Queries are trimmed and lower-cased before matching.
//! - A blank query returns every quote and no author/book matches.
//! - No ranking: results follow the order of the underlying collection.

use crate::model::quote::Quote;

/// Which quote fields the quote result list matches against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuoteMatchScope {
    /// Quote text only.
    #[default]
    TextOnly,
    /// Quote text, book title or author name.
    AllFields,
}

/// Search options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Raw user query text.
    pub text: String,
    pub scope: QuoteMatchScope,
}

impl SearchQuery {
    /// Creates a query using the default text-only quote scope.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            scope: QuoteMatchScope::default(),
        }
    }

    pub fn with_scope(mut self, scope: QuoteMatchScope) -> Self {
        self.scope = scope;
        self
    }

    fn normalized(&self) -> String {
        self.text.trim().to_lowercase()
    }
}

/// Independent match sets for one query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults {
    pub quotes: Vec<Quote>,
    /// Distinct trimmed author names.
    pub authors: Vec<String>,
    /// Distinct trimmed book titles.
    pub books: Vec<String>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty() && self.authors.is_empty() && self.books.is_empty()
    }
}

/// Runs `query` against `quotes`.
pub fn search_quotes(quotes: &[Quote], query: &SearchQuery) -> SearchResults {
    let needle = query.normalized();
    if needle.is_empty() {
        return SearchResults {
            quotes: quotes.to_vec(),
            ..SearchResults::default()
        };
    }

    let contains = |value: &str| value.to_lowercase().contains(needle.as_str());
    let mut results = SearchResults::default();

    for quote in quotes {
        let text_hit = contains(&quote.quote_text);
        let book_hit = contains(&quote.book_title);
        let author_hit = contains(&quote.author_name);

        let quote_hit = match query.scope {
            QuoteMatchScope::TextOnly => text_hit,
            QuoteMatchScope::AllFields => text_hit || book_hit || author_hit,
        };
        if quote_hit {
            results.quotes.push(quote.clone());
        }
        if author_hit {
            push_unique(&mut results.authors, quote.author_name.trim());
        }
        if book_hit {
            push_unique(&mut results.books, quote.book_title.trim());
        }
    }

    results
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|existing| existing == value) {
        values.push(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::{search_quotes, QuoteMatchScope, SearchQuery};
    use crate::model::quote::{Quote, QuoteDraft};

    fn library() -> Vec<Quote> {
        vec![
            Quote::create(QuoteDraft::new("Be water.", "Striking Thoughts", "Bruce Lee")).unwrap(),
            Quote::create(QuoteDraft::new(
                "Absorb what is useful.",
                "Tao of Jeet Kune Do",
                "Bruce Lee",
            ))
            .unwrap(),
            Quote::create(QuoteDraft::new("Water is patient.", "Notes", "Anon")).unwrap(),
        ]
    }

    #[test]
    fn author_match_does_not_leak_into_quotes_by_default() {
        let results = search_quotes(&library(), &SearchQuery::new("bruce"));
        assert_eq!(results.authors, vec!["Bruce Lee".to_string()]);
        assert!(results.books.is_empty());
        assert!(results.quotes.is_empty());
    }

    #[test]
    fn all_fields_scope_widens_quote_matches() {
        let query = SearchQuery::new("bruce").with_scope(QuoteMatchScope::AllFields);
        let results = search_quotes(&library(), &query);
        assert_eq!(results.quotes.len(), 2);
    }

    #[test]
    fn query_is_trimmed_and_case_insensitive() {
        let results = search_quotes(&library(), &SearchQuery::new("  WATER "));
        let texts = results
            .quotes
            .iter()
            .map(|quote| quote.quote_text.as_str())
            .collect::<Vec<_>>();
        assert_eq!(texts, vec!["Be water.", "Water is patient."]);
    }

    #[test]
    fn blank_query_returns_everything_without_groups() {
        let results = search_quotes(&library(), &SearchQuery::new("   "));
        assert_eq!(results.quotes.len(), 3);
        assert!(results.authors.is_empty());
        assert!(results.books.is_empty());
    }

    #[test]
    fn unmatched_query_is_empty() {
        assert!(search_quotes(&library(), &SearchQuery::new("zzz")).is_empty());
    }
}
