//! Author and book grouping with accent-insensitive display ordering.

use crate::model::quote::Quote;
use std::cmp::Ordering;
use std::collections::HashMap;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Aggregate view of one author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorSummary {
    /// Trimmed author name as first seen.
    pub name: String,
    pub quote_count: usize,
    /// Distinct trimmed book titles in first-seen order.
    pub books: Vec<String>,
}

/// Aggregate view of one book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSummary {
    /// Trimmed book title as first seen.
    pub title: String,
    /// Author of the first quote seen for this book.
    pub author_name: String,
    pub quote_count: usize,
}

/// Normalized key used for grouping and name lookups.
pub fn grouping_key(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Display-order comparison.
///
/// Primary order ignores accents and case, so `Émile` sorts between `Banana`
/// and `zed`. Ties fall back to case-folded text, then to the raw string.
pub fn collate(left: &str, right: &str) -> Ordering {
    primary_key(left)
        .cmp(&primary_key(right))
        .then_with(|| left.to_lowercase().cmp(&right.to_lowercase()))
        .then_with(|| left.cmp(right))
}

/// NFD-decomposed, combining marks dropped, lower-cased.
fn primary_key(value: &str) -> String {
    value
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .collect::<String>()
        .to_lowercase()
}

/// Groups quotes by author, sorted by display name.
pub fn summarize_authors(quotes: &[Quote]) -> Vec<AuthorSummary> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut summaries: Vec<AuthorSummary> = Vec::new();

    for quote in quotes {
        let key = grouping_key(&quote.author_name);
        let slot = *index.entry(key).or_insert_with(|| {
            summaries.push(AuthorSummary {
                name: quote.author_name.trim().to_string(),
                quote_count: 0,
                books: Vec::new(),
            });
            summaries.len() - 1
        });

        let summary = &mut summaries[slot];
        summary.quote_count += 1;
        let title = quote.book_title.trim();
        if !summary.books.iter().any(|book| book == title) {
            summary.books.push(title.to_string());
        }
    }

    summaries.sort_by(|left, right| collate(&left.name, &right.name));
    summaries
}

/// Groups quotes by book title, sorted by display title.
pub fn summarize_books(quotes: &[Quote]) -> Vec<BookSummary> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut summaries: Vec<BookSummary> = Vec::new();

    for quote in quotes {
        let key = grouping_key(&quote.book_title);
        let slot = *index.entry(key).or_insert_with(|| {
            summaries.push(BookSummary {
                title: quote.book_title.trim().to_string(),
                author_name: quote.author_name.trim().to_string(),
                quote_count: 0,
            });
            summaries.len() - 1
        });
        summaries[slot].quote_count += 1;
    }

    summaries.sort_by(|left, right| collate(&left.title, &right.title));
    summaries
}

#[cfg(test)]
mod tests {
    use super::{collate, summarize_authors, summarize_books};
    use crate::model::quote::{Quote, QuoteDraft};
    use std::cmp::Ordering;

    fn quote(text: &str, book: &str, author: &str) -> Quote {
        Quote::create(QuoteDraft::new(text, book, author)).unwrap()
    }

    #[test]
    fn authors_group_case_insensitively_with_first_seen_casing() {
        let quotes = vec![
            quote("one", "Meditations", "Marcus Aurelius"),
            quote("two", "Letters", "marcus aurelius"),
            quote("three", "Meditations", "MARCUS AURELIUS"),
            quote("four", "Enchiridion", "Epictetus"),
        ];
        let authors = summarize_authors(&quotes);
        assert_eq!(authors.len(), 2);
        assert_eq!(authors[0].name, "Epictetus");
        assert_eq!(authors[1].name, "Marcus Aurelius");
        assert_eq!(authors[1].quote_count, 3);
        assert_eq!(
            authors[1].books,
            vec!["Meditations".to_string(), "Letters".to_string()]
        );
    }

    #[test]
    fn books_take_author_from_first_quote() {
        let quotes = vec![
            quote("one", "dune", "Frank Herbert"),
            quote("two", "Dune", "Someone Else"),
            quote("three", "Anathem", "Neal Stephenson"),
        ];
        let books = summarize_books(&quotes);
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].title, "Anathem");
        assert_eq!(books[1].title, "dune");
        assert_eq!(books[1].author_name, "Frank Herbert");
        assert_eq!(books[1].quote_count, 2);
    }

    #[test]
    fn collate_ignores_case_before_raw_order() {
        assert_eq!(collate("apple", "Banana"), Ordering::Less);
        assert_eq!(collate("Apple", "apple"), Ordering::Less);
        assert_eq!(collate("same", "same"), Ordering::Equal);
    }

    #[test]
    fn accented_names_sort_with_their_base_letters() {
        let quotes = ["zed", "Émile", "apple", "Banana", "éclair"]
            .into_iter()
            .enumerate()
            .map(|(idx, author)| quote(&format!("q{idx}"), "Book", author))
            .collect::<Vec<_>>();
        let names = summarize_authors(&quotes)
            .into_iter()
            .map(|author| author.name)
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["apple", "Banana", "éclair", "Émile", "zed"]);
    }

    #[test]
    fn collate_breaks_accent_ties_deterministically() {
        assert_eq!(collate("Emile", "Émile"), Ordering::Less);
        assert_eq!(collate("Épictète", "Epictetus"), Ordering::Less);
        assert_eq!(collate("Zola", "Émile Zola"), Ordering::Greater);
    }

    #[test]
    fn empty_collection_has_no_groups() {
        assert!(summarize_authors(&[]).is_empty());
        assert!(summarize_books(&[]).is_empty());
    }
}
