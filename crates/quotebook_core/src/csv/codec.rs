//! Quote-aware CSV encoder, line tokenizer and import parser.

use super::{CsvError, CsvResult};
use crate::model::quote::Quote;
use std::path::Path;

/// Header row written by `export_csv`.
pub const EXPORT_HEADER: &str = "Quote,Book Title,Author Name";

/// Separator placed between exported fields. Import trims the extra space.
const FIELD_SEPARATOR: &str = ", ";

const COLUMN_QUOTE: &str = "quote";
const COLUMN_BOOK_TITLE: &str = "book title";
const COLUMN_AUTHOR_NAME: &str = "author name";
const MIN_ROW_FIELDS: usize = 3;

/// Serializes quotes into CSV text, one row per quote.
///
/// Lines are joined with `\n` and the output has no trailing newline.
pub fn export_csv(quotes: &[Quote]) -> String {
    let mut lines = Vec::with_capacity(quotes.len() + 1);
    lines.push(EXPORT_HEADER.to_string());
    for quote in quotes {
        lines.push(
            [
                quote_field(&quote.quote_text),
                quote_field(&quote.book_title),
                quote_field(&quote.author_name),
            ]
            .join(FIELD_SEPARATOR),
        );
    }
    lines.join("\n")
}

fn quote_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// One tokenized field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvCell {
    /// Decoded, trimmed field text.
    pub text: String,
    /// Whether any part of the field was read inside a quoted section.
    pub quoted: bool,
}

/// Splits one line into fields.
///
/// A `"` toggles quoted mode, except that `""` inside quotes yields one
/// literal quote. Commas outside quotes end a field. Every field is trimmed,
/// which absorbs the space the exporter writes after each comma.
pub fn tokenize_line(line: &str) -> Vec<CsvCell> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => {
                in_quotes = !in_quotes;
                quoted = true;
            }
            ',' if !in_quotes => {
                cells.push(CsvCell {
                    text: current.trim().to_string(),
                    quoted,
                });
                current.clear();
                quoted = false;
            }
            other => current.push(other),
        }
    }
    cells.push(CsvCell {
        text: current.trim().to_string(),
        quoted,
    });

    cells
}

/// Candidate row produced by `parse_import`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRow {
    /// 1-based line number among the non-blank lines, header included.
    pub line: usize,
    pub quote_text: String,
    pub book_title: String,
    pub author_name: String,
}

/// Parser output before duplicate detection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedImport {
    /// Rows whose three target fields are all non-empty.
    pub rows: Vec<ImportRow>,
    /// Rows with fewer fields than required.
    pub skipped_short: usize,
    /// Rows where a target field was empty after cleanup.
    pub skipped_incomplete: usize,
}

#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    quote: usize,
    book_title: usize,
    author_name: usize,
}

impl ColumnMap {
    fn locate(header_line: &str) -> CsvResult<Self> {
        let headers = tokenize_line(header_line)
            .into_iter()
            .map(|cell| cell.text.trim().to_lowercase())
            .collect::<Vec<_>>();
        let position = |name: &str| headers.iter().position(|header| header == name);

        let mut missing = Vec::new();
        let quote = position(COLUMN_QUOTE);
        let book_title = position(COLUMN_BOOK_TITLE);
        let author_name = position(COLUMN_AUTHOR_NAME);
        if quote.is_none() {
            missing.push("Quote");
        }
        if book_title.is_none() {
            missing.push("Book Title");
        }
        if author_name.is_none() {
            missing.push("Author Name");
        }

        match (quote, book_title, author_name) {
            (Some(quote), Some(book_title), Some(author_name)) => Ok(Self {
                quote,
                book_title,
                author_name,
            }),
            _ => Err(CsvError::MalformedHeader { missing }),
        }
    }
}

/// Parses import text into candidate rows.
///
/// # Errors
/// - `EmptyFile` when fewer than two non-blank lines remain.
/// - `MalformedHeader` when any of the three columns is missing.
pub fn parse_import(text: &str) -> CsvResult<ParsedImport> {
    let lines = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>();
    if lines.len() < 2 {
        return Err(CsvError::EmptyFile);
    }

    let columns = ColumnMap::locate(lines[0])?;
    let mut parsed = ParsedImport::default();

    for (offset, line) in lines.iter().enumerate().skip(1) {
        let cells = tokenize_line(line);
        if cells.len() < MIN_ROW_FIELDS {
            parsed.skipped_short += 1;
            continue;
        }

        let (Some(quote_text), Some(book_title), Some(author_name)) = (
            cells.get(columns.quote).map(clean_cell),
            cells.get(columns.book_title).map(clean_cell),
            cells.get(columns.author_name).map(clean_cell),
        ) else {
            parsed.skipped_short += 1;
            continue;
        };

        if quote_text.is_empty() || book_title.is_empty() || author_name.is_empty() {
            parsed.skipped_incomplete += 1;
            continue;
        }

        parsed.rows.push(ImportRow {
            line: offset + 1,
            quote_text,
            book_title,
            author_name,
        });
    }

    Ok(parsed)
}

/// Final per-field text.
///
/// The tokenizer has already removed wrapping quotes, un-doubled escaped
/// ones and trimmed the field, so the decoded text is used as is.
fn clean_cell(cell: &CsvCell) -> String {
    cell.text.clone()
}

/// Reads an import file as UTF-8 text.
pub fn read_import_file(path: impl AsRef<Path>) -> CsvResult<String> {
    std::fs::read_to_string(path).map_err(CsvError::Read)
}

#[cfg(test)]
mod tests {
    use super::{export_csv, parse_import, tokenize_line, EXPORT_HEADER};
    use crate::csv::CsvError;
    use crate::model::quote::{Quote, QuoteDraft};

    fn texts(line: &str) -> Vec<String> {
        tokenize_line(line).into_iter().map(|cell| cell.text).collect()
    }

    #[test]
    fn tokenizer_handles_escaped_quotes_and_inner_commas() {
        assert_eq!(
            texts(r#""He said ""hi"", loudly", "Book A", "Author A""#),
            vec!["He said \"hi\", loudly", "Book A", "Author A"]
        );
    }

    #[test]
    fn tokenizer_trims_unquoted_fields() {
        assert_eq!(texts(" a ,b,  c"), vec!["a", "b", "c"]);
        assert_eq!(texts(""), vec![""]);
        assert_eq!(texts("a,,"), vec!["a", "", ""]);
    }

    #[test]
    fn tokenizer_marks_quoted_cells() {
        let cells = tokenize_line(r#""x", y"#);
        assert!(cells[0].quoted);
        assert!(!cells[1].quoted);
    }

    #[test]
    fn export_writes_header_and_comma_space_rows() {
        let quote = Quote::create(QuoteDraft::new("Say \"no\"", "Book", "Ann")).unwrap();
        let text = export_csv(&[quote]);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(EXPORT_HEADER));
        assert_eq!(lines.next(), Some(r#""Say ""no""", "Book", "Ann""#));
        assert_eq!(lines.next(), None);
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn export_of_empty_collection_is_header_only() {
        assert_eq!(export_csv(&[]), EXPORT_HEADER);
    }

    #[test]
    fn parse_accepts_columns_in_any_order() {
        let parsed = parse_import("author name, QUOTE ,Book Title\nAnn,Words,Tome").unwrap();
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.rows[0].quote_text, "Words");
        assert_eq!(parsed.rows[0].book_title, "Tome");
        assert_eq!(parsed.rows[0].author_name, "Ann");
    }

    #[test]
    fn parse_counts_short_and_incomplete_rows() {
        let text = "Quote,Book Title,Author Name\n\
                    only,two\n\
                    \"\", \"Book\", \"Author\"\n\
                    \n\
                    ok, Book, Author\n";
        let parsed = parse_import(text).unwrap();
        assert_eq!(parsed.skipped_short, 1);
        assert_eq!(parsed.skipped_incomplete, 1);
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.rows[0].line, 4);
    }

    #[test]
    fn parse_rejects_header_only_and_blank_input() {
        assert!(matches!(parse_import(""), Err(CsvError::EmptyFile)));
        assert!(matches!(
            parse_import("Quote,Book Title,Author Name\n   \n"),
            Err(CsvError::EmptyFile)
        ));
    }

    #[test]
    fn parse_reports_missing_columns() {
        let err = parse_import("Quote,Book Title\n\"a\", \"b\", \"c\"").unwrap_err();
        match err {
            CsvError::MalformedHeader { missing } => assert_eq!(missing, vec!["Author Name"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn parse_uses_tokenizer_decoding_without_second_unescape() {
        let parsed = parse_import(
            "Quote,Book Title,Author Name\n\
             \"a \"\"\"\"b\"\"\"\"\", Book, plain \"mixed\" author",
        )
        .unwrap();
        assert_eq!(parsed.rows[0].quote_text, "a \"\"b\"\"");
        assert_eq!(parsed.rows[0].author_name, "plain mixed author");
    }

    #[test]
    fn parse_keeps_leading_and_trailing_literal_quotes() {
        let quote = Quote::create(QuoteDraft::new("\"Stay hungry\"", "B", "A")).unwrap();
        let parsed = parse_import(&export_csv(&[quote])).unwrap();
        assert_eq!(parsed.rows[0].quote_text, "\"Stay hungry\"");
    }
}
