//! SQLite-backed quote store.
//!
//! # Responsibility
//! - Persist quotes in `quotes` and their ordered tags in `quote_tags`.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `get_all` returns rows in insertion order (`rowid`).
//! - `upsert` keeps the original row position and replaces tags atomically.
//! - Read paths reject invalid persisted state instead of masking it.

use super::{QuoteStore, StoreError, StoreResult};
use crate::db::{open_db, open_db_in_memory};
use crate::model::quote::{Quote, QuoteId};
use log::{debug, error, info};
use rusqlite::{params, Connection, Transaction};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const REQUIRED_TABLES: [&str; 2] = ["quotes", "quote_tags"];

/// Where a `SqliteQuoteStore` keeps its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    File(PathBuf),
    Memory,
    /// Connection supplied by the caller through `from_connection`.
    Attached,
}

/// Durable quote store on top of a migrated SQLite connection.
pub struct SqliteQuoteStore {
    location: StoreLocation,
    conn: Option<Connection>,
}

impl SqliteQuoteStore {
    /// Creates a file-backed store. Nothing touches disk until `open`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            location: StoreLocation::File(path.as_ref().to_path_buf()),
            conn: None,
        }
    }

    /// Creates a store whose data lives only as long as the connection.
    pub fn in_memory() -> Self {
        Self {
            location: StoreLocation::Memory,
            conn: None,
        }
    }

    /// Wraps an already-migrated connection, validating its schema.
    pub fn from_connection(conn: Connection) -> StoreResult<Self> {
        ensure_schema_ready(&conn)?;
        Ok(Self {
            location: StoreLocation::Attached,
            conn: Some(conn),
        })
    }

    pub fn location(&self) -> &StoreLocation {
        &self.location
    }

    fn conn(&self) -> StoreResult<&Connection> {
        self.conn.as_ref().ok_or(StoreError::NotOpened)
    }

    fn conn_mut(&mut self) -> StoreResult<&mut Connection> {
        self.conn.as_mut().ok_or(StoreError::NotOpened)
    }
}

impl QuoteStore for SqliteQuoteStore {
    fn open(&mut self) -> StoreResult<()> {
        if self.conn.is_some() {
            return Ok(());
        }

        let opened = match &self.location {
            StoreLocation::File(path) => open_db(path),
            StoreLocation::Memory | StoreLocation::Attached => open_db_in_memory(),
        };
        let conn = opened.map_err(StoreError::Unavailable)?;
        ensure_schema_ready(&conn)?;

        info!("event=store_open module=store status=ok backend=sqlite");
        self.conn = Some(conn);
        Ok(())
    }

    fn get_all(&self) -> StoreResult<Vec<Quote>> {
        let conn = self.conn()?;
        let mut tags_by_id = load_all_tags(conn)?;

        let mut stmt = conn.prepare(
            "SELECT
                id,
                quote_text,
                book_title,
                author_name
             FROM quotes
             ORDER BY rowid ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut quotes = Vec::new();
        while let Some(row) = rows.next()? {
            let id_text: String = row.get("id")?;
            let quote = Quote {
                id: parse_quote_id(&id_text)?,
                quote_text: row.get("quote_text")?,
                book_title: row.get("book_title")?,
                author_name: row.get("author_name")?,
                tags: tags_by_id.remove(&id_text).unwrap_or_default(),
            };
            quote
                .validate()
                .map_err(|err| StoreError::InvalidData(format!("quote {id_text}: {err}")))?;
            quotes.push(quote);
        }

        debug!(
            "event=store_get_all module=store status=ok count={}",
            quotes.len()
        );
        Ok(quotes)
    }

    fn create(&mut self, quote: &Quote) -> StoreResult<()> {
        let conn = self.conn_mut()?;
        let tx = conn.transaction()?;
        let id_text = quote.id.to_string();
        if quote_exists(&tx, &id_text)? {
            return Err(StoreError::DuplicateKey(quote.id));
        }

        tx.execute(
            "INSERT INTO quotes (id, quote_text, book_title, author_name)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                id_text,
                quote.quote_text.as_str(),
                quote.book_title.as_str(),
                quote.author_name.as_str(),
            ],
        )?;
        write_tags(&tx, &id_text, &quote.tags)?;
        tx.commit()?;
        Ok(())
    }

    fn upsert(&mut self, quote: &Quote) -> StoreResult<()> {
        let conn = self.conn_mut()?;
        let tx = conn.transaction()?;
        let id_text = quote.id.to_string();

        tx.execute(
            "INSERT INTO quotes (id, quote_text, book_title, author_name)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (id) DO UPDATE SET
                quote_text = excluded.quote_text,
                book_title = excluded.book_title,
                author_name = excluded.author_name,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![
                id_text,
                quote.quote_text.as_str(),
                quote.book_title.as_str(),
                quote.author_name.as_str(),
            ],
        )?;
        tx.execute(
            "DELETE FROM quote_tags WHERE quote_id = ?1;",
            [id_text.as_str()],
        )?;
        write_tags(&tx, &id_text, &quote.tags)?;
        tx.commit()?;
        Ok(())
    }

    fn delete(&mut self, id: QuoteId) -> StoreResult<()> {
        let conn = self.conn()?;
        let changed = conn.execute("DELETE FROM quotes WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            debug!("event=store_delete module=store status=noop reason=missing_id");
        }
        Ok(())
    }
}

fn write_tags(tx: &Transaction<'_>, quote_id: &str, tags: &[String]) -> StoreResult<()> {
    for (position, tag) in tags.iter().enumerate() {
        tx.execute(
            "INSERT INTO quote_tags (quote_id, position, tag) VALUES (?1, ?2, ?3);",
            params![quote_id, position as i64, tag.as_str()],
        )?;
    }
    Ok(())
}

fn load_all_tags(conn: &Connection) -> StoreResult<HashMap<String, Vec<String>>> {
    let mut stmt = conn.prepare(
        "SELECT quote_id, tag
         FROM quote_tags
         ORDER BY quote_id ASC, position ASC;",
    )?;
    let mut rows = stmt.query([])?;
    let mut tags: HashMap<String, Vec<String>> = HashMap::new();
    while let Some(row) = rows.next()? {
        let quote_id: String = row.get(0)?;
        let tag: String = row.get(1)?;
        tags.entry(quote_id).or_default().push(tag);
    }
    Ok(tags)
}

fn quote_exists(tx: &Transaction<'_>, quote_id: &str) -> StoreResult<bool> {
    let exists: i64 = tx.query_row(
        "SELECT EXISTS(SELECT 1 FROM quotes WHERE id = ?1);",
        [quote_id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn parse_quote_id(value: &str) -> StoreResult<QuoteId> {
    Uuid::parse_str(value)
        .map_err(|_| StoreError::InvalidData(format!("invalid uuid value `{value}` in quotes.id")))
}

fn ensure_schema_ready(conn: &Connection) -> StoreResult<()> {
    for table in REQUIRED_TABLES {
        if !table_exists(conn, table)? {
            error!("event=store_open module=store status=error error_code=missing_table table={table}");
            return Err(StoreError::MissingRequiredTable(table));
        }
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
