//! Command-line arguments and their mapping onto `QuotebookConfig`.

use clap::{Parser, Subcommand};
use quotebook_core::config::DEFAULT_DB_FILE_NAME;
use quotebook_core::{default_log_level, LogLevel, QuoteMatchScope, QuotebookConfig};
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Manage a personal quotes library",
    long_about = "Add, search and browse quotes stored in a local SQLite file, and move them in and out as CSV."
)]
pub struct Cli {
    #[arg(
        long,
        env = "QUOTEBOOK_DB",
        default_value = DEFAULT_DB_FILE_NAME,
        value_name = "PATH",
        help = "SQLite database file holding the quotes"
    )]
    pub db: PathBuf,

    #[arg(
        long = "log-level",
        env = "QUOTEBOOK_LOG_LEVEL",
        value_name = "LEVEL",
        value_parser = parse_level,
        help = "trace|debug|info|warn|error [default: debug in debug builds, info in release]"
    )]
    pub log_level: Option<LogLevel>,

    #[arg(
        long = "log-dir",
        env = "QUOTEBOOK_LOG_DIR",
        value_name = "DIR",
        help = "Write rolling logs to DIR (absolute path); logging is off when unset"
    )]
    pub log_dir: Option<PathBuf>,

    #[arg(
        long = "all-fields",
        default_value_t = false,
        help = "Match book and author too when searching quotes"
    )]
    pub all_fields: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

impl Cli {
    pub fn config(&self) -> QuotebookConfig {
        QuotebookConfig {
            db_path: Some(self.db.clone()),
            log_level: self.log_level.unwrap_or_else(default_log_level),
            log_dir: self.log_dir.clone(),
            search_scope: if self.all_fields {
                QuoteMatchScope::AllFields
            } else {
                QuoteMatchScope::TextOnly
            },
        }
    }
}

fn parse_level(value: &str) -> Result<LogLevel, String> {
    value.parse::<LogLevel>().map_err(|err| err.to_string())
}

/// Quote fields shared by `add` and `edit`.
#[derive(clap::Args, Debug, Clone)]
pub struct QuoteFields {
    #[arg(long, help = "Quote text")]
    pub text: String,
    #[arg(long, help = "Book title")]
    pub book: String,
    #[arg(long, help = "Author name")]
    pub author: String,
    #[arg(long = "tag", value_name = "TAG", help = "Tag (repeatable, up to 5)")]
    pub tags: Vec<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(about = "Add a quote")]
    Add(QuoteFields),
    #[command(about = "Replace the fields of an existing quote")]
    Edit {
        id: Uuid,
        #[command(flatten)]
        fields: QuoteFields,
    },
    #[command(about = "Delete a quote (missing ids are ignored)")]
    Remove { id: Uuid },
    #[command(about = "Show one quote")]
    Show { id: Uuid },
    #[command(about = "List every quote")]
    List,
    #[command(about = "Search quotes, authors and books")]
    Search { query: String },
    #[command(about = "List authors with quote and book counts")]
    Authors,
    #[command(about = "List books with their author and quote count")]
    Books,
    #[command(about = "List quotes by one author")]
    Author { name: String },
    #[command(about = "List quotes from one book")]
    Book { title: String },
    #[command(about = "Export all quotes as CSV")]
    Export {
        #[arg(long, value_name = "PATH", help = "Write to PATH instead of stdout")]
        out: Option<PathBuf>,
    },
    #[command(about = "Import quotes from a CSV file")]
    Import { path: PathBuf },
    #[command(about = "Check that the core library is linked")]
    Ping,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;
    use quotebook_core::{default_log_level, LogLevel, QuoteMatchScope};

    #[test]
    fn add_collects_repeated_tags_and_builds_config() {
        let cli = Cli::try_parse_from([
            "quotebook",
            "--db",
            "/tmp/q.sqlite3",
            "--log-level",
            "WARN",
            "--all-fields",
            "add",
            "--text",
            "Be water.",
            "--book",
            "Striking Thoughts",
            "--author",
            "Bruce Lee",
            "--tag",
            "calm",
            "--tag",
            "martial-arts",
        ])
        .unwrap();

        match &cli.cmd {
            Command::Add(fields) => assert_eq!(fields.tags, vec!["calm", "martial-arts"]),
            other => panic!("unexpected command: {other:?}"),
        }
        let config = cli.config();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.search_scope, QuoteMatchScope::AllFields);
        assert_eq!(config.db_path.unwrap().to_str(), Some("/tmp/q.sqlite3"));
    }

    #[test]
    fn log_level_falls_back_to_build_default() {
        let cli = Cli::try_parse_from(["quotebook", "list"]).unwrap();
        if std::env::var_os("QUOTEBOOK_LOG_LEVEL").is_none() {
            assert_eq!(cli.log_level, None);
            assert_eq!(cli.config().log_level, default_log_level());
        }
    }

    #[test]
    fn edit_requires_a_valid_uuid() {
        let result = Cli::try_parse_from([
            "quotebook", "edit", "not-a-uuid", "--text", "t", "--book", "b", "--author", "a",
        ]);
        assert!(result.is_err());
    }
}
