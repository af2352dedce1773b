//! Command-line front end for the quote library.
//!
//! # Responsibility
//! - Map subcommands onto `QuoteRepository` operations.
//! - Print plain-text results; errors go to stderr with exit status 1.

mod args;

use args::{Cli, Command, QuoteFields};
use clap::Parser;
use log::error;
use quotebook_core::{Quote, QuoteDraft, QuoteRepository, RepoError, SqliteQuoteStore};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = cli.config();

    if let Err(err) = config.init_logging() {
        eprintln!("warning: logging disabled: {err}");
    }

    if let Command::Ping = cli.cmd {
        println!("quotebook_core ping={}", quotebook_core::ping());
        println!("quotebook_core version={}", quotebook_core::core_version());
        return ExitCode::SUCCESS;
    }

    let result = config
        .open_repository()
        .and_then(|mut repo| run(&mut repo, cli.cmd));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_command module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(repo: &mut QuoteRepository<SqliteQuoteStore>, cmd: Command) -> Result<(), RepoError> {
    match cmd {
        Command::Add(fields) => {
            let quote = repo.add(to_draft(fields))?;
            println!("added {}", quote.id);
        }
        Command::Edit { id, fields } => {
            let quote = repo.update(id, to_draft(fields))?;
            print_quote(&quote);
        }
        Command::Remove { id } => {
            repo.remove(id)?;
            println!("removed {id}");
        }
        Command::Show { id } => match repo.find_by_id(id) {
            Some(quote) => print_quote(quote),
            None => println!("no quote with id {id}"),
        },
        Command::List => repo.quotes().iter().for_each(print_quote),
        Command::Search { query } => {
            let results = repo.search(&query);
            for author in &results.authors {
                println!("author: {author}");
            }
            for book in &results.books {
                println!("book: {book}");
            }
            results.quotes.iter().for_each(print_quote);
        }
        Command::Authors => {
            for author in repo.list_authors() {
                println!(
                    "{} ({} {}, {} {})",
                    author.name,
                    author.quote_count,
                    plural(author.quote_count, "quote", "quotes"),
                    author.books.len(),
                    plural(author.books.len(), "book", "books"),
                );
            }
        }
        Command::Books => {
            for book in repo.list_books() {
                println!(
                    "{} by {} ({} {})",
                    book.title,
                    book.author_name,
                    book.quote_count,
                    plural(book.quote_count, "quote", "quotes"),
                );
            }
        }
        Command::Author { name } => repo.quotes_by_author(&name).iter().for_each(print_quote),
        Command::Book { title } => repo.quotes_by_book(&title).iter().for_each(print_quote),
        Command::Export { out } => match out {
            Some(path) => {
                repo.export_csv_file(&path)?;
                println!("exported {} quote(s) to {}", repo.len(), path.display());
            }
            None => println!("{}", repo.export_csv()),
        },
        Command::Import { path } => {
            let report = repo.import_csv_file(&path)?;
            println!(
                "{} quote(s) imported, {} skipped ({} duplicate, {} incomplete, {} short, {} failed)",
                report.accepted.len(),
                report.skipped(),
                report.skipped_duplicate,
                report.skipped_incomplete,
                report.skipped_short,
                report.failed,
            );
        }
        Command::Ping => {}
    }
    Ok(())
}

fn to_draft(fields: QuoteFields) -> QuoteDraft {
    QuoteDraft::new(fields.text, fields.book, fields.author).with_tags(fields.tags)
}

fn print_quote(quote: &Quote) {
    println!(
        "{}  \"{}\"  {} / {}",
        quote.id, quote.quote_text, quote.book_title, quote.author_name
    );
    if !quote.tags.is_empty() {
        println!("    tags: {}", quote.tags.join(", "));
    }
}

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 {
        one
    } else {
        many
    }
}
