//! Batch ingestion of a book corpus into the tune store.

use std::path::Path;

use log::{debug, info};
use rusqlite::Connection;

use crate::corpus::discover_books;
use crate::db::{insert_tune, reset_schema};
use crate::error::CatalogError;
use crate::parser::parse_abc_file;

/// Summary of one ingestion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub books: usize,
    pub files: usize,
    pub tunes: usize,
}

/// Parse every ABC file under `books_dir` and insert its tunes.
///
/// All inserts share one transaction, so an unreadable file aborts the run
/// without leaving a partially loaded table behind.
pub fn load_books_into_db(
    conn: &Connection,
    books_dir: &Path,
) -> Result<IngestStats, CatalogError> {
    let books = discover_books(books_dir)?;
    let mut stats = IngestStats::default();

    let tx = conn.unchecked_transaction()?;

    for book in &books {
        info!("Processing book {}...", book.number);
        stats.books += 1;

        for file in &book.files {
            let tunes = parse_abc_file(file)?;
            debug!("{}: {} tunes", file.display(), tunes.len());
            for tune in &tunes {
                insert_tune(&tx, tune, book.number)?;
            }
            stats.files += 1;
            stats.tunes += tunes.len();
        }
    }

    tx.commit()?;

    info!(
        "loaded {} tunes from {} files across {} books",
        stats.tunes, stats.files, stats.books
    );
    Ok(stats)
}

/// Drop the existing table and repopulate it from `books_dir`.
pub fn rebuild_catalog(conn: &Connection, books_dir: &Path) -> Result<IngestStats, CatalogError> {
    reset_schema(conn)?;
    load_books_into_db(conn, books_dir)
}
