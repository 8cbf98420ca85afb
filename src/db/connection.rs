use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use log::info;
use rusqlite::Connection;

use crate::error::CatalogError;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".abc-tune-catalog";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "tunes.sqlite";

/// Open (or create) the tune store at `path`, creating parent directories as
/// needed. The schema is left untouched; call [`reset_schema`] before an
/// ingestion run.
pub fn open_store(path: &Path) -> Result<Connection, CatalogError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| CatalogError::io(parent, err))?;
    }

    let conn = Connection::open(path)?;
    info!("opened tune store at {}", path.display());
    Ok(conn)
}

/// Open an in-memory store with a fresh `tunes` table. Used by tests.
pub fn open_memory_store() -> Result<Connection, CatalogError> {
    let conn = Connection::open_in_memory()?;
    reset_schema(&conn)?;
    Ok(conn)
}

/// Create the `tunes` table if it does not exist yet.
pub fn ensure_schema(conn: &Connection) -> Result<(), CatalogError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS tunes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT,
            type TEXT,
            meter TEXT,
            key TEXT,
            book_number INTEGER
        )",
        [],
    )?;
    Ok(())
}

/// Drop and recreate the `tunes` table so every ingestion run starts from an
/// empty table and never accumulates duplicates.
pub fn reset_schema(conn: &Connection) -> Result<(), CatalogError> {
    conn.execute("DROP TABLE IF EXISTS tunes", [])?;
    ensure_schema(conn)
}

/// Resolve the default database path inside the user's home.
pub fn default_db_path() -> Result<PathBuf, CatalogError> {
    let base_dirs = BaseDirs::new().ok_or(CatalogError::NoHomeDirectory)?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}
