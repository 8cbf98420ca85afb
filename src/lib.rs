//! Core library surface for the ABC tune catalog.
//!
//! The pipeline runs leaf to root: `corpus` finds numbered book folders,
//! `parser` pulls tune metadata out of each `.abc` file, `ingest` rebuilds the
//! SQLite `tunes` table through `db`, `query` filters a snapshot of that table,
//! and `ui` serves the interactive menu.
pub mod config;
pub mod corpus;
pub mod db;
pub mod error;
pub mod ingest;
pub mod models;
pub mod parser;
pub mod query;
pub mod ui;

pub use config::{Config, DisplayOptions};
pub use error::CatalogError;
pub use ingest::{load_books_into_db, rebuild_catalog, IngestStats};
pub use models::{StoredTune, TuneRecord};
pub use parser::{parse_abc_file, parse_abc_str};
pub use query::{
    search_tunes, tunes_by_book, tunes_by_key, tunes_by_type, TuneQuery, TuneSnapshot,
};

/// The interactive menu entry point and state container.
pub use ui::{run_app, App};
