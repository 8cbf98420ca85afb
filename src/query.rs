//! Filtered views over a frozen snapshot of the store.
//!
//! The snapshot is loaded once per session and handed to every query, so
//! nothing here touches SQLite. All matching is case-insensitive.

use rusqlite::Connection;

use crate::db::fetch_all_tunes;
use crate::error::CatalogError;
use crate::models::StoredTune;

/// Every stored tune, read once and kept in id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TuneSnapshot {
    tunes: Vec<StoredTune>,
}

impl TuneSnapshot {
    pub fn new(tunes: Vec<StoredTune>) -> Self {
        Self { tunes }
    }

    /// Materialize the whole `tunes` table.
    pub fn load(conn: &Connection) -> Result<Self, CatalogError> {
        Ok(Self::new(fetch_all_tunes(conn)?))
    }

    pub fn tunes(&self) -> &[StoredTune] {
        &self.tunes
    }

    pub fn len(&self) -> usize {
        self.tunes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tunes.is_empty()
    }
}

/// Tunes ingested from `book_number`.
pub fn tunes_by_book(tunes: &[StoredTune], book_number: i64) -> Vec<&StoredTune> {
    tunes
        .iter()
        .filter(|tune| tune.book_number == book_number)
        .collect()
}

/// Tunes whose rhythm equals `tune_type`, ignoring case.
pub fn tunes_by_type<'a>(tunes: &'a [StoredTune], tune_type: &str) -> Vec<&'a StoredTune> {
    let wanted = tune_type.to_lowercase();
    tunes
        .iter()
        .filter(|tune| equals_ignore_case(tune.tune_type.as_deref(), &wanted))
        .collect()
}

/// Tunes whose title contains `term`, ignoring case. Untitled tunes never
/// match.
pub fn search_tunes<'a>(tunes: &'a [StoredTune], term: &str) -> Vec<&'a StoredTune> {
    let wanted = term.to_lowercase();
    tunes
        .iter()
        .filter(|tune| {
            tune.title
                .as_deref()
                .is_some_and(|title| title.to_lowercase().contains(&wanted))
        })
        .collect()
}

/// Tunes whose key equals `key` exactly, ignoring case. `G` does not match
/// `Gm` or `Gmix`.
pub fn tunes_by_key<'a>(tunes: &'a [StoredTune], key: &str) -> Vec<&'a StoredTune> {
    let wanted = key.to_lowercase();
    tunes
        .iter()
        .filter(|tune| equals_ignore_case(tune.key.as_deref(), &wanted))
        .collect()
}

fn equals_ignore_case(value: Option<&str>, wanted_lower: &str) -> bool {
    value.is_some_and(|value| value.to_lowercase() == wanted_lower)
}

/// One of the menu's views, carrying the user's input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuneQuery {
    Book(i64),
    Type(String),
    Title(String),
    Key(String),
    All,
}

impl TuneQuery {
    /// Run the view against `snapshot`.
    pub fn apply<'a>(&self, snapshot: &'a TuneSnapshot) -> Vec<&'a StoredTune> {
        let tunes = snapshot.tunes();
        match self {
            TuneQuery::Book(number) => tunes_by_book(tunes, *number),
            TuneQuery::Type(tune_type) => tunes_by_type(tunes, tune_type),
            TuneQuery::Title(term) => search_tunes(tunes, term),
            TuneQuery::Key(key) => tunes_by_key(tunes, key),
            TuneQuery::All => tunes.iter().collect(),
        }
    }

    /// Heading for a non-empty result table.
    pub fn heading(&self) -> String {
        match self {
            TuneQuery::Book(number) => format!("Tunes in book {number}"),
            TuneQuery::Type(tune_type) => format!("Tunes of type {tune_type}"),
            TuneQuery::Title(term) => format!("Titles matching \"{term}\""),
            TuneQuery::Key(key) => format!("Tunes in key {key}"),
            TuneQuery::All => "All tunes".to_string(),
        }
    }

    /// Message shown when the view matches nothing.
    pub fn empty_message(&self) -> String {
        match self {
            TuneQuery::Book(number) => format!("No tunes found for book {number}."),
            TuneQuery::Type(tune_type) => format!("No tunes found of type {tune_type}."),
            TuneQuery::Title(_) => "No tunes found matching that term.".to_string(),
            TuneQuery::Key(key) => format!("No tunes found with key {key}."),
            TuneQuery::All => "The catalog is empty.".to_string(),
        }
    }
}
