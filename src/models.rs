//! Domain models that mirror the `tunes` table and get passed between the
//! parser, the store, and the TUI. They stay plain data holders so the other
//! layers can focus on parsing, persistence, and presentation.

/// Metadata scraped from one tune's span of tag lines.
///
/// Every field is optional because ABC sources routinely omit rhythm or meter
/// lines. A record produced by the parser always has at least one field set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TuneRecord {
    /// Text after `T:`.
    pub title: Option<String>,
    /// Text after `R:` (reel, jig, hornpipe, ...).
    pub tune_type: Option<String>,
    /// Text after `M:`.
    pub meter: Option<String>,
    /// Text after `K:`.
    pub key: Option<String>,
}

impl TuneRecord {
    /// True when no tag has been recognized yet.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.tune_type.is_none()
            && self.meter.is_none()
            && self.key.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A tune as read back from the store, carrying the row id and the book it
/// was ingested from.
pub struct StoredTune {
    /// Primary key assigned by SQLite; unique and increasing within one
    /// ingestion run.
    pub id: i64,
    pub title: Option<String>,
    pub tune_type: Option<String>,
    pub meter: Option<String>,
    pub key: Option<String>,
    /// Numeric folder label the source file lived under.
    pub book_number: i64,
}

impl StoredTune {
    /// Pair a parsed record with its persistent identity.
    pub fn from_record(id: i64, record: &TuneRecord, book_number: i64) -> Self {
        Self {
            id,
            title: record.title.clone(),
            tune_type: record.tune_type.clone(),
            meter: record.meter.clone(),
            key: record.key.clone(),
            book_number,
        }
    }

    /// Title used in lists, falling back to a placeholder for untitled tunes.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("(untitled)")
    }
}
