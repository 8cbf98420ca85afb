//! Runtime settings resolved once at startup and passed down explicitly.

use std::path::PathBuf;

use crate::db::default_db_path;
use crate::error::CatalogError;

/// Corpus root used when no directory is given on the command line.
pub const DEFAULT_BOOKS_DIR: &str = "abc_books";

/// How result tables are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Cap on rows shown per result table; `None` shows every row.
    pub max_rows: Option<usize>,
    /// Cap on characters per cell; `None` never truncates.
    pub max_col_width: Option<usize>,
}

impl DisplayOptions {
    /// Shorten `value` to the configured cell width, marking the cut with `…`.
    pub fn fit_cell(&self, value: &str) -> String {
        match self.max_col_width {
            Some(width) if value.chars().count() > width => {
                if width == 0 {
                    return String::new();
                }
                let mut cut: String = value.chars().take(width - 1).collect();
                cut.push('…');
                cut
            }
            _ => value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub books_dir: PathBuf,
    pub db_path: PathBuf,
    /// Reuse the existing table instead of rebuilding it from `books_dir`.
    pub skip_ingest: bool,
    pub display: DisplayOptions,
}

impl Config {
    /// Fill in defaults for anything not given explicitly.
    pub fn resolve(
        books_dir: Option<PathBuf>,
        db_path: Option<PathBuf>,
        skip_ingest: bool,
        display: DisplayOptions,
    ) -> Result<Self, CatalogError> {
        let db_path = match db_path {
            Some(path) => path,
            None => default_db_path()?,
        };
        Ok(Self {
            books_dir: books_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_BOOKS_DIR)),
            db_path,
            skip_ingest,
            display,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_cell_truncates_only_when_limited() {
        let unlimited = DisplayOptions::default();
        assert_eq!(unlimited.fit_cell("The Silver Spear"), "The Silver Spear");

        let narrow = DisplayOptions {
            max_col_width: Some(6),
            ..DisplayOptions::default()
        };
        assert_eq!(narrow.fit_cell("The Silver Spear"), "The S…");
        assert_eq!(narrow.fit_cell("Reel"), "Reel");
    }

    #[test]
    fn explicit_paths_win_over_defaults() {
        let config = Config::resolve(
            Some(PathBuf::from("books")),
            Some(PathBuf::from("out/tunes.db")),
            true,
            DisplayOptions::default(),
        )
        .unwrap();
        assert_eq!(config.books_dir, PathBuf::from("books"));
        assert_eq!(config.db_path, PathBuf::from("out/tunes.db"));
        assert!(config.skip_ingest);
    }
}
