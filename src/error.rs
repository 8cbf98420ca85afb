use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by the parsing, walking, and persistence layers.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A source file or directory could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("could not locate home directory")]
    NoHomeDirectory,
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
