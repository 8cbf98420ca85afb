//! Discovery of ABC source files grouped into numbered books.
//!
//! The corpus root holds one directory per book, named by its number
//! (`abc_books/1`, `abc_books/2`, ...). Anything that is not a numeric
//! directory is skipped, as is any file without the `.abc` extension.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::CatalogError;

/// Suffix a file name must end with to be treated as ABC source.
pub const ABC_SUFFIX: &str = ".abc";

/// One numbered book folder and the ABC files inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSource {
    pub number: i64,
    pub path: PathBuf,
    /// Sorted by file name.
    pub files: Vec<PathBuf>,
}

/// Enumerate every book under `root`, ordered by book number.
pub fn discover_books(root: &Path) -> Result<Vec<BookSource>, CatalogError> {
    let entries = fs::read_dir(root).map_err(|err| CatalogError::io(root, err))?;

    let mut books = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| CatalogError::io(root, err))?;
        let path = entry.path();

        let Some(number) = book_number(&path) else {
            debug!("skipping non-book entry {}", path.display());
            continue;
        };

        let files = abc_files(&path)?;
        books.push(BookSource {
            number,
            path,
            files,
        });
    }

    books.sort_by(|a, b| a.number.cmp(&b.number).then_with(|| a.path.cmp(&b.path)));
    Ok(books)
}

/// Interpret a directory name made only of ASCII digits as a book number.
pub fn book_number(path: &Path) -> Option<i64> {
    if !path.is_dir() {
        return None;
    }
    let name = path.file_name()?.to_str()?;
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name.parse().ok()
}

fn abc_files(dir: &Path) -> Result<Vec<PathBuf>, CatalogError> {
    let entries = fs::read_dir(dir).map_err(|err| CatalogError::io(dir, err))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|err| CatalogError::io(dir, err))?.path();
        // Suffix match, so a file named just `.abc` counts too.
        let is_abc = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(ABC_SUFFIX));
        if path.is_file() && is_abc {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
