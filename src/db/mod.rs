//! Persistence module split across logical submodules.

mod connection;
mod tunes;

pub use connection::{default_db_path, ensure_schema, open_memory_store, open_store, reset_schema};
pub use tunes::{count_tunes, fetch_all_tunes, insert_tune};
