use rusqlite::{params, Connection, Row};

use crate::error::CatalogError;
use crate::models::{StoredTune, TuneRecord};

/// Insert one parsed tune tagged with its book number, returning the hydrated
/// row so callers do not have to re-query for the assigned id.
pub fn insert_tune(
    conn: &Connection,
    tune: &TuneRecord,
    book_number: i64,
) -> Result<StoredTune, CatalogError> {
    conn.execute(
        "INSERT INTO tunes (title, type, meter, key, book_number) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![tune.title, tune.tune_type, tune.meter, tune.key, book_number],
    )?;

    let id = conn.last_insert_rowid();
    Ok(StoredTune::from_record(id, tune, book_number))
}

/// Read every stored tune in insertion order.
pub fn fetch_all_tunes(conn: &Connection) -> Result<Vec<StoredTune>, CatalogError> {
    let mut stmt = conn.prepare(
        "SELECT id, title, type, meter, key, book_number
         FROM tunes
         ORDER BY id",
    )?;

    let tunes = stmt
        .query_map([], tune_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(tunes)
}

/// Count rows in the table.
pub fn count_tunes(conn: &Connection) -> Result<i64, CatalogError> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM tunes", [], |row| row.get(0))?;
    Ok(count)
}

fn tune_from_row(row: &Row<'_>) -> rusqlite::Result<StoredTune> {
    // A NULL book number reads back as 0.
    let book_number: Option<i64> = row.get(5)?;
    Ok(StoredTune {
        id: row.get(0)?,
        title: row.get(1)?,
        tune_type: row.get(2)?,
        meter: row.get(3)?,
        key: row.get(4)?,
        book_number: book_number.unwrap_or(0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{open_memory_store, reset_schema};

    fn record(title: &str, key: &str) -> TuneRecord {
        TuneRecord {
            title: Some(title.to_string()),
            key: Some(key.to_string()),
            ..TuneRecord::default()
        }
    }

    #[test]
    fn insert_assigns_increasing_ids() {
        let conn = open_memory_store().unwrap();
        let first = insert_tune(&conn, &record("A", "G"), 1).unwrap();
        let second = insert_tune(&conn, &record("B", "D"), 1).unwrap();
        assert!(second.id > first.id);
        assert_eq!(fetch_all_tunes(&conn).unwrap(), vec![first, second]);
    }

    #[test]
    fn missing_fields_round_trip_as_none() {
        let conn = open_memory_store().unwrap();
        let tune = TuneRecord {
            meter: Some("9/8".to_string()),
            ..TuneRecord::default()
        };
        insert_tune(&conn, &tune, 4).unwrap();

        let stored = fetch_all_tunes(&conn).unwrap();
        assert_eq!(stored[0].title, None);
        assert_eq!(stored[0].tune_type, None);
        assert_eq!(stored[0].meter.as_deref(), Some("9/8"));
        assert_eq!(stored[0].book_number, 4);
    }

    #[test]
    fn null_book_number_reads_as_zero() {
        let conn = open_memory_store().unwrap();
        conn.execute("INSERT INTO tunes (title) VALUES ('Orphan')", [])
            .unwrap();
        assert_eq!(fetch_all_tunes(&conn).unwrap()[0].book_number, 0);
    }

    #[test]
    fn reset_clears_previous_rows() {
        let conn = open_memory_store().unwrap();
        insert_tune(&conn, &record("A", "G"), 1).unwrap();
        reset_schema(&conn).unwrap();
        assert_eq!(count_tunes(&conn).unwrap(), 0);
    }
}
