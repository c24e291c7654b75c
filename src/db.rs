// src/db.rs

use crate::error::Result;
use crate::models::{EntryId, EntryRecord, LogEntry};
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection};
use std::path::Path;

/// Open the database at `path`, creating the parent directory and the table if needed.
pub fn open_database(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let conn = Connection::open(path)?;
    initialize_schema(&conn)?;
    Ok(conn)
}

/// Create the `runs` table if it does not exist yet
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS runs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp TEXT NOT NULL,
            duration_minutes REAL NOT NULL,
            distance_km REAL NOT NULL
        )",
        [],
    )?;
    Ok(())
}

/// Insert one run and return its new id
pub fn insert_entry(conn: &Connection, entry: &LogEntry) -> Result<EntryId> {
    conn.execute(
        "INSERT INTO runs (timestamp, duration_minutes, distance_km) VALUES (?1, ?2, ?3)",
        params![
            entry.timestamp().to_rfc3339(),
            entry.duration_minutes(),
            entry.distance_km()
        ],
    )?;
    Ok(EntryId(conn.last_insert_rowid()))
}

/// Read every run in the table. Order is whatever SQLite returns.
pub fn fetch_entries(conn: &Connection) -> Result<Vec<EntryRecord>> {
    let mut stmt =
        conn.prepare("SELECT id, timestamp, duration_minutes, distance_km FROM runs")?;
    let records = stmt
        .query_map([], |row| {
            let raw: String = row.get(1)?;
            let timestamp = DateTime::parse_from_rfc3339(&raw)
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?
                .with_timezone(&Utc);
            Ok(EntryRecord {
                id: EntryId(row.get(0)?),
                entry: LogEntry::new(timestamp, row.get(2)?, row.get(3)?),
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(records)
}

/// Delete a run by id. Returns whether a row was removed.
pub fn delete_entry(conn: &Connection, id: EntryId) -> Result<bool> {
    let count = conn.execute("DELETE FROM runs WHERE id = ?", [id.0])?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn memory_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn insert_assigns_increasing_ids() {
        let conn = memory_db();
        let entry = LogEntry::new(Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap(), 30.0, 6.0);
        let first = insert_entry(&conn, &entry).unwrap();
        let second = insert_entry(&conn, &entry).unwrap();
        assert!(second > first);
    }

    #[test]
    fn fetch_returns_inserted_values() {
        let conn = memory_db();
        let entry = LogEntry::new(
            Utc.with_ymd_and_hms(2026, 5, 2, 0, 0, 0).unwrap(),
            27.0 + 30.0 / 60.0,
            5.25,
        );
        let id = insert_entry(&conn, &entry).unwrap();
        let records = fetch_entries(&conn).unwrap();
        assert_eq!(records, vec![EntryRecord { id, entry }]);
    }

    #[test]
    fn delete_removes_only_the_addressed_row() {
        let conn = memory_db();
        let ts = Utc.with_ymd_and_hms(2026, 5, 3, 0, 0, 0).unwrap();
        let keep = insert_entry(&conn, &LogEntry::new(ts, 20.0, 4.0)).unwrap();
        let drop = insert_entry(&conn, &LogEntry::new(ts, 40.0, 8.0)).unwrap();

        assert!(delete_entry(&conn, drop).unwrap());
        assert!(!delete_entry(&conn, drop).unwrap());

        let ids: Vec<EntryId> = fetch_entries(&conn).unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![keep]);
    }

    #[test]
    fn unreadable_timestamp_is_an_error() {
        let conn = memory_db();
        conn.execute(
            "INSERT INTO runs (timestamp, duration_minutes, distance_km) VALUES ('yesterday', 1.0, 1.0)",
            [],
        )
        .unwrap();
        assert!(fetch_entries(&conn).is_err());
    }
}
