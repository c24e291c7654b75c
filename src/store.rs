// src/store.rs

use crate::db;
use crate::error::{Result, RunlogError};
use crate::models::{EntryId, EntryRecord, LogEntry};
use async_trait::async_trait;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Durable persistence boundary for runs.
///
/// Implementations must not block the caller's task; the SQLite store hands
/// every call to a blocking worker.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Every persisted run, in no particular order.
    async fn get_all(&self) -> Result<Vec<EntryRecord>>;

    /// Persist one run under a fresh surrogate key.
    async fn insert(&self, entry: &LogEntry) -> Result<EntryId>;

    /// Remove a persisted run. `Ok(false)` when the id is unknown.
    async fn delete(&self, id: EntryId) -> Result<bool>;
}

#[derive(Debug, Clone)]
enum Location {
    File(PathBuf),
    Memory,
}

/// SQLite-backed store. The connection is opened lazily on the first call.
#[derive(Clone)]
pub struct SqliteStore {
    location: Location,
    conn: Arc<Mutex<Option<Connection>>>,
}

impl SqliteStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            location: Location::File(path.as_ref().to_path_buf()),
            conn: Arc::new(Mutex::new(None)),
        }
    }

    /// A private in-memory database, gone when the last clone is dropped.
    pub fn in_memory() -> Self {
        Self {
            location: Location::Memory,
            conn: Arc::new(Mutex::new(None)),
        }
    }

    async fn with_connection<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let location = self.location.clone();
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| RunlogError::StoreUnavailable("connection lock poisoned".to_string()))?;
            if guard.is_none() {
                let opened = match &location {
                    Location::File(path) => {
                        debug!(path = %path.display(), "opening run database");
                        db::open_database(path)?
                    }
                    Location::Memory => {
                        let conn = Connection::open_in_memory()?;
                        db::initialize_schema(&conn)?;
                        conn
                    }
                };
                *guard = Some(opened);
            }
            match guard.as_ref() {
                Some(conn) => op(conn),
                None => Err(RunlogError::StoreUnavailable("connection missing".to_string())),
            }
        })
        .await?
    }
}

#[async_trait]
impl EntryStore for SqliteStore {
    async fn get_all(&self) -> Result<Vec<EntryRecord>> {
        let records = self
            .with_connection(db::fetch_entries)
            .await
            .map_err(|e| match e {
                unavailable @ RunlogError::StoreUnavailable(_) => unavailable,
                other => RunlogError::StoreUnavailable(other.to_string()),
            })?;
        debug!(count = records.len(), "loaded runs");
        Ok(records)
    }

    async fn insert(&self, entry: &LogEntry) -> Result<EntryId> {
        let entry = entry.clone();
        let id = self
            .with_connection(move |conn| db::insert_entry(conn, &entry))
            .await
            .map_err(|e| RunlogError::WriteFailed(e.to_string()))?;
        debug!(%id, "stored run");
        Ok(id)
    }

    async fn delete(&self, id: EntryId) -> Result<bool> {
        let removed = self
            .with_connection(move |conn| db::delete_entry(conn, id))
            .await
            .map_err(|e| RunlogError::WriteFailed(e.to_string()))?;
        debug!(%id, removed, "deleted run");
        Ok(removed)
    }
}
