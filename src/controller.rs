// src/controller.rs

//! In-memory authority over the ordered run log.
//!
//! The task owning a [`LogController`] is the only writer of the collection.
//! Store calls run elsewhere: the startup load is awaited under a timeout,
//! inserts are dispatched in the background and only report back through the
//! warning channel.

use crate::error::{Result, RunlogError};
use crate::input::RunInput;
use crate::models::LogEntry;
use crate::sort::SortMode;
use crate::store::EntryStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
}

/// Immutable view of the log handed to subscribers.
#[derive(Debug, Clone)]
pub struct LogSnapshot {
    pub state: LoadState,
    pub sort_mode: SortMode,
    pub entries: Arc<[LogEntry]>,
}

/// Receiving side handed out by [`LogController::new`].
pub struct LogSubscription {
    /// Latest published snapshot.
    pub snapshots: watch::Receiver<LogSnapshot>,
    /// Non-fatal store problems: `StoreUnavailable`, `StoreTimeout`, `WriteFailed`.
    pub warnings: mpsc::UnboundedReceiver<RunlogError>,
}

pub struct LogController {
    store: Arc<dyn EntryStore>,
    load_timeout: Duration,
    state: LoadState,
    sort_mode: SortMode,
    entries: Vec<LogEntry>,
    snapshots: watch::Sender<LogSnapshot>,
    warnings: mpsc::UnboundedSender<RunlogError>,
    pending_writes: JoinSet<()>,
}

impl LogController {
    pub fn new(store: Arc<dyn EntryStore>, load_timeout: Duration) -> (Self, LogSubscription) {
        let sort_mode = SortMode::default();
        let (snapshots, snapshot_rx) = watch::channel(LogSnapshot {
            state: LoadState::Loading,
            sort_mode,
            entries: Arc::from(Vec::new()),
        });
        let (warnings, warning_rx) = mpsc::unbounded_channel();
        let controller = Self {
            store,
            load_timeout,
            state: LoadState::Loading,
            sort_mode,
            entries: Vec::new(),
            snapshots,
            warnings,
            pending_writes: JoinSet::new(),
        };
        let subscription = LogSubscription {
            snapshots: snapshot_rx,
            warnings: warning_rx,
        };
        (controller, subscription)
    }

    /// Load every persisted run and enter `Ready`.
    ///
    /// Never fails: if the store errors or does not answer within the load
    /// timeout, the log starts empty and a warning is sent instead. The rows
    /// stay untouched in storage. Returns the number of runs loaded.
    pub async fn load(&mut self) -> usize {
        if self.state == LoadState::Ready {
            debug!("log already loaded");
            return self.entries.len();
        }

        match tokio::time::timeout(self.load_timeout, self.store.get_all()).await {
            Ok(Ok(records)) => {
                self.entries = records.into_iter().map(|record| record.entry).collect();
                info!(count = self.entries.len(), "run log loaded");
            }
            Ok(Err(e)) => {
                warn!(error = %e, "could not load run log, starting empty");
                self.entries.clear();
                self.warn(match e {
                    unavailable @ RunlogError::StoreUnavailable(_) => unavailable,
                    other => RunlogError::StoreUnavailable(other.to_string()),
                });
            }
            Err(_) => {
                warn!(timeout = ?self.load_timeout, "run log load timed out, starting empty");
                self.entries.clear();
                self.warn(RunlogError::StoreTimeout(self.load_timeout));
            }
        }

        self.state = LoadState::Ready;
        self.sort_and_publish();
        self.entries.len()
    }

    /// Append a run, write it through to the store in the background and republish.
    ///
    /// Must be called from within a tokio runtime. A failed write is reported
    /// once on the warning channel; the run stays in the log.
    pub fn add_entry(&mut self, input: RunInput) -> Result<()> {
        if self.state != LoadState::Ready {
            return Err(RunlogError::NotReady);
        }

        let entry = input.into_entry();
        self.entries.push(entry.clone());

        while let Some(joined) = self.pending_writes.try_join_next() {
            self.reap(joined);
        }

        let store = Arc::clone(&self.store);
        let warnings = self.warnings.clone();
        self.pending_writes.spawn(async move {
            if let Err(e) = store.insert(&entry).await {
                warn!(error = %e, "run kept in memory but not persisted");
                let e = match e {
                    failed @ RunlogError::WriteFailed(_) => failed,
                    other => RunlogError::WriteFailed(other.to_string()),
                };
                let _ = warnings.send(e);
            }
        });

        self.sort_and_publish();
        Ok(())
    }

    pub fn set_sort_mode(&mut self, mode: SortMode) {
        self.sort_mode = mode;
        self.sort_and_publish();
    }

    /// Advance to the next sort mode and return it.
    pub fn cycle_sort_mode(&mut self) -> SortMode {
        self.set_sort_mode(self.sort_mode.next());
        self.sort_mode
    }

    /// Wait until every dispatched write has finished.
    pub async fn settle(&mut self) {
        while let Some(joined) = self.pending_writes.join_next().await {
            self.reap(joined);
        }
    }

    /// Writes dispatched and not yet collected by `settle`.
    pub fn pending_writes(&self) -> usize {
        self.pending_writes.len()
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn snapshot(&self) -> LogSnapshot {
        self.snapshots.borrow().clone()
    }

    fn reap(&self, joined: std::result::Result<(), tokio::task::JoinError>) {
        if let Err(e) = joined {
            error!(error = %e, "store write task did not finish");
            self.warn(RunlogError::WriteFailed(e.to_string()));
        }
    }

    fn warn(&self, e: RunlogError) {
        let _ = self.warnings.send(e);
    }

    fn sort_and_publish(&mut self) {
        self.sort_mode.sort(&mut self.entries);
        self.snapshots.send_replace(LogSnapshot {
            state: self.state,
            sort_mode: self.sort_mode,
            entries: Arc::from(self.entries.as_slice()),
        });
    }
}

impl Drop for LogController {
    /// Writes already dispatched keep running after the controller is gone.
    fn drop(&mut self) {
        self.pending_writes.detach_all();
    }
}
