// src/lib.rs

//! Personal running log: runs with derived pace, three sort orders, and a
//! SQLite-backed store behind an in-memory controller.

pub mod cli;
pub mod commands;
pub mod config;
pub mod controller;
pub mod db;
pub mod error;
pub mod format;
pub mod input;
pub mod models;
pub mod sort;
pub mod store;

pub use controller::{LoadState, LogController, LogSnapshot, LogSubscription};
pub use error::{Result, RunlogError};
pub use input::RunInput;
pub use models::{EntryId, EntryRecord, LogEntry};
pub use sort::SortMode;
pub use store::{EntryStore, SqliteStore};
