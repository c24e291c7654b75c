// src/error.rs

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunlogError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database Error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("Home directory not found")]
    HomeDirNotFound,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Entry store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Entry store did not answer within {0:?}")]
    StoreTimeout(Duration),

    #[error("Run could not be saved: {0}")]
    WriteFailed(String),

    #[error("The log is still loading")]
    NotReady,

    #[error("Store worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, RunlogError>;
