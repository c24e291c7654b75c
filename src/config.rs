// src/config.rs

use crate::error::{Result, RunlogError};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub db_path: PathBuf,
    /// Upper bound for the startup load before the log starts empty.
    pub load_timeout: Duration,
}

impl Config {
    /// Fill in defaults for anything not given on the command line or in the environment.
    pub fn resolve(db_path: Option<PathBuf>, load_timeout_ms: Option<u64>) -> Result<Self> {
        let db_path = match db_path {
            Some(path) => path,
            None => default_db_path()?,
        };
        let load_timeout = load_timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_LOAD_TIMEOUT);
        Ok(Self {
            db_path,
            load_timeout,
        })
    }
}

/// The standard database location (~/.config/runlog/runlog.db)
pub fn default_db_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or(RunlogError::HomeDirNotFound)?;
    Ok(home_dir.join(".config/runlog/runlog.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_values_win() {
        let config = Config::resolve(Some(PathBuf::from("/tmp/runs.db")), Some(250)).unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/runs.db"));
        assert_eq!(config.load_timeout, Duration::from_millis(250));
    }

    #[test]
    fn timeout_defaults_to_one_second() {
        let config = Config::resolve(Some(PathBuf::from("runs.db")), None).unwrap();
        assert_eq!(config.load_timeout, DEFAULT_LOAD_TIMEOUT);
    }
}
