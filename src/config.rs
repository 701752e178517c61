//! Runtime configuration
//!
//! Resolved once at startup and handed to `Store::open`. Environment:
//! - `BORE_DB`: database file path
//! - `BORE_BUSY_TIMEOUT_MS`: how long a write transaction waits for the lock

use std::path::PathBuf;
use std::time::Duration;
use crate::error::{BoreError, Result};

const DB_ENV: &str = "BORE_DB";
const BUSY_TIMEOUT_ENV: &str = "BORE_BUSY_TIMEOUT_MS";
const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub busy_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }
}

impl Config {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where F: Fn(&str) -> Option<String>
    {
        let mut config = Self::default();

        if let Some(path) = lookup(DB_ENV).filter(|p| !p.trim().is_empty()) {
            config.db_path = PathBuf::from(path);
        }

        if let Some(raw) = lookup(BUSY_TIMEOUT_ENV) {
            let millis: u64 = raw.trim().parse().map_err(|_| {
                BoreError::Config(format!("{} must be a number of milliseconds, got {:?}", BUSY_TIMEOUT_ENV, raw))
            })?;
            config.busy_timeout = Duration::from_millis(millis);
        }

        Ok(config)
    }

    pub fn with_db_path(mut self, db_path: impl Into<PathBuf>) -> Self {
        self.db_path = db_path.into();
        self
    }
}

fn default_db_path() -> PathBuf {
    match dirs::data_local_dir() {
        Some(dir) => dir.join("bore").join("bore.db"),
        None => PathBuf::from("bore.db"),
    }
}
