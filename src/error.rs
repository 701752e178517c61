//! Error types for bore

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Tag text the on-disk encoding cannot represent.
    #[error("Invalid tag {0:?}: tags must be non-empty and must not contain NUL")]
    InvalidTag(String),

    #[error("Corrupt entry for {path}: {reason}")]
    Corrupt { path: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

impl BoreError {
    /// True when SQLite refused the operation because another connection holds the lock.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            BoreError::Database(rusqlite::Error::SqliteFailure(e, _))
                if matches!(e.code, rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked)
        )
    }
}

pub type Result<T> = std::result::Result<T, BoreError>;
