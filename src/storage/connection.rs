//! Database session management
//!
//! A `Store` owns the one SQLite connection of the process. It is opened once
//! by the caller and passed to whatever needs a transaction.

use std::path::Path;
use std::time::Duration;
use rusqlite::{Connection, TransactionBehavior};
use crate::config::Config;
use crate::error::{BoreError, Result};
use super::transaction::{ReadTx, WriteTx};

pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) the database described by `config`.
    pub fn open(config: &Config) -> Result<Self> {
        let db_path = config.db_path.as_path();
        if let Some(db_dir) = db_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(db_dir).map_err(BoreError::Io)?;
        }

        let conn = Connection::open(db_path).map_err(BoreError::Database)?;
        let store = Self::from_connection(conn, config.busy_timeout)?;

        tracing::info!("Opened tag index at: {}", db_path.display());
        Ok(store)
    }

    /// Open a private, non-durable database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn, Duration::ZERO)
    }

    fn from_connection(conn: Connection, busy_timeout: Duration) -> Result<Self> {
        conn.busy_timeout(busy_timeout)?;

        // journal_mode answers with the mode actually in effect ("memory" for in-memory databases)
        let mode: String = conn.pragma_update_and_check(None, "journal_mode", WAL, |row| row.get(0))?;
        conn.pragma_update(None, "synchronous", NORMAL)?;
        tracing::debug!("journal_mode = {}", mode);

        create_tables(&conn)?;
        Ok(Self { conn })
    }

    /// Begin a read-only transaction over one consistent snapshot.
    pub fn read(&mut self) -> Result<ReadTx<'_>> {
        let tx = self.conn.transaction_with_behavior(TransactionBehavior::Deferred)?;
        Ok(ReadTx::new(tx))
    }

    /// Begin the write transaction.
    ///
    /// Takes SQLite's write lock up front, waiting up to the configured busy
    /// timeout while another connection holds it.
    pub fn write(&mut self) -> Result<WriteTx<'_>> {
        match self.conn.transaction_with_behavior(TransactionBehavior::Immediate) {
            Ok(tx) => Ok(WriteTx::new(tx)),
            Err(e) => {
                let err = BoreError::Database(e);
                if err.is_busy() {
                    tracing::warn!("Write lock is held by another connection: {}", err);
                }
                Err(err)
            }
        }
    }

    /// File backing the connection; `None` for in-memory databases.
    pub fn path(&self) -> Option<&Path> {
        self.conn.path().filter(|p| !p.is_empty()).map(Path::new)
    }

    /// Release the connection, reporting any error SQLite raises on close.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| BoreError::Database(e))
    }
}

fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(r#"
        CREATE TABLE IF NOT EXISTS files (
            path TEXT PRIMARY KEY NOT NULL,
            tags BLOB NOT NULL
        ) WITHOUT ROWID;
    "#)?;
    tracing::debug!("Ensured files table");
    Ok(())
}

// SQL pragma constants
const WAL: &str = "WAL";
const NORMAL: &str = "NORMAL";
