//! Transaction scopes over the tag index
//!
//! `ReadTx` can only read. `WriteTx` can do everything a `ReadTx` can (it
//! derefs to one) and its writes become durable only on `commit`. Dropping
//! either without finishing it rolls back.

use std::ops::Deref;
use rusqlite::{Connection, Transaction};
use crate::error::Result;

pub struct ReadTx<'conn> {
    tx: Transaction<'conn>,
}

impl<'conn> ReadTx<'conn> {
    pub(crate) fn new(tx: Transaction<'conn>) -> Self {
        Self { tx }
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.tx
    }

    /// End the transaction, discarding nothing but the snapshot.
    pub fn rollback(self) -> Result<()> {
        self.tx.rollback()?;
        Ok(())
    }
}

pub struct WriteTx<'conn> {
    inner: ReadTx<'conn>,
}

impl<'conn> WriteTx<'conn> {
    pub(crate) fn new(tx: Transaction<'conn>) -> Self {
        Self { inner: ReadTx::new(tx) }
    }

    /// Make every write of this transaction durable.
    pub fn commit(self) -> Result<()> {
        self.inner.tx.commit()?;
        tracing::debug!("Committed write transaction");
        Ok(())
    }

    /// Throw away every write of this transaction.
    pub fn rollback(self) -> Result<()> {
        self.inner.tx.rollback()?;
        tracing::debug!("Rolled back write transaction");
        Ok(())
    }
}

impl<'conn> Deref for WriteTx<'conn> {
    type Target = ReadTx<'conn>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
