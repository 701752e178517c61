//! Ordered, seekable iteration over entries by path
//!
//! The cursor remembers the key it is positioned on rather than holding a
//! live statement, and every move re-seeks relative to that key. Writes made
//! through the same transaction while scanning (including deleting the
//! current entry) therefore never invalidate it: already visited keys stay
//! visited, and the next step lands on the first key after the remembered one.

use std::ops::{Deref, DerefMut};
use rusqlite::{params, Connection, OptionalExtension};
use crate::error::Result;
use super::Entry;

const FIRST: &str = "SELECT path, tags FROM files ORDER BY path ASC LIMIT 1";
const LAST: &str = "SELECT path, tags FROM files ORDER BY path DESC LIMIT 1";
const NEXT: &str = "SELECT path, tags FROM files WHERE path > ?1 ORDER BY path ASC LIMIT 1";
const PREV: &str = "SELECT path, tags FROM files WHERE path < ?1 ORDER BY path DESC LIMIT 1";
const SEEK: &str = "SELECT path, tags FROM files WHERE path >= ?1 ORDER BY path ASC LIMIT 1";

pub struct Cursor<'t> {
    conn: &'t Connection,
    position: Option<String>,
}

impl<'t> Cursor<'t> {
    pub(crate) fn new(conn: &'t Connection) -> Self {
        Self { conn, position: None }
    }

    /// Key the cursor is positioned on, if any. After a `seek` past the last
    /// entry this is the sought path, which need not exist.
    pub fn key(&self) -> Option<&str> {
        self.position.as_deref()
    }

    pub fn first(&mut self) -> Result<Option<Entry>> {
        self.step(FIRST, None)
    }

    pub fn last(&mut self) -> Result<Option<Entry>> {
        self.step(LAST, None)
    }

    /// Entry after the current key. An unpositioned cursor starts at `first`.
    ///
    /// Walking off the end returns `None` and leaves the position where it was.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<Option<Entry>> {
        match self.position.clone() {
            Some(key) => self.step(NEXT, Some(&key)),
            None => self.first(),
        }
    }

    /// Entry before the current key. An unpositioned cursor starts at `last`.
    pub fn prev(&mut self) -> Result<Option<Entry>> {
        match self.position.clone() {
            Some(key) => self.step(PREV, Some(&key)),
            None => self.last(),
        }
    }

    /// Position at the first entry whose path is >= `path`.
    ///
    /// When every key is smaller the cursor is left just past the end: `next`
    /// returns `None` and `prev` the last entry before `path`.
    pub fn seek(&mut self, path: &str) -> Result<Option<Entry>> {
        let entry = self.step(SEEK, Some(path))?;
        if entry.is_none() {
            self.position = Some(path.to_string());
        }
        Ok(entry)
    }

    /// Re-read the entry at the current key; `None` if it has since been deleted.
    pub fn current(&self) -> Result<Option<Entry>> {
        match self.position.as_deref() {
            Some(key) => fetch(self.conn, "SELECT path, tags FROM files WHERE path = ?1", Some(key)),
            None => Ok(None),
        }
    }

    fn step(&mut self, sql: &str, key: Option<&str>) -> Result<Option<Entry>> {
        let entry = fetch(self.conn, sql, key)?;
        if let Some(found) = &entry {
            self.position = Some(found.path.clone());
        }
        Ok(entry)
    }
}

fn fetch(conn: &Connection, sql: &str, key: Option<&str>) -> Result<Option<Entry>> {
    let mut stmt = conn.prepare_cached(sql)?;
    let read_row = |row: &rusqlite::Row<'_>| -> rusqlite::Result<(String, Vec<u8>)> {
        Ok((row.get(0)?, row.get(1)?))
    };
    let row = match key {
        Some(key) => stmt.query_row(params![key], read_row).optional()?,
        None => stmt.query_row([], read_row).optional()?,
    };

    row.map(|(path, value)| Entry::decode(path, &value)).transpose()
}

/// A `Cursor` from a write transaction, able to delete at its position.
pub struct CursorMut<'t> {
    cursor: Cursor<'t>,
}

impl<'t> CursorMut<'t> {
    pub(crate) fn new(conn: &'t Connection) -> Self {
        Self { cursor: Cursor::new(conn) }
    }

    /// Delete the entry at the current key.
    ///
    /// The cursor keeps the deleted key as its position, so `next` and `prev`
    /// continue from where the entry used to be. Returns `false` when the
    /// cursor is unpositioned or the entry is already gone.
    pub fn delete(&mut self) -> Result<bool> {
        let Some(key) = self.cursor.position.as_deref() else {
            return Ok(false);
        };
        let mut stmt = self.cursor.conn.prepare_cached("DELETE FROM files WHERE path = ?1")?;
        let rows_affected = stmt.execute(params![key])?;

        tracing::debug!("Cursor deleted {} (rows affected: {})", key, rows_affected);
        Ok(rows_affected > 0)
    }
}

impl<'t> Deref for CursorMut<'t> {
    type Target = Cursor<'t>;

    fn deref(&self) -> &Self::Target {
        &self.cursor
    }
}

impl<'t> DerefMut for CursorMut<'t> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.cursor
    }
}
