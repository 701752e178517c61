//! Point operations on the files table
//!
//! - Looking up the tags of one path
//! - Replacing the tags of a path
//! - Moving and deleting entries
//! - Counting and listing entries in path order

use rusqlite::{params, OptionalExtension};
use crate::error::Result;
use super::codec;
use super::cursor::{Cursor, CursorMut};
use super::transaction::{ReadTx, WriteTx};
use super::Entry;

impl<'conn> ReadTx<'conn> {
    /// Tags of `path`, or `None` when the path was never tagged.
    pub fn get(&self, path: &str) -> Result<Option<Vec<String>>> {
        self.get_raw(path)?
            .map(|value| codec::decode(path, &value))
            .transpose()
    }

    pub fn contains(&self, path: &str) -> Result<bool> {
        Ok(self.get_raw(path)?.is_some())
    }

    pub(crate) fn get_raw(&self, path: &str) -> Result<Option<Vec<u8>>> {
        let mut stmt = self.conn().prepare_cached("SELECT tags FROM files WHERE path = ?1")?;
        let value = stmt.query_row(params![path], |row| row.get::<_, Vec<u8>>(0)).optional()?;
        Ok(value)
    }

    /// Number of entries in the index.
    pub fn len(&self) -> Result<u64> {
        let count = self.conn().query_row("SELECT COUNT(*) FROM files", [], |row| row.get::<_, u64>(0))?;
        Ok(count)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Every entry, ordered by path.
    pub fn entries(&self) -> Result<Vec<Entry>> {
        let mut stmt = self.conn().prepare_cached("SELECT path, tags FROM files ORDER BY path")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, Vec<u8>>(1)?))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (path, value) = row?;
            entries.push(Entry::decode(path, &value)?);
        }
        Ok(entries)
    }

    /// Entries whose path starts with `prefix`, ordered by path.
    pub fn scan_prefix(&self, prefix: &str) -> Result<Vec<Entry>> {
        let mut cursor = self.cursor();
        let mut entries = Vec::new();

        let mut next = cursor.seek(prefix)?;
        while let Some(entry) = next {
            if !entry.path.starts_with(prefix) {
                break;
            }
            entries.push(entry);
            next = cursor.next()?;
        }
        Ok(entries)
    }

    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(self.conn())
    }
}

impl<'conn> WriteTx<'conn> {
    /// Replace the tags of `path` with the canonical form of `tags`.
    pub fn put<I, S>(&self, path: &str, tags: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let value = codec::encode(tags)?;
        self.put_raw(path, &value)?;
        tracing::debug!("Put {} ({} bytes of tags)", path, value.len());
        Ok(())
    }

    pub(crate) fn put_raw(&self, path: &str, value: &[u8]) -> Result<()> {
        let mut stmt = self.conn().prepare_cached(
            "INSERT INTO files (path, tags) VALUES (?1, ?2)
             ON CONFLICT(path) DO UPDATE SET tags = excluded.tags"
        )?;
        stmt.execute(params![path, value])?;
        Ok(())
    }

    /// Remove `path`. Returns whether an entry was there.
    pub fn delete(&self, path: &str) -> Result<bool> {
        let mut stmt = self.conn().prepare_cached("DELETE FROM files WHERE path = ?1")?;
        let rows_affected = stmt.execute(params![path])?;

        tracing::debug!("Deleted {} (rows affected: {})", path, rows_affected);
        Ok(rows_affected > 0)
    }

    /// Re-key the entry at `old_path` to `new_path`, replacing anything there.
    ///
    /// Returns `false` without writing when `old_path` has no entry. The new
    /// key is written before the old one is removed, so a crash between the
    /// two steps of an uncommitted sequence never loses the tags.
    pub fn move_entry(&self, old_path: &str, new_path: &str) -> Result<bool> {
        let Some(value) = self.get_raw(old_path)? else {
            tracing::debug!("Move skipped, {} is not indexed", old_path);
            return Ok(false);
        };
        if old_path == new_path {
            return Ok(true);
        }

        self.put_raw(new_path, &value)?;
        self.delete(old_path)?;

        tracing::debug!("Moved {} -> {}", old_path, new_path);
        Ok(true)
    }

    /// Cursor that can also delete the entry it is positioned on.
    pub fn cursor_mut(&self) -> CursorMut<'_> {
        CursorMut::new(self.conn())
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::{Entry, Store};
    use crate::error::BoreError;

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_put_then_get_is_canonical() {
        let mut store = Store::open_in_memory().unwrap();
        let tx = store.write().unwrap();
        tx.put("/a.txt", ["x", "y", "x"]).unwrap();
        assert_eq!(tx.get("/a.txt").unwrap(), Some(tags(&["x", "y"])));
    }

    #[test]
    fn test_empty_entry_differs_from_absent() {
        let mut store = Store::open_in_memory().unwrap();
        let tx = store.write().unwrap();
        tx.put("/empty", Vec::<String>::new()).unwrap();

        assert_eq!(tx.get("/empty").unwrap(), Some(Vec::new()));
        assert_eq!(tx.get("/never").unwrap(), None);
        assert!(tx.contains("/empty").unwrap());
        assert!(!tx.contains("/never").unwrap());
    }

    #[test]
    fn test_put_replaces_previous_tags() {
        let mut store = Store::open_in_memory().unwrap();
        let tx = store.write().unwrap();
        tx.put("/a", ["old", "stale"]).unwrap();
        tx.put("/a", ["new"]).unwrap();
        assert_eq!(tx.get("/a").unwrap(), Some(tags(&["new"])));
        assert_eq!(tx.len().unwrap(), 1);
    }

    #[test]
    fn test_put_rejects_separator_without_writing() {
        let mut store = Store::open_in_memory().unwrap();
        let tx = store.write().unwrap();
        let err = tx.put("/a", ["fine", "nul\0inside"]).unwrap_err();
        assert!(matches!(err, BoreError::InvalidTag(_)));
        assert_eq!(tx.get("/a").unwrap(), None);
    }

    #[test]
    fn test_undecodable_value_is_reported_as_corrupt() {
        let mut store = Store::open_in_memory().unwrap();
        let tx = store.write().unwrap();
        tx.put("/a", ["x"]).unwrap();
        tx.put_raw("/bad", &[b'x', 0, 0xff]).unwrap();

        let is_bad = |err: BoreError| matches!(err, BoreError::Corrupt { ref path, .. } if path == "/bad");
        assert!(is_bad(tx.get("/bad").unwrap_err()));
        assert!(is_bad(tx.entries().unwrap_err()));
        assert!(is_bad(tx.search(["x"], Vec::<&str>::new()).unwrap_err()));

        // Point reads of other paths and raw presence checks are unaffected
        assert_eq!(tx.get("/a").unwrap(), Some(tags(&["x"])));
        assert!(tx.contains("/bad").unwrap());
        assert_eq!(tx.len().unwrap(), 2);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut store = Store::open_in_memory().unwrap();
        let tx = store.write().unwrap();
        tx.put("/a", ["x"]).unwrap();
        assert!(tx.delete("/a").unwrap());
        assert!(!tx.delete("/a").unwrap());
        assert_eq!(tx.get("/a").unwrap(), None);
    }

    #[test]
    fn test_move_transfers_tags() {
        let mut store = Store::open_in_memory().unwrap();
        let tx = store.write().unwrap();
        tx.put("/old", ["x", "y"]).unwrap();

        assert!(tx.move_entry("/old", "/new").unwrap());
        assert_eq!(tx.get("/old").unwrap(), None);
        assert_eq!(tx.get("/new").unwrap(), Some(tags(&["x", "y"])));
    }

    #[test]
    fn test_move_overwrites_target_and_keeps_empty_sets() {
        let mut store = Store::open_in_memory().unwrap();
        let tx = store.write().unwrap();
        tx.put("/old", Vec::<String>::new()).unwrap();
        tx.put("/new", ["gone"]).unwrap();

        assert!(tx.move_entry("/old", "/new").unwrap());
        assert_eq!(tx.get("/new").unwrap(), Some(Vec::new()));
    }

    #[test]
    fn test_move_of_missing_path_writes_nothing() {
        let mut store = Store::open_in_memory().unwrap();
        let tx = store.write().unwrap();
        assert!(!tx.move_entry("/missing", "/new").unwrap());
        assert_eq!(tx.get("/new").unwrap(), None);
    }

    #[test]
    fn test_move_onto_itself_keeps_entry() {
        let mut store = Store::open_in_memory().unwrap();
        let tx = store.write().unwrap();
        tx.put("/same", ["x"]).unwrap();
        assert!(tx.move_entry("/same", "/same").unwrap());
        assert_eq!(tx.get("/same").unwrap(), Some(tags(&["x"])));
    }

    #[test]
    fn test_entries_and_prefix_scan_are_path_ordered() {
        let mut store = Store::open_in_memory().unwrap();
        let tx = store.write().unwrap();
        tx.put("/photos/b.jpg", ["b"]).unwrap();
        tx.put("/docs/a.txt", ["a"]).unwrap();
        tx.put("/photos/a.jpg", ["a"]).unwrap();
        tx.put("/photosets/c.jpg", ["c"]).unwrap();

        let paths: Vec<String> = tx.entries().unwrap().into_iter().map(|e| e.path).collect();
        assert_eq!(paths, ["/docs/a.txt", "/photos/a.jpg", "/photos/b.jpg", "/photosets/c.jpg"]);

        let photos = tx.scan_prefix("/photos/").unwrap();
        assert_eq!(photos, vec![
            Entry { path: "/photos/a.jpg".into(), tags: tags(&["a"]) },
            Entry { path: "/photos/b.jpg".into(), tags: tags(&["b"]) },
        ]);
    }
}
