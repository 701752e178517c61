// FILE: src/engine/renamer.rs
use crate::error::Result;
use crate::storage::{codec, WriteTx};

pub struct Renamer;

impl Renamer {
    /// Rename `old_tag` to `new_tag` on every entry that carries it.
    ///
    /// Entries that already have `new_tag` just lose `old_tag`. Entries
    /// without `old_tag` are not rewritten. The scan runs under a savepoint:
    /// the first failure aborts it and undoes every rewrite it made, leaving
    /// the caller's transaction as it was. Returns how many entries were rewritten.
    pub fn rename(tx: &WriteTx<'_>, old_tag: &str, new_tag: &str) -> Result<usize> {
        codec::validate_tag(old_tag)?;
        codec::validate_tag(new_tag)?;
        if old_tag == new_tag {
            return Ok(0);
        }

        let conn = tx.conn();
        conn.execute_batch("SAVEPOINT rename")?;

        match Self::rewrite_all(tx, old_tag, new_tag) {
            Ok((rewritten, scanned)) => {
                conn.execute_batch("RELEASE rename")?;
                tracing::info!("[Renamer] {} -> {}: rewrote {} of {} entries", old_tag, new_tag, rewritten, scanned);
                Ok(rewritten)
            }
            Err(e) => {
                if let Err(undo) = conn.execute_batch("ROLLBACK TO rename; RELEASE rename") {
                    tracing::error!("[Renamer] Failed to undo partial rename: {}", undo);
                }
                tracing::warn!("[Renamer] {} -> {} aborted: {}", old_tag, new_tag, e);
                Err(e)
            }
        }
    }

    fn rewrite_all(tx: &WriteTx<'_>, old_tag: &str, new_tag: &str) -> Result<(usize, usize)> {
        let mut cursor = tx.cursor();
        let mut scanned = 0usize;
        let mut rewritten = 0usize;

        let mut next = cursor.first()?;
        while let Some(entry) = next {
            scanned += 1;
            if let Some(tags) = renamed_tags(&entry.tags, old_tag, new_tag) {
                tx.put(&entry.path, &tags)?;
                rewritten += 1;
            }
            next = cursor.next()?;
        }
        Ok((rewritten, scanned))
    }
}

/// New tag set for one entry, or `None` when `old_tag` is absent.
pub fn renamed_tags(tags: &[String], old_tag: &str, new_tag: &str) -> Option<Vec<String>> {
    if !tags.iter().any(|t| t == old_tag) {
        return None;
    }

    // Merge: if new_tag is already there, old_tag simply disappears
    let has_new = tags.iter().any(|t| t == new_tag);
    let kept = tags.iter().map(String::as_str).filter(|t| *t != old_tag);
    let renamed = if has_new { None } else { Some(new_tag) };

    Some(codec::canonicalize(kept.chain(renamed)))
}

impl<'conn> WriteTx<'conn> {
    pub fn rename(&self, old_tag: &str, new_tag: &str) -> Result<usize> {
        Renamer::rename(self, old_tag, new_tag)
    }
}
