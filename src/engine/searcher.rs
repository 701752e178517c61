// FILE: src/engine/searcher.rs
use crate::error::Result;
use crate::storage::{Entry, ReadTx};
use super::matcher::Filter;

pub struct Searcher;

impl Searcher {
    /// Scan the whole index in path order and keep the entries `filter` accepts.
    ///
    /// There is no tag -> path index, so this always visits every entry.
    pub fn search(tx: &ReadTx<'_>, filter: &Filter) -> Result<Vec<Entry>> {
        let mut cursor = tx.cursor();
        let mut results = Vec::new();
        let mut scanned = 0usize;

        let mut next = cursor.first()?;
        while let Some(entry) = next {
            scanned += 1;
            if filter.matches_entry(&entry) {
                results.push(entry);
            }
            next = cursor.next()?;
        }

        tracing::debug!("[Searcher] {} of {} entries matched {:?}", results.len(), scanned, filter);
        Ok(results)
    }
}

impl<'conn> ReadTx<'conn> {
    /// Entries having every `include` tag and no `exclude` tag, ordered by path.
    pub fn search<I, E, S, T>(&self, include: I, exclude: E) -> Result<Vec<Entry>>
    where
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Searcher::search(self, &Filter::new(include, exclude))
    }

    pub fn search_filter(&self, filter: &Filter) -> Result<Vec<Entry>> {
        Searcher::search(self, filter)
    }
}
