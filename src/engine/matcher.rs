//! Include/exclude tag filters.

use std::collections::{BTreeSet, HashSet};
use crate::storage::Entry;

/// An entry passes when it has every `include` tag and none of the `exclude` tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    include: BTreeSet<String>,
    exclude: BTreeSet<String>,
}

impl Filter {
    pub fn new<I, E, S, T>(include: I, exclude: E) -> Self
    where
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Self {
            include: include.into_iter().map(|t| t.as_ref().to_string()).collect(),
            exclude: exclude.into_iter().map(|t| t.as_ref().to_string()).collect(),
        }
    }

    /// Build a filter from command-line style terms: `-tag` excludes, `tag` includes.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self::default();
        for term in terms {
            let term = term.as_ref();
            match term.strip_prefix('-') {
                Some(tag) if !tag.is_empty() => { filter.exclude.insert(tag.to_string()); }
                Some(_) => {}
                None if !term.is_empty() => { filter.include.insert(term.to_string()); }
                None => {}
            }
        }
        filter
    }

    pub fn include(&self) -> &BTreeSet<String> {
        &self.include
    }

    pub fn exclude(&self) -> &BTreeSet<String> {
        &self.exclude
    }

    pub fn matches(&self, tags: &[String]) -> bool {
        let has: HashSet<&str> = tags.iter().map(String::as_str).collect();
        self.include.iter().all(|tag| has.contains(tag.as_str()))
            && !self.exclude.iter().any(|tag| has.contains(tag.as_str()))
    }

    pub fn matches_entry(&self, entry: &Entry) -> bool {
        self.matches(&entry.tags)
    }
}

/// One-shot form of `Filter::matches_entry`.
pub fn matches<S: AsRef<str>>(entry: &Entry, include: &[S], exclude: &[S]) -> bool {
    Filter::new(include, exclude).matches_entry(entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(tags: &[&str]) -> Entry {
        Entry { path: "/f".into(), tags: tags.iter().map(|t| t.to_string()).collect() }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = Filter::default();
        assert!(filter.matches_entry(&entry(&[])));
        assert!(filter.matches_entry(&entry(&["x"])));
    }

    #[test]
    fn test_include_requires_every_tag() {
        assert!(matches(&entry(&["x", "y"]), &["x", "y"], &[]));
        assert!(!matches(&entry(&["x"]), &["x", "y"], &[]));
    }

    #[test]
    fn test_exclude_rejects_any_tag() {
        assert!(!matches(&entry(&["x", "y"]), &[], &["y"]));
        assert!(matches(&entry(&["x"]), &[], &["y"]));
        assert!(!matches(&entry(&["x", "y"]), &["x"], &["z", "y"]));
    }

    #[test]
    fn test_tag_in_both_lists_matches_nothing() {
        let filter = Filter::new(["x"], ["x"]);
        assert!(!filter.matches_entry(&entry(&["x"])));
        assert!(!filter.matches_entry(&entry(&[])));
    }

    #[test]
    fn test_from_terms_splits_on_dash() {
        let filter = Filter::from_terms(["photo", "-draft", "", "-", "2024"]);
        assert_eq!(filter, Filter::new(["2024", "photo"], ["draft"]));
    }
}
