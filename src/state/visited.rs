//! Visited URL ledger shared by discovery and capture
//!
//! URLs are compared by exact string equality; no normalization is applied,
//! so `https://a.com` and `https://a.com/` are two entries.

use std::collections::BTreeSet;

/// The set of every URL discovered so far
///
/// The set only grows: there is no removal API. Iteration follows sorted
/// string order, which keeps capture passes reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitedSet {
    urls: BTreeSet<String>,
}

impl VisitedSet {
    /// Creates an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a URL, returning `true` if it was not already present
    pub fn insert(&mut self, url: impl Into<String>) -> bool {
        self.urls.insert(url.into())
    }

    /// Returns true if the exact URL string has been recorded
    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Iterates over the recorded URLs in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for VisitedSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            urls: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for VisitedSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.urls.extend(iter.into_iter().map(Into::into));
    }
}

impl<'a> IntoIterator for &'a VisitedSet {
    type Item = &'a str;
    type IntoIter = std::iter::Map<std::collections::btree_set::Iter<'a, String>, fn(&String) -> &str>;

    fn into_iter(self) -> Self::IntoIter {
        self.urls.iter().map(String::as_str as fn(&String) -> &str)
    }
}
