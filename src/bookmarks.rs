//! Session-scoped saved entries. Nothing here outlives the process.

use crate::feed::NewsEntry;

/// What happened on [`BookmarkStore::add`], for user feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}

/// Saved entries in insertion order, without structural duplicates.
#[derive(Debug, Default, Clone)]
pub struct BookmarkStore {
    entries: Vec<NewsEntry>,
}

impl BookmarkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `entry` unless an equal one is already saved.
    pub fn add(&mut self, entry: NewsEntry) -> AddOutcome {
        if self.entries.contains(&entry) {
            return AddOutcome::AlreadyPresent;
        }
        tracing::debug!(link = %entry.link, "Bookmark added");
        self.entries.push(entry);
        AddOutcome::Added
    }

    /// Removes the first entry equal to `entry`. Returns false if none matched.
    pub fn remove(&mut self, entry: &NewsEntry) -> bool {
        match self.entries.iter().position(|e| e == entry) {
            Some(idx) => {
                self.entries.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Removes and returns the entry at `index` of [`BookmarkStore::list`].
    pub fn remove_at(&mut self, index: usize) -> Option<NewsEntry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    pub fn list(&self) -> &[NewsEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
