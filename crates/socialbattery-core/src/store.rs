//! In-memory entry store.
//!
//! Holds the session's entries newest-first. The only mutation is a
//! prepend; entries are never reordered, edited or removed.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use crate::entry::{LogEntry, NewEntry};

/// Append-only, newest-first collection of [`LogEntry`] values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryStore {
    entries: VecDeque<LogEntry>,
    revision: u64,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from entries listed oldest-first.
    pub fn from_insertion_order(entries: impl IntoIterator<Item = LogEntry>) -> Self {
        let mut store = Self::new();
        for entry in entries {
            store.append(entry);
        }
        store
    }

    /// Prepend an entry. O(1) amortized.
    pub fn append(&mut self, entry: LogEntry) {
        tracing::debug!(
            id = %entry.id,
            battery = entry.battery_level,
            mood = %entry.mood_label,
            "appending entry"
        );
        self.entries.push_front(entry);
        self.revision += 1;
    }

    /// Stamp a captured entry with `now` and append it.
    pub fn record(&mut self, new_entry: NewEntry, now: DateTime<Utc>) -> &LogEntry {
        self.append(new_entry.into_entry(now));
        &self.entries[0]
    }

    /// All entries, newest insertion first.
    pub fn all(&self) -> impl DoubleEndedIterator<Item = &LogEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    /// All entries, oldest insertion first.
    pub fn in_insertion_order(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().rev()
    }

    /// Most recently appended entry.
    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of appends since creation. Changes exactly when contents do.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
