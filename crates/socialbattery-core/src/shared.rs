//! Thread-safe entry store handle.
//!
//! For front-ends that append from more than one thread. Appends take the
//! write lock so they are applied one at a time; reads clone the entries
//! under the read lock, so a reader never observes a half-applied append.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};

use crate::entry::{LogEntry, NewEntry};
use crate::error::Result;
use crate::ranking::{self, FrequencyBucket};
use crate::store::EntryStore;
use crate::trend::{self, DateFormat, TrendPoint};

/// Cloneable handle to one [`EntryStore`] shared between threads.
#[derive(Debug, Clone, Default)]
pub struct SharedEntryStore {
    inner: Arc<RwLock<EntryStore>>,
}

impl SharedEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_store(store: EntryStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    pub fn append(&self, entry: LogEntry) -> Result<()> {
        self.inner.write()?.append(entry);
        Ok(())
    }

    /// Stamp a captured entry with `now`, append it and return a copy.
    pub fn record(&self, new_entry: NewEntry, now: DateTime<Utc>) -> Result<LogEntry> {
        let mut store = self.inner.write()?;
        Ok(store.record(new_entry, now).clone())
    }

    /// Consistent copy of the entries, newest first.
    pub fn snapshot(&self) -> Result<Vec<LogEntry>> {
        Ok(self.inner.read()?.all().cloned().collect())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.inner.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.inner.read()?.is_empty())
    }

    /// Battery trend computed over a snapshot.
    pub fn trend(
        &self,
        window: Duration,
        now: DateTime<Utc>,
        format: &DateFormat,
    ) -> Result<Vec<TrendPoint>> {
        let entries = self.snapshot()?;
        Ok(trend::windowed(&entries, window, now, format))
    }

    /// Mood ranking computed over a snapshot.
    pub fn top_labels(&self, limit: usize) -> Result<Vec<FrequencyBucket>> {
        let entries = self.snapshot()?;
        Ok(ranking::top_labels(&entries, limit))
    }

    /// Copy of the whole store, e.g. for export.
    pub fn to_store(&self) -> Result<EntryStore> {
        Ok(self.inner.read()?.clone())
    }
}
