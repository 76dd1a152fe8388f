//! Aggregation facade.
//!
//! [`MoodTracker`] owns the session's [`EntryStore`] and answers the two
//! read queries a front-end needs on every refresh: the recent battery
//! trend and the most frequent moods. Both read live store contents, so an
//! appended entry shows up on the very next call.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};

use crate::entry::{LogEntry, NewEntry};
use crate::ranking::{self, FrequencyBucket, DEFAULT_RANK_LIMIT};
use crate::store::EntryStore;
use crate::trend::{self, DateFormat, TrendPoint};

/// Parameters for the derived views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerSettings {
    /// Trailing window for [`MoodTracker::recent_trend`]
    pub window: Duration,
    /// Number of labels returned by [`MoodTracker::top_moods`]
    pub rank_limit: usize,
    /// Rendering of trend point dates
    pub date_format: DateFormat,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            window: trend::default_window(),
            rank_limit: DEFAULT_RANK_LIMIT,
            date_format: DateFormat::default(),
        }
    }
}

#[derive(Debug)]
struct RankCache {
    revision: u64,
    limit: usize,
    buckets: Vec<FrequencyBucket>,
}

/// Session entry store plus its derived views.
#[derive(Debug, Default)]
pub struct MoodTracker {
    store: EntryStore,
    settings: TrackerSettings,
    ranking: Mutex<Option<RankCache>>,
}

impl MoodTracker {
    /// Create a tracker with an empty store and default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracker over an existing store.
    pub fn with_store(store: EntryStore, settings: TrackerSettings) -> Self {
        Self {
            store,
            settings,
            ranking: Mutex::new(None),
        }
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    pub fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    /// Give the store back, e.g. to export it at the end of a session.
    pub fn into_store(self) -> EntryStore {
        self.store
    }

    pub fn append(&mut self, entry: LogEntry) {
        self.store.append(entry);
    }

    /// Stamp a captured entry with `now` and append it.
    pub fn record(&mut self, new_entry: NewEntry, now: DateTime<Utc>) -> &LogEntry {
        self.store.record(new_entry, now)
    }

    /// Battery trend over the configured window ending at `now`, oldest first.
    pub fn recent_trend(&self, now: DateTime<Utc>) -> Vec<TrendPoint> {
        self.recent_trend_within(self.settings.window, now)
    }

    /// Battery trend over an arbitrary window ending at `now`.
    pub fn recent_trend_within(&self, window: Duration, now: DateTime<Utc>) -> Vec<TrendPoint> {
        trend::windowed(self.store.all(), window, now, &self.settings.date_format)
    }

    /// Most frequent moods of all time, up to the configured limit.
    pub fn top_moods(&self) -> Vec<FrequencyBucket> {
        self.top_moods_limited(self.settings.rank_limit)
    }

    /// Most frequent moods of all time, up to `limit`.
    ///
    /// The ranking is memoized per store revision and limit; any append
    /// invalidates it.
    pub fn top_moods_limited(&self, limit: usize) -> Vec<FrequencyBucket> {
        let revision = self.store.revision();
        let mut cache = self.ranking.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(hit) = cache
            .as_ref()
            .filter(|c| c.revision == revision && c.limit == limit)
        {
            return hit.buckets.clone();
        }

        tracing::debug!(revision, limit, "recomputing mood ranking");
        let buckets = ranking::top_labels(self.store.all(), limit);
        *cache = Some(RankCache {
            revision,
            limit,
            buckets: buckets.clone(),
        });
        buckets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_is_visible_on_next_read() {
        let now = Utc::now();
        let mut tracker = MoodTracker::new();
        tracker.record(NewEntry::new(80, "Calm"), now - Duration::hours(2));
        assert_eq!(tracker.top_moods().len(), 1);
        assert_eq!(tracker.recent_trend(now).len(), 1);

        tracker.record(NewEntry::new(20, "Drained"), now - Duration::hours(1));
        assert_eq!(tracker.top_moods().len(), 2);
        assert_eq!(tracker.recent_trend(now).len(), 2);
    }

    #[test]
    fn cached_ranking_matches_fresh_tally() {
        let now = Utc::now();
        let mut tracker = MoodTracker::new();
        for mood in ["Calm", "Tired", "Tired", "Happy"] {
            tracker.record(NewEntry::new(50, mood), now);
        }
        let first = tracker.top_moods();
        let second = tracker.top_moods();
        assert_eq!(first, second);
        assert_eq!(first, ranking::top_labels(tracker.store().all(), DEFAULT_RANK_LIMIT));

        tracker.record(NewEntry::new(50, "Calm"), now);
        tracker.record(NewEntry::new(50, "Calm"), now);
        assert_eq!(tracker.top_moods()[0].mood_label, "Calm");
        assert_eq!(tracker.top_moods()[0].count, 3);
    }

    #[test]
    fn limit_change_bypasses_cache() {
        let now = Utc::now();
        let mut tracker = MoodTracker::new();
        for mood in ["A", "B", "C"] {
            tracker.record(NewEntry::new(50, mood), now);
        }
        assert_eq!(tracker.top_moods_limited(3).len(), 3);
        assert_eq!(tracker.top_moods_limited(1).len(), 1);
    }

    #[test]
    fn settings_drive_default_queries() {
        let now = Utc::now();
        let settings = TrackerSettings {
            window: Duration::hours(1),
            rank_limit: 1,
            ..Default::default()
        };
        let mut tracker = MoodTracker::with_store(EntryStore::new(), settings);
        tracker.record(NewEntry::new(10, "Tense"), now - Duration::hours(3));
        tracker.record(NewEntry::new(90, "Happy"), now - Duration::minutes(5));

        let trend = tracker.recent_trend(now);
        assert_eq!(trend.len(), 1);
        assert_eq!(trend[0].mood_label, "Happy");
        assert_eq!(tracker.recent_trend_within(Duration::days(1), now).len(), 2);
        assert_eq!(tracker.top_moods().len(), 1);
    }
}
