//! Recency window selection for the battery trend.
//!
//! Picks the entries that fall inside a trailing window ending at an
//! explicit `now` and lays them out oldest-first so a line chart reads
//! left to right. Entries sharing a calendar day stay separate points.

use std::fmt::Write as _;

use chrono::{DateTime, Duration, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::entry::LogEntry;

/// Default trailing window for the trend, in days.
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

/// Date pattern used when none is configured or the configured one is invalid.
pub const DEFAULT_DATE_PATTERN: &str = "%Y-%m-%d";

/// Default trailing window for the trend.
pub fn default_window() -> Duration {
    Duration::days(DEFAULT_WINDOW_DAYS)
}

/// One plotted point of the battery trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// `created_at` rendered with the active [`DateFormat`]
    pub display_date: String,
    /// The stored instant the display date was derived from
    pub created_at: DateTime<Utc>,
    pub battery_level: i32,
    pub mood_label: String,
}

/// How `created_at` is rendered into [`TrendPoint::display_date`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pattern: String,
    offset: FixedOffset,
}

impl Default for DateFormat {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_DATE_PATTERN.to_string(),
            offset: Utc.fix(),
        }
    }
}

impl DateFormat {
    /// Build a format from a strftime pattern and a UTC offset in hours.
    ///
    /// A pattern chrono cannot render is replaced by [`DEFAULT_DATE_PATTERN`].
    /// Offsets outside +/-23 hours fall back to UTC.
    pub fn new(pattern: impl Into<String>, utc_offset_hours: i32) -> Self {
        let mut pattern = pattern.into();
        if !Self::is_valid_pattern(&pattern) {
            tracing::warn!(%pattern, "invalid date pattern, using {DEFAULT_DATE_PATTERN}");
            pattern = DEFAULT_DATE_PATTERN.to_string();
        }
        let offset = utc_offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix());
        Self { pattern, offset }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Offset applied before formatting.
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Whether chrono can render the pattern.
    pub fn is_valid_pattern(pattern: &str) -> bool {
        use chrono::format::{Item, StrftimeItems};
        !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
    }

    /// Render an instant in the configured offset.
    pub fn render(&self, at: DateTime<Utc>) -> String {
        let local = at.with_timezone(&self.offset);
        let mut out = String::new();
        if write!(out, "{}", local.format(&self.pattern)).is_ok() {
            return out;
        }
        local.format(DEFAULT_DATE_PATTERN).to_string()
    }
}

/// Select entries with `created_at > now - window`, oldest first.
///
/// `entries` must be in store order (newest first). The comparison is
/// strict: an entry exactly `window` old is excluded.
pub fn windowed<'a, I>(
    entries: I,
    window: Duration,
    now: DateTime<Utc>,
    format: &DateFormat,
) -> Vec<TrendPoint>
where
    I: IntoIterator<Item = &'a LogEntry>,
{
    let cutoff = match now.checked_sub_signed(window) {
        Some(cutoff) => Some(cutoff),
        // Cutoff precedes the earliest representable instant: keep everything.
        None if window > Duration::zero() => None,
        // Cutoff lies past the latest representable instant: keep nothing.
        None => return Vec::new(),
    };

    let mut points: Vec<TrendPoint> = entries
        .into_iter()
        .filter(|e| cutoff.map_or(true, |c| e.created_at > c))
        .map(|e| TrendPoint {
            display_date: format.render(e.created_at),
            created_at: e.created_at,
            battery_level: e.battery_level,
            mood_label: e.mood_label.clone(),
        })
        .collect();
    points.reverse();
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::NewEntry;
    use crate::store::EntryStore;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, h, m, 0).unwrap()
    }

    #[test]
    fn keeps_entries_inside_window_oldest_first() {
        let now = at(12, 0);
        let mut store = EntryStore::new();
        store.record(NewEntry::new(40, "Tired"), now - Duration::days(3));
        store.record(NewEntry::new(60, "Calm"), now - Duration::days(1));
        store.record(NewEntry::new(90, "Happy"), now - Duration::hours(1));

        let points = windowed(store.all(), default_window(), now, &DateFormat::default());
        let levels: Vec<i32> = points.iter().map(|p| p.battery_level).collect();
        assert_eq!(levels, vec![40, 60, 90]);
        assert_eq!(points[0].display_date, "2024-03-07");
    }

    #[test]
    fn entry_exactly_window_old_is_excluded() {
        let now = at(12, 0);
        let mut store = EntryStore::new();
        store.record(NewEntry::new(10, "Drained"), now - Duration::days(7));
        store.record(
            NewEntry::new(20, "Tired"),
            now - Duration::days(7) + Duration::seconds(1),
        );

        let points = windowed(store.all(), default_window(), now, &DateFormat::default());
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].mood_label, "Tired");
    }

    #[test]
    fn same_day_entries_are_not_merged() {
        let now = at(23, 0);
        let mut store = EntryStore::new();
        store.record(NewEntry::new(80, "Calm"), at(9, 0));
        store.record(NewEntry::new(30, "Social Overload"), at(14, 0));
        store.record(NewEntry::new(55, "Relaxed"), at(21, 0));

        let points = windowed(store.all(), default_window(), now, &DateFormat::default());
        assert_eq!(points.len(), 3);
        assert!(points.iter().all(|p| p.display_date == "2024-03-10"));
        assert_eq!(
            points.iter().map(|p| p.battery_level).collect::<Vec<_>>(),
            vec![80, 30, 55]
        );
    }

    #[test]
    fn empty_store_yields_empty_trend() {
        let store = EntryStore::new();
        assert!(windowed(store.all(), default_window(), at(0, 0), &DateFormat::default()).is_empty());
    }

    #[test]
    fn custom_window_is_respected() {
        let now = at(12, 0);
        let mut store = EntryStore::new();
        store.record(NewEntry::new(40, "Tired"), now - Duration::hours(30));
        store.record(NewEntry::new(60, "Calm"), now - Duration::hours(2));

        let points = windowed(store.all(), Duration::days(1), now, &DateFormat::default());
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].battery_level, 60);
    }

    #[test]
    fn overflowing_windows_do_not_panic() {
        let now = at(12, 0);
        let mut store = EntryStore::new();
        store.record(NewEntry::new(50, "Calm"), now - Duration::days(400));

        let all = windowed(store.all(), Duration::days(100_000_000), now, &DateFormat::default());
        assert_eq!(all.len(), 1);

        let none = windowed(store.all(), Duration::days(-100_000_000), now, &DateFormat::default());
        assert!(none.is_empty());
    }

    #[test]
    fn display_date_uses_offset_and_pattern() {
        let format = DateFormat::new("%d/%m %H:%M", -5);
        assert_eq!(format.render(at(3, 30)), "09/03 22:30");
    }

    #[test]
    fn invalid_pattern_falls_back_to_default() {
        assert!(!DateFormat::is_valid_pattern("%Q"));
        let format = DateFormat::new("%Q", 0);
        assert_eq!(format.pattern(), DEFAULT_DATE_PATTERN);
        assert_eq!(format.render(at(3, 30)), "2024-03-10");
    }

    #[test]
    fn out_of_range_offset_falls_back_to_utc() {
        let format = DateFormat::new("%H", 48);
        assert_eq!(format.offset(), Utc.fix());
        assert_eq!(format.render(at(3, 30)), "03");
    }
}
