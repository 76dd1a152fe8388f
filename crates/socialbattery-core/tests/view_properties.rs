//! Property tests for the store, trend and ranking invariants.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use socialbattery_core::ranking::{tally, top_labels};
use socialbattery_core::trend::{windowed, DateFormat};
use socialbattery_core::{EntryStore, NewEntry};

const MOODS: &[&str] = &["Calm", "Tired", "Happy", "Anxious", "Need Space", "", "Focused"];

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// (minutes after base, battery, mood index). Timestamps are not sorted,
/// matching a clock that may be adjusted between saves.
fn arb_entries() -> impl Strategy<Value = Vec<(i64, i32, usize)>> {
    prop::collection::vec((0i64..30 * 24 * 60, -50i32..150, 0..MOODS.len()), 0..40)
}

fn build(rows: &[(i64, i32, usize)]) -> EntryStore {
    let mut store = EntryStore::new();
    for &(minutes, battery, mood) in rows {
        store.record(NewEntry::new(battery, MOODS[mood]), base() + Duration::minutes(minutes));
    }
    store
}

proptest! {
    #![proptest_config(ProptestConfig {
        failure_persistence: None,
        .. ProptestConfig::default()
    })]

    #[test]
    fn append_puts_new_entry_first(rows in arb_entries(), battery in 0i32..=100) {
        let mut store = build(&rows);
        let before: Vec<_> = store.all().map(|e| e.id).collect();
        let id = store.record(NewEntry::new(battery, "Calm"), base()).id;

        let after: Vec<_> = store.all().map(|e| e.id).collect();
        prop_assert_eq!(after[0], id);
        prop_assert_eq!(&after[1..], &before[..]);
    }

    #[test]
    fn windowed_points_respect_bound_and_order(
        rows in arb_entries(),
        now_minutes in 0i64..40 * 24 * 60,
        window_hours in 1i64..20 * 24,
    ) {
        let store = build(&rows);
        let now = base() + Duration::minutes(now_minutes);
        let window = Duration::hours(window_hours);
        let cutoff = now - window;

        let points = windowed(store.all(), window, now, &DateFormat::default());

        prop_assert!(points.iter().all(|p| p.created_at > cutoff));
        let expected = store.all().filter(|e| e.created_at > cutoff).count();
        prop_assert_eq!(points.len(), expected);

        // Oldest-first is chronological once entries are appended in time order.
        let mut sorted = rows.clone();
        sorted.sort_by_key(|s| s.0);
        let chronological = build(&sorted);
        let points = windowed(chronological.all(), window, now, &DateFormat::default());
        prop_assert!(points.windows(2).all(|w| w[0].created_at <= w[1].created_at));
    }

    #[test]
    fn ranking_is_bounded_and_sorted(rows in arb_entries(), limit in 0usize..10) {
        let store = build(&rows);
        let top = top_labels(store.all(), limit);
        let distinct = tally(store.all()).len();

        prop_assert!(top.len() <= limit);
        prop_assert!(top.len() <= distinct);
        prop_assert_eq!(top.len(), limit.min(distinct));
        prop_assert!(top.iter().map(|b| b.count).sum::<usize>() <= store.len());
        prop_assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn full_tally_accounts_for_every_entry(rows in arb_entries()) {
        let store = build(&rows);
        let ranked = tally(store.all());
        prop_assert_eq!(ranked.iter().map(|b| b.count).sum::<usize>(), store.len());
    }
}
