//! All-time mood frequency ranking.
//!
//! Counts how often each mood label was logged over the whole history and
//! orders labels by count. Ties go to the label that was logged first,
//! tracked through an explicit first-occurrence index next to each count so
//! the order never depends on map iteration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::entry::LogEntry;

/// Default number of labels returned by [`top_labels`].
pub const DEFAULT_RANK_LIMIT: usize = 5;

/// Occurrence count for one mood label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyBucket {
    pub mood_label: String,
    pub count: usize,
}

#[derive(Debug)]
struct Tally {
    count: usize,
    first_seen: usize,
}

/// Rank every distinct label, most frequent first.
///
/// `entries` must be in store order (newest first).
pub fn tally<'a, I>(entries: I) -> Vec<FrequencyBucket>
where
    I: IntoIterator<Item = &'a LogEntry>,
{
    let newest_first: Vec<&LogEntry> = entries.into_iter().collect();

    let mut tallies: HashMap<&str, Tally> = HashMap::new();
    for (index, entry) in newest_first.iter().rev().enumerate() {
        tallies
            .entry(entry.mood_label.as_str())
            .and_modify(|t| t.count += 1)
            .or_insert(Tally {
                count: 1,
                first_seen: index,
            });
    }

    let mut ranked: Vec<(&str, Tally)> = tallies.into_iter().collect();
    ranked.sort_by(|(_, a), (_, b)| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.first_seen.cmp(&b.first_seen))
    });

    ranked
        .into_iter()
        .map(|(label, t)| FrequencyBucket {
            mood_label: label.to_string(),
            count: t.count,
        })
        .collect()
}

/// The `limit` most frequent labels. Fewer labels than `limit` returns all.
pub fn top_labels<'a, I>(entries: I, limit: usize) -> Vec<FrequencyBucket>
where
    I: IntoIterator<Item = &'a LogEntry>,
{
    let mut ranked = tally(entries);
    ranked.truncate(limit);
    ranked
}
