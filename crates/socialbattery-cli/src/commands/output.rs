//! Plain-text rendering of the derived views.

use std::io::{self, Write};

use chrono::FixedOffset;
use socialbattery_core::{BandThresholds, BatteryBand, EntryStore, FrequencyBucket, TrendPoint};

pub fn write_trend(out: &mut impl Write, points: &[TrendPoint], window_days: i64) -> io::Result<()> {
    writeln!(out, "Social battery trend (last {window_days} days)")?;
    if points.is_empty() {
        writeln!(out, "  no entries in window")?;
    }
    for point in points {
        writeln!(
            out,
            "  {}  {:>3}%  {}",
            point.display_date, point.battery_level, point.mood_label
        )?;
    }
    Ok(())
}

pub fn write_top_moods(out: &mut impl Write, buckets: &[FrequencyBucket]) -> io::Result<()> {
    writeln!(out, "Most frequent moods")?;
    if buckets.is_empty() {
        writeln!(out, "  no entries yet")?;
    }
    for (rank, bucket) in buckets.iter().enumerate() {
        writeln!(out, "  {}. {} ({})", rank + 1, bucket.mood_label, bucket.count)?;
    }
    Ok(())
}

pub fn write_history(
    out: &mut impl Write,
    store: &EntryStore,
    thresholds: BandThresholds,
    offset: FixedOffset,
) -> io::Result<()> {
    writeln!(out, "Recent logs")?;
    if store.is_empty() {
        writeln!(out, "  no entries yet")?;
    }
    for entry in store.all() {
        let band = BatteryBand::classify(entry.battery_level, thresholds);
        writeln!(
            out,
            "  {}  {:>3}% [{}] - {}",
            entry.created_at.with_timezone(&offset).format("%Y-%m-%d %H:%M"),
            entry.battery_level,
            band.as_str(),
            entry.mood_label
        )?;
        if let Some(notes) = entry.display_notes() {
            writeln!(out, "      {notes}")?;
        }
    }
    Ok(())
}
