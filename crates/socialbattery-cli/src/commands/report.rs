//! Derived views over an exported session.

use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use clap::Args;
use serde::Serialize;
use socialbattery_core::{export, Config, FrequencyBucket, MoodTracker, TrendPoint};

use super::output;

#[derive(Args)]
pub struct ReportArgs {
    /// Session export to read
    #[arg(long, short)]
    input: PathBuf,
    /// Reference instant for the trend window (RFC 3339), defaults to now
    #[arg(long)]
    now: Option<DateTime<Utc>>,
    /// Trend window in days, defaults to the configured window
    #[arg(long)]
    window_days: Option<i64>,
    /// Number of moods to rank, defaults to the configured limit
    #[arg(long)]
    limit: Option<usize>,
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report {
    window_days: i64,
    entries: usize,
    trend: Vec<TrendPoint>,
    top_moods: Vec<FrequencyBucket>,
}

pub fn run(args: ReportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store = export::decode(&std::fs::read_to_string(&args.input)?)?;
    let tracker = MoodTracker::with_store(store, config.tracker_settings());

    let now = args.now.unwrap_or_else(Utc::now);
    let window_days = args.window_days.unwrap_or(config.trend.window_days);
    let window = Duration::try_days(window_days)
        .ok_or_else(|| format!("window of {window_days} days is out of range"))?;

    let report = Report {
        window_days,
        entries: tracker.store().len(),
        trend: tracker.recent_trend_within(window, now),
        top_moods: match args.limit {
            Some(limit) => tracker.top_moods_limited(limit),
            None => tracker.top_moods(),
        },
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let mut stdout = std::io::stdout().lock();
        output::write_trend(&mut stdout, &report.trend, report.window_days)?;
        output::write_top_moods(&mut stdout, &report.top_moods)?;
    }
    Ok(())
}
