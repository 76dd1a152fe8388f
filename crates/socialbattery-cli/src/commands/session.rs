//! Interactive logging session.
//!
//! Reads one command per line from stdin. Entries live for the duration of
//! the session; `export` (or `--export`) writes them out so a later
//! `report` or `session --resume` can pick them up.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use clap::Args;
use socialbattery_core::{
    export, Config, EntryStore, MoodTaxonomy, MoodTracker, NewEntry, ValidationError,
};

use super::output;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

const HELP: &str = "\
Commands:
  log <battery> <mood> [-- notes]   record an entry (battery 0-100)
  trend [days]                      battery trend, default window from config
  top [limit]                       most frequent moods
  history                           all entries, newest first
  export <path>                     write the session to a file
  help                              show this help
  quit                              end the session";

#[derive(Args)]
pub struct SessionArgs {
    /// Write the session to this file when it ends
    #[arg(long)]
    export: Option<PathBuf>,
    /// Start from a previously exported session
    #[arg(long)]
    resume: Option<PathBuf>,
}

#[derive(Debug, PartialEq)]
enum SessionCommand {
    Log(NewEntry),
    Trend(Option<i64>),
    Top(Option<usize>),
    History,
    Export(PathBuf),
    Help,
    Quit,
}

fn parse_log(rest: &str, taxonomy: &MoodTaxonomy) -> CliResult<NewEntry> {
    let (head, notes) = match rest.split_once("--") {
        Some((head, notes)) => (head, Some(notes.trim())),
        None => (rest, None),
    };
    let mut words = head.split_whitespace();

    let battery_raw = words.next().ok_or_else(|| ValidationError::InvalidValue {
        field: "battery".into(),
        message: "missing battery level".into(),
    })?;
    let battery: i32 = battery_raw.parse().map_err(|_| ValidationError::InvalidValue {
        field: "battery".into(),
        message: format!("'{battery_raw}' is not a whole number"),
    })?;

    let mood_input = words.collect::<Vec<_>>().join(" ");
    if mood_input.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "mood".into(),
            message: "missing mood".into(),
        }
        .into());
    }
    let mood = taxonomy
        .resolve(&mood_input)
        .ok_or_else(|| ValidationError::UnknownMood(mood_input.clone()))?;

    let mut entry = NewEntry::new(battery, mood);
    if let Some(notes) = notes {
        entry = entry.with_notes(notes);
    }
    Ok(entry.clamped())
}

fn parse_line(line: &str, taxonomy: &MoodTaxonomy) -> CliResult<Option<SessionCommand>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match word.to_ascii_lowercase().as_str() {
        "log" => SessionCommand::Log(parse_log(rest, taxonomy)?),
        "trend" if rest.is_empty() => SessionCommand::Trend(None),
        "trend" => SessionCommand::Trend(Some(rest.parse()?)),
        "top" if rest.is_empty() => SessionCommand::Top(None),
        "top" => SessionCommand::Top(Some(rest.parse()?)),
        "history" => SessionCommand::History,
        "export" if rest.is_empty() => return Err("export needs a file path".into()),
        "export" => SessionCommand::Export(PathBuf::from(rest)),
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        other => return Err(format!("unknown command '{other}', try 'help'").into()),
    };
    Ok(Some(command))
}

fn write_export(store: &EntryStore, path: &Path) -> CliResult<()> {
    std::fs::write(path, export::encode(store)?)?;
    Ok(())
}

/// One interactive session over a tracker.
pub struct Session {
    tracker: MoodTracker,
    config: Config,
    taxonomy: MoodTaxonomy,
}

impl Session {
    pub fn new(store: EntryStore, config: Config) -> Self {
        Self {
            tracker: MoodTracker::with_store(store, config.tracker_settings()),
            config,
            taxonomy: MoodTaxonomy::default(),
        }
    }

    pub fn store(&self) -> &EntryStore {
        self.tracker.store()
    }

    /// Apply one command. Returns `false` once the session should end.
    fn apply(
        &mut self,
        command: SessionCommand,
        now: DateTime<Utc>,
        out: &mut impl Write,
    ) -> CliResult<bool> {
        match command {
            SessionCommand::Log(new_entry) => {
                let entry = self.tracker.record(new_entry, now);
                writeln!(
                    out,
                    "saved: {}% - {}",
                    entry.battery_level, entry.mood_label
                )?;
            }
            SessionCommand::Trend(days) => {
                let window_days = days.unwrap_or(self.config.trend.window_days);
                let window = Duration::try_days(window_days)
                    .ok_or_else(|| format!("window of {window_days} days is out of range"))?;
                let points = self.tracker.recent_trend_within(window, now);
                output::write_trend(out, &points, window_days)?;
            }
            SessionCommand::Top(limit) => {
                let buckets = match limit {
                    Some(limit) => self.tracker.top_moods_limited(limit),
                    None => self.tracker.top_moods(),
                };
                output::write_top_moods(out, &buckets)?;
            }
            SessionCommand::History => {
                output::write_history(
                    out,
                    self.tracker.store(),
                    self.config.band_thresholds(),
                    self.tracker.settings().date_format.offset(),
                )?;
            }
            SessionCommand::Export(path) => {
                write_export(self.tracker.store(), &path)?;
                writeln!(
                    out,
                    "exported {} entries to {}",
                    self.tracker.store().len(),
                    path.display()
                )?;
            }
            SessionCommand::Help => writeln!(out, "{HELP}")?,
            SessionCommand::Quit => return Ok(false),
        }
        Ok(true)
    }

    /// Run commands from `input` until `quit` or end of input. Bad lines are
    /// reported on `out` and the session carries on.
    pub fn drive(
        &mut self,
        mut input: impl BufRead,
        out: &mut impl Write,
        clock: impl Fn() -> DateTime<Utc>,
    ) -> CliResult<()> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let keep_going = match std::str::from_utf8(&buf) {
                Ok(line) => match parse_line(line, &self.taxonomy) {
                    Ok(Some(command)) => self.apply(command, clock(), out),
                    Ok(None) => Ok(true),
                    Err(e) => Err(e),
                },
                Err(_) => Err("line is not valid UTF-8".into()),
            };
            match keep_going {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    tracing::debug!("session command failed: {e}");
                    writeln!(out, "error: {e}")?;
                }
            }
            out.flush()?;
        }
        Ok(())
    }
}

pub fn run(args: SessionArgs) -> CliResult<()> {
    let config = Config::load_or_default();
    let store = match &args.resume {
        Some(path) => export::decode(&std::fs::read_to_string(path)?)?,
        None => EntryStore::new(),
    };

    let mut session = Session::new(store, config);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let driven = session.drive(stdin.lock(), &mut stdout, Utc::now);

    if let Some(path) = &args.export {
        write_export(session.store(), path)?;
        eprintln!("exported {} entries to {}", session.store().len(), path.display());
    }
    driven
}
