//! Log entry types.
//!
//! A [`LogEntry`] is one self-observation: a social battery reading, a mood
//! label and optional notes, stamped with the instant it was saved. Entries
//! are immutable once created.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lowest battery level the capture layer accepts.
pub const MIN_BATTERY: i32 = 0;

/// Highest battery level the capture layer accepts.
pub const MAX_BATTERY: i32 = 100;

/// One recorded self-observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Unique entry ID
    pub id: Uuid,

    /// When the entry was saved. Used for both display and windowing.
    pub created_at: DateTime<Utc>,

    /// Social battery level. Nominally 0-100 but never re-validated here.
    pub battery_level: i32,

    /// Mood label from the taxonomy, treated as an opaque identifier
    pub mood_label: String,

    /// Optional free-text notes
    #[serde(default)]
    pub notes: Option<String>,
}

impl LogEntry {
    /// Notes to show, treating an empty string the same as no notes.
    pub fn display_notes(&self) -> Option<&str> {
        self.notes.as_deref().filter(|n| !n.is_empty())
    }
}

/// Field values chosen in the capture UI, not yet stamped with id and time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntry {
    pub battery_level: i32,
    pub mood_label: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewEntry {
    pub fn new(battery_level: i32, mood_label: impl Into<String>) -> Self {
        Self {
            battery_level,
            mood_label: mood_label.into(),
            notes: None,
        }
    }

    /// Attach notes to the entry.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Apply the capture layer's normalization: battery clamped to
    /// [`MIN_BATTERY`]..=[`MAX_BATTERY`], empty notes dropped.
    pub fn clamped(self) -> Self {
        Self {
            battery_level: self.battery_level.clamp(MIN_BATTERY, MAX_BATTERY),
            mood_label: self.mood_label,
            notes: self.notes.filter(|n| !n.trim().is_empty()),
        }
    }

    /// Stamp the entry with a fresh id and the given creation instant.
    pub fn into_entry(self, created_at: DateTime<Utc>) -> LogEntry {
        LogEntry {
            id: Uuid::new_v4(),
            created_at,
            battery_level: self.battery_level,
            mood_label: self.mood_label,
            notes: self.notes,
        }
    }
}
