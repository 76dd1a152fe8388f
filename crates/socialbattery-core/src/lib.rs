//! # Social Battery Core Library
//!
//! This library provides the core logic for the Social Battery tracker: an
//! introvert's log of social energy levels and moods. Front-ends (the CLI,
//! or any GUI) capture entries and render charts; this crate owns the
//! entries and derives the views they draw.
//!
//! ## Architecture
//!
//! - **Entry Store**: append-only, newest-first session history
//! - **Trend**: trailing-window selection of entries, oldest-first, for a
//!   battery line chart
//! - **Ranking**: all-time mood frequency with a first-logged tie-break
//! - **Tracker**: facade composing the three behind a stable read contract
//!
//! All derived views are pure functions of the store contents and an
//! explicit `now`; nothing in this crate reads the clock while filtering.
//!
//! ## Key Components
//!
//! - [`MoodTracker`]: store plus derived views
//! - [`EntryStore`]: session entry history
//! - [`SharedEntryStore`]: thread-safe store handle
//! - [`Config`]: application configuration management

pub mod config;
pub mod entry;
pub mod error;
pub mod export;
pub mod ranking;
pub mod shared;
pub mod store;
pub mod taxonomy;
pub mod tracker;
pub mod trend;

pub use config::Config;
pub use entry::{LogEntry, NewEntry};
pub use error::{CodecError, ConfigError, CoreError, ValidationError};
pub use ranking::{top_labels, FrequencyBucket};
pub use shared::SharedEntryStore;
pub use store::EntryStore;
pub use taxonomy::{BandThresholds, BatteryBand, MoodTaxonomy};
pub use tracker::{MoodTracker, TrackerSettings};
pub use trend::{windowed, DateFormat, TrendPoint};
