//! Core error types for socialbattery-core.
//!
//! The aggregation functions themselves are total and never fail. These
//! errors only cover the fallible edges: configuration files, the export
//! codec, lock poisoning on the shared store and capture-side validation.

use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

/// Core error type for socialbattery-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Export/import errors
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A thread panicked while holding the store lock
    #[error("Entry store lock poisoned: {0}")]
    Poisoned(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Export codec errors.
#[derive(Error, Debug)]
pub enum CodecError {
    /// Export was written by a format version this build cannot read
    #[error("Unsupported export version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Export is not valid JSON or is missing fields
    #[error("Malformed export: {0}")]
    Malformed(String),

    /// The same entry id appears more than once
    #[error("Duplicate entry id {0} in export")]
    DuplicateId(Uuid),
}

/// Validation errors raised by the capture layer.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Mood label is not part of the taxonomy
    #[error("Unknown mood '{0}'")]
    UnknownMood(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl<T> From<std::sync::PoisonError<T>> for CoreError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        CoreError::Poisoned(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
