//! JSON export/import of a session's entries.
//!
//! Entries are written oldest-first so replaying them through
//! [`EntryStore::append`] restores the store exactly, including the
//! newest-first order of [`EntryStore::all`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::entry::LogEntry;
use crate::error::{CodecError, Result};
use crate::store::EntryStore;

/// Current export format version.
pub const EXPORT_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
struct ExportRef<'a> {
    version: u32,
    entries: Vec<&'a LogEntry>,
}

#[derive(Debug, Deserialize)]
struct Export {
    version: u32,
    #[serde(default)]
    entries: Vec<LogEntry>,
}

/// Serialize the store to pretty-printed JSON.
pub fn encode(store: &EntryStore) -> Result<String> {
    let export = ExportRef {
        version: EXPORT_VERSION,
        entries: store.in_insertion_order().collect(),
    };
    let json = serde_json::to_string_pretty(&export)?;
    tracing::info!(entries = store.len(), "encoded session export");
    Ok(json)
}

/// Rebuild a store from [`encode`] output.
///
/// Fails on an unknown version or when two entries share an id.
pub fn decode(json: &str) -> Result<EntryStore> {
    let export: Export =
        serde_json::from_str(json).map_err(|e| CodecError::Malformed(e.to_string()))?;

    if export.version != EXPORT_VERSION {
        return Err(CodecError::UnsupportedVersion {
            found: export.version,
            supported: EXPORT_VERSION,
        }
        .into());
    }

    let mut seen = HashSet::with_capacity(export.entries.len());
    if let Some(dup) = export.entries.iter().find(|e| !seen.insert(e.id)) {
        return Err(CodecError::DuplicateId(dup.id).into());
    }

    tracing::info!(entries = export.entries.len(), "decoded session export");
    Ok(EntryStore::from_insertion_order(export.entries))
}
