//! Fan-out of blob entries into one JSON file per authenticator

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::StorageError;
use crate::data::Entries;
use crate::sanitize::sanitize;

/// Destination for individual entry records
pub trait EntrySink {
    /// Persists `record` under `identifier`, replacing any previous record with that name
    fn put(&self, identifier: &str, record: &Value) -> Result<PathBuf, StorageError>;
}

/// Writes each record to `<dir>/<identifier>.json`, pretty-printed
#[derive(Debug, Clone)]
pub struct JsonDirSink {
    dir: PathBuf,
}

impl JsonDirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Ensures the output directory exists
    pub fn ensure_dir(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|e| StorageError::io(&self.dir, e))
    }
}

impl EntrySink for JsonDirSink {
    fn put(&self, identifier: &str, record: &Value) -> Result<PathBuf, StorageError> {
        let path = self.dir.join(format!("{}.json", identifier));
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&path, json).map_err(|e| StorageError::io(&path, e))?;
        Ok(path)
    }
}

/// Why an entry was not written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The entry was `null`
    NullRecord,
    /// `metadataStatement.description` was missing or empty
    MissingDescription,
    /// The description contained nothing usable for a file name
    EmptyIdentifier,
}

/// Per-entry outcome of a fan-out pass
#[derive(Debug, Default)]
pub struct FanOutReport {
    /// Files written, in processing order
    pub written: Vec<PathBuf>,
    /// Entry keys that were skipped
    pub skipped: Vec<(String, SkipReason)>,
    /// Entry keys whose write failed, with the error message
    pub failed: Vec<(String, String)>,
}

/// Writes every qualifying entry through `sink`
///
/// Entries without a description are skipped with a warning. A failed write
/// is logged and does not stop the remaining entries. Two descriptions that
/// sanitize to the same identifier overwrite each other; the later one wins.
pub fn write_all<S: EntrySink + ?Sized>(entries: &Entries, sink: &S) -> FanOutReport {
    let mut report = FanOutReport::default();

    for (aaguid, record) in entries.iter() {
        let Some(record) = record else {
            report.skipped.push((aaguid.to_string(), SkipReason::NullRecord));
            continue;
        };

        let Some(description) = record.description() else {
            warn!("Skipping entry with AAGUID {} due to missing description", aaguid);
            report
                .skipped
                .push((aaguid.to_string(), SkipReason::MissingDescription));
            continue;
        };

        let identifier = sanitize(description);
        if identifier.is_empty() {
            warn!(
                "Skipping entry with AAGUID {}: description {:?} yields no usable file name",
                aaguid, description
            );
            report
                .skipped
                .push((aaguid.to_string(), SkipReason::EmptyIdentifier));
            continue;
        }

        match sink.put(&identifier, record.as_value()) {
            Ok(path) => {
                debug!(aaguid, path = %path.display(), "wrote entry");
                report.written.push(path);
            }
            Err(e) => {
                warn!("Failed to write entry with AAGUID {}: {}", aaguid, e);
                report.failed.push((aaguid.to_string(), e.to_string()));
            }
        }
    }

    report
}
