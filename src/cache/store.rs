//! Cache store for persisting the MDS blob to disk
//!
//! Provides a `CacheStore` that keeps the last fetched token as a pretty-printed
//! JSON string in a single well-known file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur when persisting data to disk
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Value could not be serialized to JSON
    #[error("Failed to serialize JSON: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Outcome of reading the cache slot
///
/// Only [`CacheStore::read`] is used for the refresh decision; the distinction
/// between a missing and a corrupt file is kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheRead {
    /// A blob was read from the cache file
    Present(String),
    /// The cache file does not exist
    Missing,
    /// The cache file exists but could not be read or parsed
    Corrupt(String),
}

/// Manages reading and writing the cached blob
#[derive(Debug, Clone)]
pub struct CacheStore {
    /// Directory where the cache file is stored
    cache_dir: PathBuf,
    /// Name of the cache file inside `cache_dir`
    file_name: String,
}

impl CacheStore {
    /// Creates a CacheStore for `<cache_dir>/<file_name>`
    pub fn new(cache_dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            file_name: file_name.into(),
        }
    }

    /// Path of the single cache slot
    pub fn path(&self) -> PathBuf {
        self.cache_dir.join(&self.file_name)
    }

    /// Ensures the cache directory exists
    pub fn ensure_dir(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.cache_dir).map_err(|e| StorageError::io(&self.cache_dir, e))
    }

    /// Writes the blob to the cache, replacing any previous content
    ///
    /// The blob is stored as a pretty-printed JSON string.
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err(StorageError)` if directory creation or file writing fails
    pub fn write(&self, blob: &str) -> Result<(), StorageError> {
        self.ensure_dir()?;

        let json = serde_json::to_string_pretty(blob)?;
        let path = self.path();
        fs::write(&path, json).map_err(|e| StorageError::io(path, e))
    }

    /// Reads the cache slot, distinguishing missing from corrupt
    pub fn load(&self) -> CacheRead {
        load_from(&self.path())
    }

    /// Reads the cached blob
    ///
    /// # Returns
    /// * `Some(String)` if the cache file exists and holds a JSON string
    /// * `None` if the file is missing or cannot be read or parsed
    pub fn read(&self) -> Option<String> {
        match self.load() {
            CacheRead::Present(blob) => Some(blob),
            CacheRead::Missing | CacheRead::Corrupt(_) => None,
        }
    }
}

fn load_from(path: &Path) -> CacheRead {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return CacheRead::Missing,
        Err(e) => return CacheRead::Corrupt(e.to_string()),
    };

    match serde_json::from_str::<String>(&content) {
        Ok(blob) => CacheRead::Present(blob),
        Err(e) => CacheRead::Corrupt(e.to_string()),
    }
}
