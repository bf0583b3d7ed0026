//! Locations used by a sync run
//!
//! The tool has no configuration surface; these defaults are fixed and only
//! overridden by tests.

use std::path::PathBuf;

use crate::client::DEFAULT_MDS_URL;

/// Directory holding the cached blob, relative to the working directory
pub const DEFAULT_CACHE_DIR: &str = "cache";

/// File name of the cached blob inside the cache directory
pub const CACHE_FILE_NAME: &str = "mds-blob.json";

/// Directory receiving one JSON file per entry
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Remote URL and local paths for a sync run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub mds_url: String,
    pub cache_dir: PathBuf,
    pub cache_file: String,
    pub output_dir: PathBuf,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            mds_url: DEFAULT_MDS_URL.to_string(),
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            cache_file: CACHE_FILE_NAME.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl SyncConfig {
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.mds_url = url.into();
        self
    }

    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = dir.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}
