//! One sync run: cache check, conditional download, entry fan-out
//!
//! Problems with the *cached* blob only trigger a refetch. Problems with the
//! freshly downloaded blob, or with caching it, abort the run. Problems with a
//! single entry only affect that entry.

use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::cache::{CacheRead, CacheStore, StorageError};
use crate::client::{FetchError, MdsClient};
use crate::config::SyncConfig;
use crate::data::{Entries, MetadataBlob};
use crate::freshness::{needs_refresh, parse_next_update};
use crate::output::{write_all, FanOutReport, JsonDirSink};
use crate::token::{decode_payload, TokenError};

/// Fatal errors of a sync run
#[derive(Debug, Error)]
pub enum SyncError {
    /// The downloaded blob could not be decoded
    #[error(transparent)]
    Token(#[from] TokenError),

    /// A directory could not be created or the cache could not be written
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The blob could not be downloaded
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The decoded payload lacks a required field
    #[error("Invalid MDS blob format: missing {0}")]
    MissingField(&'static str),

    /// The `entries` field has an unusable shape
    #[error("Invalid MDS blob format: entries {0}")]
    InvalidEntries(String),
}

/// Where the processed blob came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobSource {
    Cache,
    Remote,
}

/// Summary of a completed run
#[derive(Debug)]
pub struct SyncReport {
    pub source: BlobSource,
    pub fan_out: FanOutReport,
}

/// Runs the cache-check / fetch / fan-out sequence
#[derive(Debug, Clone)]
pub struct MdsSync {
    client: MdsClient,
    cache: CacheStore,
    output: JsonDirSink,
}

impl MdsSync {
    pub fn new(config: SyncConfig) -> Self {
        Self {
            client: MdsClient::new(config.mds_url),
            cache: CacheStore::new(config.cache_dir, config.cache_file),
            output: JsonDirSink::new(config.output_dir),
        }
    }

    /// Runs against the current wall-clock time
    pub async fn run(&self) -> Result<SyncReport, SyncError> {
        self.run_at(Utc::now()).await
    }

    /// Runs with `now` as the reference time for the freshness check
    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<SyncReport, SyncError> {
        self.output.ensure_dir()?;
        self.cache.ensure_dir()?;

        let (payload, source) = match self.cached_payload(now) {
            Some(payload) => {
                info!("Using cached MDS blob");
                (payload, BlobSource::Cache)
            }
            None => {
                info!("Fetching fresh MDS blob");
                (self.refresh().await?, BlobSource::Remote)
            }
        };

        let entries = payload.entries.ok_or(SyncError::MissingField("entries"))?;
        let entries = Entries::from_value(entries).map_err(SyncError::InvalidEntries)?;

        if entries.is_empty() {
            warn!("MDS blob contains no entries");
        } else {
            info!(count = entries.len(), "Processing metadata statements");
        }
        let fan_out = write_all(&entries, &self.output);

        info!(
            written = fan_out.written.len(),
            skipped = fan_out.skipped.len(),
            failed = fan_out.failed.len(),
            "Processing complete, results in {}",
            self.output.dir().display()
        );

        Ok(SyncReport { source, fan_out })
    }

    /// Returns the cached payload if it is decodable and still fresh
    fn cached_payload(&self, now: DateTime<Utc>) -> Option<MetadataBlob> {
        let blob = match self.cache.load() {
            CacheRead::Present(blob) => blob,
            CacheRead::Missing => {
                info!("No cached MDS blob at {}", self.cache.path().display());
                return None;
            }
            CacheRead::Corrupt(reason) => {
                warn!("Cached blob is unreadable ({}), will fetch a new one", reason);
                return None;
            }
        };

        let payload = match decode_payload::<Value>(&blob) {
            Ok(payload) => MetadataBlob::from_payload(payload),
            Err(e) => {
                warn!("Cached blob is invalid ({}), will fetch a new one", e);
                return None;
            }
        };

        if needs_refresh(&payload, now) {
            match payload.next_update.as_deref().and_then(parse_next_update) {
                Some(next_update) => info!(%next_update, "Cached MDS blob has expired"),
                None => info!("Cached MDS blob has no usable nextUpdate"),
            }
            return None;
        }

        Some(payload)
    }

    /// Downloads, caches and decodes a fresh blob
    async fn refresh(&self) -> Result<MetadataBlob, SyncError> {
        let blob = self.client.fetch_blob().await?;
        self.cache.write(&blob)?;
        let payload: Value = decode_payload(&blob)?;
        Ok(MetadataBlob::from_payload(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message() {
        let err = SyncError::MissingField("entries");
        assert_eq!(err.to_string(), "Invalid MDS blob format: missing entries");
    }

    #[test]
    fn test_token_error_is_transparent() {
        let err: SyncError = TokenError::Malformed { segments: 1 }.into();
        assert!(err.to_string().starts_with("Malformed token"));
    }
}
