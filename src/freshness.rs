//! Staleness check for the cached MDS blob
//!
//! The feed carries its own expiry in `nextUpdate`. Anything that cannot be
//! read as a date counts as expired.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::data::MetadataBlob;

/// Returns `true` when the blob must be fetched again
///
/// The expiry instant itself counts as stale.
pub fn needs_refresh(payload: &MetadataBlob, now: DateTime<Utc>) -> bool {
    match payload.next_update.as_deref().and_then(parse_next_update) {
        Some(next_update) => now >= next_update,
        None => true,
    }
}

/// Parses a `nextUpdate` value
///
/// Accepts RFC 3339 timestamps, plain dates (`2024-07-15`, midnight UTC) and
/// offset-less datetimes (`2024-07-15T05:30:00`, read as UTC).
pub fn parse_next_update(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|dt| dt.and_utc())
}
