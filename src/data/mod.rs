//! Data model for the decoded MDS blob payload
//!
//! Every field is optional: the payload comes from an unverified token and the
//! code that reads it must decide what an absent field means at each access.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Decoded payload of the MDS blob
///
/// A field holding an unexpected JSON type reads as absent instead of failing
/// the whole payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataBlob {
    /// Legal terms attached to the feed
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub legal_header: Option<String>,
    /// Serial number of the feed
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub no: Option<u64>,
    /// Date after which the feed must be fetched again
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub next_update: Option<String>,
    /// Authenticator entries, either an AAGUID-keyed object or an array
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entries: Option<Value>,
}

impl MetadataBlob {
    /// Reads the typed view of a decoded payload
    ///
    /// A payload that is not a JSON object yields a blob with every field
    /// absent.
    pub fn from_payload(payload: Value) -> Self {
        match payload {
            Value::Object(_) => serde_json::from_value(payload).unwrap_or_default(),
            _ => Self::default(),
        }
    }
}

/// Deserializes `T`, mapping a value of the wrong type to `None`
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// One authenticator entry, kept as the original JSON record
#[derive(Debug, Clone, PartialEq)]
pub struct EntryRecord(Value);

impl EntryRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Returns `metadataStatement.description`, or `None` if it is missing or empty
    pub fn description(&self) -> Option<&str> {
        let statement = self.0.get("metadataStatement")?;
        let description = statement.get("description")?.as_str()?;
        if description.is_empty() {
            None
        } else {
            Some(description)
        }
    }

    /// The full record as received
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// Entries of the blob in iteration order, each paired with its key
///
/// A `None` record stands for a `null` or other falsy member in the feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entries(Vec<(String, Option<EntryRecord>)>);

impl Entries {
    /// Builds the entry list from the payload's `entries` value
    ///
    /// Objects are keyed by their member names (AAGUIDs). Arrays, as served by
    /// the live feed, are keyed by each record's `aaguid`, then `aaid`, then
    /// its position.
    ///
    /// # Returns
    /// * `Err(String)` describing the JSON type if it is neither an object nor an array
    pub fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Object(map) => Ok(Self(
                map.into_iter()
                    .map(|(key, record)| (key, record_or_none(record)))
                    .collect(),
            )),
            Value::Array(items) => Ok(Self(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(index, record)| (array_key(index, &record), record_or_none(record)))
                    .collect(),
            )),
            other => Err(format!("expected object or array, found {}", json_type(&other))),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&EntryRecord>)> {
        self.0.iter().map(|(key, record)| (key.as_str(), record.as_ref()))
    }
}

/// `null`, `false`, `0` and `""` carry no record
fn record_or_none(value: Value) -> Option<EntryRecord> {
    let empty = match &value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    };
    if empty {
        None
    } else {
        Some(EntryRecord::new(value))
    }
}

fn array_key(index: usize, record: &Value) -> String {
    ["aaguid", "aaid"]
        .iter()
        .find_map(|field| record.get(*field).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| index.to_string())
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
