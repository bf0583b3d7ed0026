//! Payload decoding for JWT-shaped signed tokens
//!
//! The MDS blob is delivered as `header.payload.signature`, each segment
//! base64url-encoded. Only the payload is consumed here.
//!
//! **The signature is NOT verified.** Decoding trusts whatever the transport
//! delivered; callers that need authenticity must verify the token against
//! the FIDO root certificate themselves.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Standard alphabet that accepts the payload with or without `=` padding
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Errors that can occur when decoding a token payload
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token is not made of three non-empty dot-separated segments
    #[error("Malformed token: expected three non-empty segments (header.payload.signature), found {segments}")]
    Malformed { segments: usize },

    /// The payload segment could not be decoded into the requested structure
    #[error("Failed to parse token payload: {reason}")]
    PayloadParse { reason: String },
}

/// Decodes the payload segment of a signed token into `T`
///
/// Use `serde_json::Value` as `T` to get the payload structure exactly as
/// encoded, or a typed model such as [`crate::data::MetadataBlob`].
///
/// # Errors
/// * `TokenError::Malformed` if the token does not have exactly three non-empty segments
/// * `TokenError::PayloadParse` if the payload is not base64, not UTF-8, or not valid JSON for `T`
pub fn decode_payload<T: DeserializeOwned>(token: &str) -> Result<T, TokenError> {
    let segments: Vec<&str> = token.trim().split('.').collect();
    if segments.len() != 3 || segments.iter().any(|s| s.is_empty()) {
        return Err(TokenError::Malformed {
            segments: segments.len(),
        });
    }

    // base64url -> standard alphabet
    let payload = segments[1].replace('-', "+").replace('_', "/");

    let bytes = PAYLOAD_ENGINE
        .decode(payload.as_bytes())
        .map_err(|e| TokenError::PayloadParse {
            reason: format!("invalid base64: {}", e),
        })?;

    let text = String::from_utf8(bytes).map_err(|e| TokenError::PayloadParse {
        reason: format!("payload is not UTF-8: {}", e),
    })?;

    serde_json::from_str(&text).map_err(|e| TokenError::PayloadParse {
        reason: e.to_string(),
    })
}
