//! The `{data, status, error}` wrapper shared by the upstream and this service.
//!
//! Decoding is a pure function of the body text. The upstream's `status` string is
//! never read: success or failure is derived from whether `error` is populated.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Outcome indicator carried by every envelope this service emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnvelopeStatus {
    Success,
    Failure,
}

/// Outbound envelope. `null` members are omitted when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub status: EnvelopeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub const fn success(data: T) -> Self {
        Self {
            data: Some(data),
            status: EnvelopeStatus::Success,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            data: None,
            status: EnvelopeStatus::Failure,
            error: Some(error.into()),
        }
    }
}

/// Result of decoding an upstream envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded<T> {
    /// Successful envelope; `data` may legitimately be absent.
    Success(Option<T>),
    /// The envelope reported a failure with this message.
    Failure(String),
}

/// The body was not an envelope of the expected payload type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed envelope: {detail}")]
pub struct EnvelopeDecodeError {
    detail: String,
}

impl EnvelopeDecodeError {
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

#[derive(Deserialize)]
struct WireEnvelope<T> {
    data: Option<T>,
    #[serde(default)]
    error: Option<String>,
}

/// Decodes an upstream body into a typed payload or a reported failure.
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<Decoded<T>, EnvelopeDecodeError> {
    let wire: WireEnvelope<T> = serde_json::from_str(body).map_err(|error| EnvelopeDecodeError {
        detail: error.to_string(),
    })?;

    if let Some(error) = wire.error.filter(|message| !message.trim().is_empty()) {
        return Ok(Decoded::Failure(error));
    }

    Ok(Decoded::Success(wire.data))
}

/// Best human-readable detail for an error body: the envelope's `error` when the body
/// is an envelope, otherwise the trimmed raw text.
pub fn error_detail(body: &str) -> String {
    match decode::<serde_json::Value>(body) {
        Ok(Decoded::Failure(message)) => message,
        _ => body.trim().to_owned(),
    }
}
