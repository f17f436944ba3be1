use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when using the Perplexity API client
#[derive(Debug, Error)]
pub enum PerplexityError {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Non-success status returned by Perplexity
    #[error("API error: {0:?}")]
    Api(ApiErrorObject),

    /// Configuration error (e.g., missing credentials)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(String),

    /// Response decoded but lacks a field the client depends on
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Error details reported for a non-success upstream response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorObject {
    /// HTTP status code
    #[serde(default)]
    pub status_code: Option<u16>,
    /// Human-readable error message
    #[serde(default)]
    pub message: String,
    /// Error type string
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// Shape of `{"error": {...}}` bodies returned by the chat-completions API
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ApiErrorObject,
}

impl PerplexityError {
    /// Whether this error is a setup problem rather than an upstream failure
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Upstream HTTP status, when the failure was a non-success response
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(obj) => obj.status_code,
            Self::Reqwest(e) => e.status().map(|s| s.as_u16()),
            Self::Config(_) | Self::Serde(_) | Self::MalformedResponse(_) => None,
        }
    }
}

fn snippet(body: &[u8]) -> String {
    String::from_utf8_lossy(&body[..body.len().min(400)]).into_owned()
}

/// Maps a serde deserialization error to a `PerplexityError` with context
#[must_use]
pub fn map_deser(e: &serde_json::Error, body: &[u8]) -> PerplexityError {
    PerplexityError::Serde(format!("{e}: {}", snippet(body)))
}

/// Deserializes an API error from the response body
///
/// Accepts both `{"error": {...}}` envelopes and bare error objects, falling
/// back to plain text.
#[must_use]
pub fn deserialize_api_error(status: StatusCode, body: &[u8]) -> PerplexityError {
    let status_code = Some(status.as_u16());

    if let Ok(ErrorEnvelope { mut error }) = serde_json::from_slice::<ErrorEnvelope>(body) {
        error.status_code = status_code;
        return PerplexityError::Api(error);
    }

    if let Ok(mut obj) = serde_json::from_slice::<ApiErrorObject>(body) {
        if !obj.message.is_empty() {
            obj.status_code = status_code;
            return PerplexityError::Api(obj);
        }
    }

    // Gateways in front of the API answer with HTML or plain text; cap the body
    PerplexityError::Api(ApiErrorObject {
        status_code,
        message: snippet(body),
        kind: Some(format!("http_{}", status.as_u16())),
    })
}
