//! Failure taxonomy for the relay and its mapping to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use perplexity_async::PerplexityError;
use serde::Serialize;
use thiserror::Error;

/// Message returned for every upstream failure. The cause stays in the logs.
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Failed to search with Perplexity API";

/// Everything a relay request can fail with.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Caller sent an unusable request
    #[error("{0}")]
    Validation(&'static str),

    /// No usable credential
    #[error("Perplexity API key is not configured")]
    Configuration,

    /// Talking to or decoding the upstream API failed
    #[error("Failed to search with Perplexity API")]
    Upstream(#[source] PerplexityError),
}

impl From<PerplexityError> for RelayError {
    fn from(e: PerplexityError) -> Self {
        if e.is_configuration() {
            Self::Configuration
        } else {
            Self::Upstream(e)
        }
    }
}

/// JSON body of every non-200 response
#[derive(Serialize)]
pub struct ErrorBody {
    /// Caller-safe message
    pub error: String,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) | Self::Configuration => StatusCode::BAD_REQUEST,
            Self::Upstream(source) => {
                tracing::error!(
                    error = %source,
                    upstream_status = source.status_code(),
                    "Error searching with Perplexity API"
                );
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
