//! `/status` and `/search` handlers.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use perplexity_async::{Config, SearchResult};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::RelayError;

/// Body of `POST /search`
#[derive(Debug, Default, Deserialize)]
pub struct SearchRequestBody {
    /// Required; blank counts as missing
    #[serde(default)]
    pub query: Option<String>,
    /// Upstream model; the client default applies when absent
    #[serde(default)]
    pub model: Option<String>,
}

impl SearchRequestBody {
    /// The query, provided it has non-whitespace content
    pub fn query(&self) -> Result<&str, RelayError> {
        self.query
            .as_deref()
            .filter(|q| !q.trim().is_empty())
            .ok_or(RelayError::Validation("Query is required"))
    }
}

/// Body of `GET /status`
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusResponse {
    /// Whether a non-blank API key is configured
    pub configured: bool,
}

/// `GET /status`: reports readiness without revealing the key.
pub async fn status<C: Config + 'static>(State(state): State<AppState<C>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        configured: state.client.config().is_configured(),
    })
}

/// `POST /search`: validates the body, checks readiness, then asks upstream.
pub async fn search<C: Config + 'static>(
    State(state): State<AppState<C>>,
    body: Result<Json<SearchRequestBody>, JsonRejection>,
) -> Result<Json<SearchResult>, RelayError> {
    let Json(body) = body.map_err(|rejection| {
        tracing::debug!(%rejection, "Rejected search request body");
        RelayError::Validation("Invalid request body")
    })?;
    let query = body.query()?;

    if !state.client.config().is_configured() {
        return Err(RelayError::Configuration);
    }

    let result = state.client.search(query, body.model.as_deref()).await?;
    tracing::debug!(links = result.links.len(), "Search answered");
    Ok(Json(result))
}
