use serde::{Serialize, de::DeserializeOwned};

use crate::{
    config::Config,
    error::PerplexityError,
    types::{ChatCompletionRequest, DEFAULT_MODEL, SearchResult},
};

/// Perplexity API client
///
/// The client is generic over a [`Config`] implementation that provides the
/// credential and API location. Every call makes exactly one attempt.
#[derive(Debug, Clone)]
pub struct Client<C: Config> {
    http: reqwest::Client,
    config: C,
}

impl Client<crate::config::PerplexityConfig> {
    /// Creates a new client with default configuration
    ///
    /// Uses environment variables for authentication:
    /// - `PERPLEXITY_API_KEY` for bearer authentication
    /// - `PERPLEXITY_BASE_URL` for a custom API base URL
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(crate::config::PerplexityConfig::new())
    }
}

impl<C: Config + Default> Default for Client<C> {
    fn default() -> Self {
        Self::with_config(C::default())
    }
}

impl<C: Config> Client<C> {
    /// Creates a new client with the given configuration.
    ///
    /// Timeouts are left at the transport defaults.
    #[must_use]
    pub fn with_config(config: C) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Replaces the HTTP client with a custom one
    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Returns a reference to the client's configuration
    #[must_use]
    pub const fn config(&self) -> &C {
        &self.config
    }

    /// Answers `query` and normalizes the completion into a [`SearchResult`].
    ///
    /// `model` falls back to [`DEFAULT_MODEL`] when absent or blank.
    ///
    /// # Errors
    ///
    /// Returns [`PerplexityError::Config`] without touching the network when no
    /// credential is configured. Transport failures, non-success statuses and
    /// responses without a first choice are logged and returned.
    pub async fn search(
        &self,
        query: &str,
        model: Option<&str>,
    ) -> Result<SearchResult, PerplexityError> {
        let model = model
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_MODEL);

        let req = ChatCompletionRequest::search(model, query);
        let outcome = self
            .chat()
            .create(req)
            .await
            .and_then(SearchResult::try_from);

        if let Err(e) = &outcome {
            if !e.is_configuration() {
                tracing::warn!(
                    model,
                    status = e.status_code(),
                    error = %e,
                    "Perplexity search request failed"
                );
            }
        }
        outcome
    }

    pub(crate) async fn post<I, O>(&self, path: &str, body: I) -> Result<O, PerplexityError>
    where
        I: Serialize + Send + Sync,
        O: DeserializeOwned,
    {
        // Validate auth before any request
        self.config.validate_auth()?;

        let request = self
            .http
            .post(self.config.url(path))
            .headers(self.config.headers()?)
            .json(&body)
            .build()?;

        let bytes = self.execute_raw(request).await?;
        serde_json::from_slice(&bytes).map_err(|e| crate::error::map_deser(&e, &bytes))
    }

    async fn execute_raw(&self, request: reqwest::Request) -> Result<bytes::Bytes, PerplexityError> {
        let response = self
            .http
            .execute(request)
            .await
            .map_err(PerplexityError::Reqwest)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(PerplexityError::Reqwest)?;

        if status.is_success() {
            return Ok(bytes);
        }

        Err(crate::error::deserialize_api_error(status, &bytes))
    }
}
