use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::PerplexityError;

/// Default Perplexity API base URL
pub const PERPLEXITY_DEFAULT_BASE: &str = "https://api.perplexity.ai";
/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "PERPLEXITY_API_KEY";
/// Environment variable overriding the API base URL
pub const ENV_BASE_URL: &str = "PERPLEXITY_BASE_URL";

/// Configuration for the Perplexity client
///
/// Debug output automatically redacts `api_key` via [`SecretString`].
#[derive(Clone, Debug)]
pub struct PerplexityConfig {
    api_base: String,
    api_key: Option<SecretString>,
}

impl Default for PerplexityConfig {
    fn default() -> Self {
        let api_key = std::env::var(ENV_API_KEY)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(SecretString::from);

        let api_base = std::env::var(ENV_BASE_URL)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| PERPLEXITY_DEFAULT_BASE.into());

        Self { api_base, api_key }
    }
}

impl PerplexityConfig {
    /// Creates a new configuration with default settings
    ///
    /// Attempts to read from environment variables:
    /// - `PERPLEXITY_API_KEY` for bearer authentication
    /// - `PERPLEXITY_BASE_URL` for a custom API base URL (defaults to `https://api.perplexity.ai`)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL
    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Sets the API key
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(key.into()));
        self
    }

    /// Clears any API key picked up from the environment
    #[must_use]
    pub fn without_api_key(mut self) -> Self {
        self.api_key = None;
        self
    }

    /// Returns the configured API base URL
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn usable_key(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(|s| s.expose_secret().trim())
            .filter(|k| !k.is_empty())
    }
}

/// Configuration trait for the Perplexity client
///
/// This is the credential source of the client: implement it to supply the
/// API key and base URL from somewhere other than the environment.
pub trait Config: Send + Sync {
    /// Returns HTTP headers to include in requests
    ///
    /// # Errors
    ///
    /// Returns an error if header values contain invalid characters.
    fn headers(&self) -> Result<HeaderMap, PerplexityError>;

    /// Constructs the full URL for an API endpoint
    fn url(&self, path: &str) -> String;

    /// Whether a non-blank credential is present
    fn is_configured(&self) -> bool;

    /// Validates that authentication credentials are present.
    ///
    /// # Errors
    ///
    /// Returns an error if authentication is not properly configured.
    fn validate_auth(&self) -> Result<(), PerplexityError> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(PerplexityError::Config(
                "Missing Perplexity credentials: set PERPLEXITY_API_KEY environment variable"
                    .into(),
            ))
        }
    }
}

impl Config for PerplexityConfig {
    fn headers(&self) -> Result<HeaderMap, PerplexityError> {
        let mut h = HeaderMap::new();
        h.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(key) = self.usable_key() {
            let mut value = HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|_| PerplexityError::Config("Invalid Authorization value".into()))?;
            value.set_sensitive(true);
            h.insert(AUTHORIZATION, value);
        }

        Ok(h)
    }

    fn url(&self, path: &str) -> String {
        let base = self.api_base.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    fn is_configured(&self) -> bool {
        self.usable_key().is_some()
    }
}
