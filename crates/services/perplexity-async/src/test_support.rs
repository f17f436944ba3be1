//! Test-only helpers: environment guards and canned upstream payloads.

use crate::{Client, PerplexityConfig};

/// RAII guard for temporarily setting or removing an environment variable.
///
/// Restores the previous value on drop. Pair with `#[serial(env)]`.
pub struct EnvGuard {
    key: &'static str,
    prev: Option<String>,
}

impl EnvGuard {
    /// Set `key` for the lifetime of the guard.
    #[must_use]
    pub fn set(key: &'static str, val: &str) -> Self {
        let prev = std::env::var(key).ok();
        // SAFETY: callers serialize env mutation with `#[serial(env)]`.
        unsafe { std::env::set_var(key, val) };
        Self { key, prev }
    }

    /// Remove `key` for the lifetime of the guard.
    #[must_use]
    pub fn remove(key: &'static str) -> Self {
        let prev = std::env::var(key).ok();
        // SAFETY: callers serialize env mutation with `#[serial(env)]`.
        unsafe { std::env::remove_var(key) };
        Self { key, prev }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.prev {
            // SAFETY: see `EnvGuard::set`.
            Some(v) => unsafe { std::env::set_var(self.key, v) },
            // SAFETY: see `EnvGuard::remove`.
            None => unsafe { std::env::remove_var(self.key) },
        }
    }
}

/// Client pointed at `base` (usually a wiremock URI) with key `test-api-key`.
#[must_use]
pub fn client_for(base: &str) -> Client<PerplexityConfig> {
    Client::with_config(
        PerplexityConfig::new()
            .with_api_base(base)
            .with_api_key("test-api-key"),
    )
}

/// Client pointed at `base` with no credential.
#[must_use]
pub fn unconfigured_client_for(base: &str) -> Client<PerplexityConfig> {
    Client::with_config(PerplexityConfig::new().with_api_base(base).without_api_key())
}

/// A `chat.completion` body with one assistant choice and the given citations.
#[must_use]
pub fn completion_body(content: &str, citations: &[&str]) -> serde_json::Value {
    serde_json::json!({
        "id": "c6b1b3c4-0000-4000-8000-000000000001",
        "model": "sonar",
        "object": "chat.completion",
        "created": 1_735_689_600,
        "citations": citations,
        "choices": [
            {
                "index": 0,
                "finish_reason": "stop",
                "message": { "role": "assistant", "content": content },
                "delta": { "role": "assistant", "content": "" }
            }
        ],
        "usage": { "prompt_tokens": 31, "completion_tokens": 12, "total_tokens": 43 }
    })
}
