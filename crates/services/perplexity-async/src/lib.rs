#![warn(missing_docs)]

//! Async Perplexity chat-completions client that normalizes answers into
//! `{result, links}` search results.

/// HTTP client implementation
pub mod client;
/// Configuration types for the client
pub mod config;
/// Error types
pub mod error;
/// API resource implementations
pub mod resources;
/// Test support utilities (for use in tests)
#[doc(hidden)]
pub mod test_support;
/// Request and response types
pub mod types;

pub use crate::client::Client;
pub use crate::config::{Config, PerplexityConfig};
pub use crate::error::{ApiErrorObject, PerplexityError};
pub use crate::types::search::{DEFAULT_MODEL, Link, SearchResult};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::types::*;
    pub use crate::{Client, Config, PerplexityConfig};
}
