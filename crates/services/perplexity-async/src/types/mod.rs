//! Request and response types for the Perplexity API

/// Chat-completions endpoint types
pub mod chat;
/// Normalized search result types
pub mod search;

pub use chat::{ChatCompletionRequest, ChatCompletionResponse, Choice, Message, Role, Usage};
pub use search::{DEFAULT_MODEL, Link, SearchResult};
