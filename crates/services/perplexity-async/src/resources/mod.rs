//! API resource implementations for the Perplexity client

/// Chat-completions API resource
pub mod chat;

pub use chat::Chat;
