//! Types for the Perplexity `/chat/completions` endpoint (non-streaming)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Instruction sent as the system turn of every search request
pub const SEARCH_SYSTEM_PROMPT: &str = "You are a search assistant that provides accurate and up-to-date information. Return only factual information with sources.";

/// Sampling temperature used for search requests
pub const SEARCH_TEMPERATURE: f32 = 0.2;

/// Nucleus sampling threshold used for search requests
pub const SEARCH_TOP_P: f32 = 0.9;

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions that steer the model
    System,
    /// The caller's turn
    User,
    /// The model's turn
    Assistant,
    /// Any role this client doesn't model (e.g. `tool`)
    #[serde(other)]
    Other,
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who wrote the message
    pub role: Role,
    /// Message text
    pub content: String,
}

impl Message {
    /// Creates a system message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Creates a user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Request body for `POST /chat/completions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    /// Model to use (e.g., "sonar" or "sonar-pro")
    pub model: String,

    /// Conversation so far, oldest first
    pub messages: Vec<Message>,

    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Nucleus sampling threshold
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,

    /// Whether the API should suggest follow-up questions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_related_questions: Option<bool>,

    /// Streaming is not supported by this client and is always sent as `false`
    pub stream: bool,
}

impl ChatCompletionRequest {
    /// Create a request for `model` with no messages
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            temperature: None,
            top_p: None,
            return_related_questions: None,
            stream: false,
        }
    }

    /// The fixed search-assistant request for `query`
    #[must_use]
    pub fn search(model: impl Into<String>, query: impl Into<String>) -> Self {
        Self::new(model)
            .with_message(Message::system(SEARCH_SYSTEM_PROMPT))
            .with_message(Message::user(query))
            .with_temperature(SEARCH_TEMPERATURE)
            .with_top_p(SEARCH_TOP_P)
            .with_related_questions(false)
    }

    /// Append a message
    #[must_use]
    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Set the temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set `top_p`
    #[must_use]
    pub const fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Toggle related-question generation
    #[must_use]
    pub const fn with_related_questions(mut self, enabled: bool) -> Self {
        self.return_related_questions = Some(enabled);
        self
    }
}

/// One candidate completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    /// Position in the `choices` array
    #[serde(default)]
    pub index: u32,
    /// Why generation stopped
    #[serde(default)]
    pub finish_reason: Option<String>,
    /// The generated message
    pub message: Message,
}

/// Token accounting for a completion
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens in the prompt
    #[serde(default)]
    pub prompt_tokens: u64,
    /// Tokens generated
    #[serde(default)]
    pub completion_tokens: u64,
    /// Prompt plus completion
    #[serde(default)]
    pub total_tokens: u64,
}

/// Response from `POST /chat/completions` (non-streaming)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    /// Completion identifier
    #[serde(default)]
    pub id: Option<String>,

    /// Model that produced the completion
    #[serde(default)]
    pub model: Option<String>,

    /// Object type, normally `chat.completion`
    #[serde(default)]
    pub object: Option<String>,

    /// Unix timestamp (seconds)
    #[serde(default)]
    pub created: Option<i64>,

    /// Candidate completions; the first one is canonical
    pub choices: Vec<Choice>,

    /// Source URLs backing the answer, in the order the model cited them.
    /// `None` when the field is absent or `null`.
    #[serde(default)]
    pub citations: Option<Vec<String>>,

    /// Token usage
    #[serde(default)]
    pub usage: Option<Usage>,
}

impl ChatCompletionResponse {
    /// Content of the first choice, if any
    #[must_use]
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }

    /// `created` as a UTC timestamp
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
    }
}
