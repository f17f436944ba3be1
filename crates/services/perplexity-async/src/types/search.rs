//! Normalized search results built from chat completions

use serde::{Deserialize, Serialize};

use super::chat::ChatCompletionResponse;
use crate::error::PerplexityError;

/// Model used when the caller does not pick one
pub const DEFAULT_MODEL: &str = "sonar";

/// A source supporting the answer
///
/// The API only returns bare URLs, so `title` mirrors `url` and `snippet` is
/// always empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Source URL
    pub url: String,
    /// Display title (same as `url`)
    pub title: String,
    /// Excerpt (always empty)
    pub snippet: String,
}

impl Link {
    /// Builds a link from a citation URL
    #[must_use]
    pub fn from_citation(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            title: url.clone(),
            url,
            snippet: String::new(),
        }
    }
}

/// Answer text plus its sources, in citation order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Content of the first choice
    pub result: String,
    /// One link per citation
    pub links: Vec<Link>,
}

impl TryFrom<ChatCompletionResponse> for SearchResult {
    type Error = PerplexityError;

    fn try_from(resp: ChatCompletionResponse) -> Result<Self, Self::Error> {
        let ChatCompletionResponse {
            choices, citations, ..
        } = resp;

        let result = choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| PerplexityError::MalformedResponse("response has no choices".into()))?;

        let citations = citations.ok_or_else(|| {
            PerplexityError::MalformedResponse("response has no citations".into())
        })?;

        Ok(Self {
            result,
            links: citations.into_iter().map(Link::from_citation).collect(),
        })
    }
}
