use crate::{
    client::Client,
    config::Config,
    error::PerplexityError,
    types::chat::{ChatCompletionRequest, ChatCompletionResponse},
};

/// API resource for the `/chat/completions` endpoint (non-streaming)
pub struct Chat<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Chat<'c, C> {
    /// Creates a new Chat resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Generate a completion for the given conversation
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are missing, the request fails, or the
    /// API returns a non-success status.
    pub async fn create(
        &self,
        mut req: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, PerplexityError> {
        req.stream = false;
        self.client.post("/chat/completions", req).await
    }
}

impl<C: Config> crate::Client<C> {
    /// Returns the Chat API resource
    #[must_use]
    pub const fn chat(&self) -> Chat<'_, C> {
        Chat::new(self)
    }
}
