//! Groq Cloud backend.
//!
//! Groq speaks the OpenAI wire protocol, so requests go through
//! [`OpenAiProvider`] pointed at the Groq endpoint. Groq does not host
//! embedding models; `embed` fails unless an OpenAI-compatible embedding
//! model is configured explicitly.

use std::fmt;

use crate::error::LlmError;
use crate::openai::OpenAiProvider;
use crate::provider::{LlmProvider, Message};

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.1-70b-versatile";

#[derive(Clone)]
pub struct GroqProvider {
    inner: OpenAiProvider,
}

impl GroqProvider {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        api_key: String,
        base_url: String,
        model: String,
        max_tokens: u32,
        embedding_model: Option<String>,
    ) -> Result<Self, LlmError> {
        let inner = OpenAiProvider::new(api_key, base_url, model, max_tokens, embedding_model)?
            .with_label("groq");
        Ok(Self { inner })
    }

    #[must_use]
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.inner = self.inner.with_client(client);
        self
    }

    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.inner = self.inner.with_max_retries(max_retries);
        self
    }

    #[must_use]
    pub fn model(&self) -> &str {
        self.inner.model()
    }
}

impl fmt::Debug for GroqProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroqProvider")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl LlmProvider for GroqProvider {
    async fn chat(&self, messages: &[Message]) -> Result<String, LlmError> {
        self.inner.chat(messages).await
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        self.inner.embed(text).await
    }

    fn supports_embeddings(&self) -> bool {
        self.inner.supports_embeddings()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
