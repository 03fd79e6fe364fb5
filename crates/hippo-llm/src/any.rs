use std::sync::Arc;

use crate::groq::GroqProvider;
#[cfg(feature = "mock")]
use crate::mock::MockProvider;
use crate::openai::OpenAiProvider;
use crate::provider::{EmbedFn, EmbedFuture, LlmProvider, Message};

/// Generates a match over all `AnyProvider` variants, binding the inner provider
/// and evaluating the given expression for each arm.
macro_rules! delegate_provider {
    ($self:expr, |$p:ident| $expr:expr) => {
        match $self {
            AnyProvider::OpenAi($p) => $expr,
            AnyProvider::Groq($p) => $expr,
            #[cfg(feature = "mock")]
            AnyProvider::Mock($p) => $expr,
        }
    };
}

#[derive(Debug, Clone)]
pub enum AnyProvider {
    OpenAi(OpenAiProvider),
    Groq(GroqProvider),
    #[cfg(feature = "mock")]
    Mock(MockProvider),
}

impl AnyProvider {
    /// Return a cloneable closure that calls `embed()` on this provider.
    pub fn embed_fn(&self) -> impl Fn(&str) -> EmbedFuture + Send + Sync + 'static {
        let provider = Arc::new(self.clone());
        move |text: &str| -> EmbedFuture {
            let p = Arc::clone(&provider);
            let owned = text.to_owned();
            Box::pin(async move { p.embed(&owned).await })
        }
    }

    /// Boxed form of [`Self::embed_fn`].
    #[must_use]
    pub fn boxed_embed_fn(&self) -> EmbedFn {
        Box::new(self.embed_fn())
    }
}

impl LlmProvider for AnyProvider {
    async fn chat(&self, messages: &[Message]) -> Result<String, crate::LlmError> {
        delegate_provider!(self, |p| p.chat(messages).await)
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, crate::LlmError> {
        delegate_provider!(self, |p| p.embed(text).await)
    }

    fn supports_embeddings(&self) -> bool {
        delegate_provider!(self, |p| p.supports_embeddings())
    }

    fn name(&self) -> &str {
        delegate_provider!(self, |p| p.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LlmError;

    fn openai() -> AnyProvider {
        AnyProvider::OpenAi(
            OpenAiProvider::new(
                "key".into(),
                "http://127.0.0.1:1".into(),
                "gpt-4o-mini".into(),
                64,
                Some("text-embedding-ada-002".into()),
            )
            .unwrap()
            .with_max_retries(0),
        )
    }

    fn groq() -> AnyProvider {
        AnyProvider::Groq(
            GroqProvider::new(
                "key".into(),
                "http://127.0.0.1:1".into(),
                "llama-3.1-70b-versatile".into(),
                64,
                None,
            )
            .unwrap(),
        )
    }

    #[test]
    fn names_delegate() {
        assert_eq!(openai().name(), "openai");
        assert_eq!(groq().name(), "groq");
    }

    #[test]
    fn supports_embeddings_delegates() {
        assert!(openai().supports_embeddings());
        assert!(!groq().supports_embeddings());
    }

    #[tokio::test]
    async fn embed_fn_propagates_provider_errors() {
        let embed = groq().embed_fn();
        let err = embed("hello").await.unwrap_err();
        assert!(matches!(err, LlmError::EmbedUnsupported { .. }));
    }

    #[tokio::test]
    async fn embed_fn_reports_unreachable_host() {
        let embed = openai().boxed_embed_fn();
        assert!(matches!(embed("hello").await, Err(LlmError::Http(_))));
    }

    #[cfg(feature = "mock")]
    #[tokio::test]
    async fn embed_fn_calls_through_to_mock() {
        let mock = MockProvider::default().with_dimensions(8);
        let embed = AnyProvider::Mock(mock.clone()).embed_fn();
        let v = embed("abc").await.unwrap();
        assert_eq!(v, vec![3.0; 8]);
        assert_eq!(mock.embed_calls(), 1);
    }
}
