use std::sync::Arc;
use std::time::Duration;

use futures::{StreamExt, TryStreamExt};
use hippo_llm::LlmError;
use hippo_llm::provider::{EmbedFn, EmbedFuture, LlmProvider};

use super::error::DocumentError;
use super::types::Document;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AugmenterConfig {
    /// Maximum embedding calls in flight. `1` embeds strictly one at a time.
    pub concurrency: usize,
    /// Per-call deadline, surfaced as `ProviderUnavailable` when exceeded.
    pub timeout: Duration,
    /// Reject vectors whose length differs from this.
    pub expected_dimensions: Option<usize>,
}

impl Default for AugmenterConfig {
    fn default() -> Self {
        Self {
            concurrency: 1,
            timeout: Duration::from_secs(30),
            expected_dimensions: None,
        }
    }
}

impl AugmenterConfig {
    /// # Errors
    ///
    /// Returns [`DocumentError::InvalidConfiguration`] for zero concurrency or timeout.
    pub fn validate(&self) -> Result<(), DocumentError> {
        if self.concurrency == 0 {
            return Err(DocumentError::InvalidConfiguration(
                "embedding concurrency must be at least 1".into(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(DocumentError::InvalidConfiguration(
                "embedding timeout must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// Attaches an embedding vector to each document.
pub struct VectorAugmenter {
    embed_fn: EmbedFn,
    config: AugmenterConfig,
}

impl std::fmt::Debug for VectorAugmenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorAugmenter")
            .field("embed_fn", &"<fn>")
            .field("config", &self.config)
            .finish()
    }
}

impl VectorAugmenter {
    /// # Errors
    ///
    /// Returns [`DocumentError::InvalidConfiguration`] if the config is out of bounds.
    pub fn new(embed_fn: EmbedFn, config: AugmenterConfig) -> Result<Self, DocumentError> {
        config.validate()?;
        Ok(Self { embed_fn, config })
    }

    /// Build an augmenter that embeds through `provider`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::InvalidConfiguration`] if the config is out of bounds.
    pub fn from_provider<P>(provider: P, config: AugmenterConfig) -> Result<Self, DocumentError>
    where
        P: LlmProvider + 'static,
    {
        let provider = Arc::new(provider);
        let embed_fn: EmbedFn = Box::new(move |text: &str| -> EmbedFuture {
            let p = Arc::clone(&provider);
            let owned = text.to_owned();
            Box::pin(async move { p.embed(&owned).await })
        });
        Self::new(embed_fn, config)
    }

    #[must_use]
    pub fn config(&self) -> &AugmenterConfig {
        &self.config
    }

    /// Embed each document's content and attach the vector, preserving order.
    ///
    /// Content and metadata are left untouched; an existing vector is replaced.
    ///
    /// # Errors
    ///
    /// Stops at the first failing document and returns
    /// [`DocumentError::EmptyContent`] or [`DocumentError::ProviderUnavailable`]
    /// carrying its index. No partial output is returned.
    pub async fn add_vectors(
        &self,
        documents: Vec<Document>,
    ) -> Result<Vec<Document>, DocumentError> {
        let total = documents.len();
        let out: Vec<Document> = futures::stream::iter(
            documents
                .into_iter()
                .enumerate()
                .map(|(index, doc)| self.augment(index, doc)),
        )
        .buffered(self.config.concurrency)
        .try_collect()
        .await?;

        tracing::debug!(
            documents = total,
            concurrency = self.config.concurrency,
            "attached vectors"
        );
        Ok(out)
    }

    async fn augment(&self, index: usize, mut doc: Document) -> Result<Document, DocumentError> {
        let call = (self.embed_fn)(&doc.content);
        let vector = match tokio::time::timeout(self.config.timeout, call).await {
            Ok(result) => result.map_err(|e| {
                tracing::warn!(index, "embedding failed: {e}");
                DocumentError::from_embed(index, e)
            })?,
            Err(_) => {
                tracing::warn!(index, timeout = ?self.config.timeout, "embedding timed out");
                return Err(DocumentError::ProviderUnavailable {
                    index,
                    source: LlmError::Timeout(self.config.timeout),
                });
            }
        };

        if let Some(expected) = self.config.expected_dimensions
            && vector.len() != expected
        {
            return Err(DocumentError::ProviderUnavailable {
                index,
                source: LlmError::DimensionMismatch {
                    expected,
                    actual: vector.len(),
                },
            });
        }

        doc.vector = Some(vector);
        Ok(doc)
    }
}
