use super::augmenter::VectorAugmenter;
use super::error::DocumentError;
use super::splitter::TextSplitter;
use super::types::Document;

/// Prepares documents for vector storage: split, then embed.
#[derive(Debug)]
pub struct Hippocampus {
    splitter: TextSplitter,
    augmenter: VectorAugmenter,
}

impl Hippocampus {
    #[must_use]
    pub fn new(splitter: TextSplitter, augmenter: VectorAugmenter) -> Self {
        Self {
            splitter,
            augmenter,
        }
    }

    #[must_use]
    pub fn splitter(&self) -> &TextSplitter {
        &self.splitter
    }

    #[must_use]
    pub fn make_chunks(&self, documents: Vec<Document>) -> Vec<Document> {
        self.splitter.make_chunks(documents)
    }

    /// # Errors
    ///
    /// See [`VectorAugmenter::add_vectors`].
    pub async fn add_vectors(
        &self,
        documents: Vec<Document>,
    ) -> Result<Vec<Document>, DocumentError> {
        self.augmenter.add_vectors(documents).await
    }

    /// Chunk then vectorize. Returns the chunks with vectors attached.
    ///
    /// # Errors
    ///
    /// See [`VectorAugmenter::add_vectors`].
    pub async fn prepare(&self, documents: Vec<Document>) -> Result<Vec<Document>, DocumentError> {
        let input = documents.len();
        let chunks = self.make_chunks(documents);
        tracing::info!(documents = input, chunks = chunks.len(), "embedding chunks");
        self.add_vectors(chunks).await
    }
}
