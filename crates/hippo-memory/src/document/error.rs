use hippo_llm::LlmError;

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("embedding provider unavailable for document {index}: {source}")]
    ProviderUnavailable {
        index: usize,
        #[source]
        source: LlmError,
    },

    #[error("document {index} has empty content rejected by the provider")]
    EmptyContent { index: usize },
}

impl DocumentError {
    /// Classify an embedding failure for the document at `index`.
    pub(crate) fn from_embed(index: usize, err: LlmError) -> Self {
        match err {
            LlmError::EmptyInput { .. } => Self::EmptyContent { index },
            source => Self::ProviderUnavailable { index, source },
        }
    }

    /// Index of the document that failed, if the error is per-document.
    #[must_use]
    pub fn document_index(&self) -> Option<usize> {
        match self {
            Self::InvalidConfiguration(_) => None,
            Self::ProviderUnavailable { index, .. } | Self::EmptyContent { index } => Some(*index),
        }
    }
}
