use serde::{Deserialize, Serialize};

/// Opaque per-document metadata, carried through the pipeline untouched.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector: Option<Vec<f32>>,
}

impl Document {
    #[must_use]
    pub fn new(content: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            content: content.into(),
            metadata,
            vector: None,
        }
    }

    /// A new document sharing this one's metadata, without a vector.
    #[must_use]
    pub(crate) fn derive_chunk(&self, content: String) -> Self {
        Self {
            content,
            metadata: self.metadata.clone(),
            vector: None,
        }
    }
}
