use serde::{Deserialize, Serialize};

use super::error::DocumentError;
use super::types::Document;

/// Unit in which `chunk_size` and `chunk_overlap` are measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkUnit {
    /// Whitespace-separated words; chunks are re-joined with single spaces.
    #[default]
    Words,
    /// Unicode scalar values; chunks are exact substrings.
    Chars,
}

impl ChunkUnit {
    fn measure(self, text: &str) -> usize {
        match self {
            Self::Words => text.split_whitespace().count(),
            Self::Chars => text.chars().count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitterConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    #[serde(default)]
    pub unit: ChunkUnit,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1024,
            chunk_overlap: 0,
            unit: ChunkUnit::Words,
        }
    }
}

impl SplitterConfig {
    /// # Errors
    ///
    /// Returns [`DocumentError::InvalidConfiguration`] when `chunk_size` is zero
    /// or `chunk_overlap` is not strictly smaller than `chunk_size`.
    pub fn validate(&self) -> Result<(), DocumentError> {
        if self.chunk_size == 0 {
            return Err(DocumentError::InvalidConfiguration(
                "chunk_size must be greater than 0".into(),
            ));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(DocumentError::InvalidConfiguration(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        Ok(())
    }

    fn step(&self) -> usize {
        self.chunk_size - self.chunk_overlap
    }
}

#[derive(Debug, Clone)]
pub struct TextSplitter {
    config: SplitterConfig,
}

impl TextSplitter {
    /// # Errors
    ///
    /// Returns [`DocumentError::InvalidConfiguration`] if the config is out of bounds.
    pub fn new(config: SplitterConfig) -> Result<Self, DocumentError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &SplitterConfig {
        &self.config
    }

    /// Split every document, keeping input order and each document's chunks
    /// in left-to-right order.
    #[must_use]
    pub fn make_chunks(&self, documents: Vec<Document>) -> Vec<Document> {
        let mut out = Vec::with_capacity(documents.len());
        for doc in documents {
            self.split_into(doc, &mut out);
        }
        out
    }

    /// Split a single document.
    #[must_use]
    pub fn split(&self, document: Document) -> Vec<Document> {
        let mut out = Vec::new();
        self.split_into(document, &mut out);
        out
    }

    fn split_into(&self, document: Document, out: &mut Vec<Document>) {
        let len = self.config.unit.measure(&document.content);
        if len <= self.config.chunk_size {
            out.push(document);
            return;
        }

        let pieces = match self.config.unit {
            ChunkUnit::Words => {
                let words: Vec<&str> = document.content.split_whitespace().collect();
                windows(&words, self.config.chunk_size, self.config.step())
                    .map(|w| w.join(" "))
                    .collect::<Vec<_>>()
            }
            ChunkUnit::Chars => {
                let chars: Vec<char> = document.content.chars().collect();
                windows(&chars, self.config.chunk_size, self.config.step())
                    .map(|w| w.iter().collect::<String>())
                    .collect::<Vec<_>>()
            }
        };

        tracing::debug!(
            unit = ?self.config.unit,
            len,
            chunks = pieces.len(),
            "split document"
        );
        out.extend(pieces.into_iter().map(|p| document.derive_chunk(p)));
    }
}

/// Split documents with a one-off splitter.
///
/// # Errors
///
/// Returns [`DocumentError::InvalidConfiguration`] before touching any document
/// if the config is out of bounds.
pub fn make_chunks(
    documents: Vec<Document>,
    config: &SplitterConfig,
) -> Result<Vec<Document>, DocumentError> {
    Ok(TextSplitter::new(config.clone())?.make_chunks(documents))
}

/// Windows of `size` items advancing by `step`, ending with the first window
/// that reaches the end of `items`.
fn windows<T>(items: &[T], size: usize, step: usize) -> impl Iterator<Item = &[T]> {
    let mut start = 0;
    let mut done = items.is_empty();
    std::iter::from_fn(move || {
        if done {
            return None;
        }
        let end = (start + size).min(items.len());
        let window = &items[start..end];
        if end == items.len() {
            done = true;
        } else {
            start += step;
        }
        Some(window)
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::document::types::Metadata;

    fn info_test() -> Metadata {
        let mut m = Metadata::new();
        m.insert("info".into(), json!("test"));
        m
    }

    fn doc(content: &str) -> Document {
        Document::new(content, info_test())
    }

    fn splitter(chunk_size: usize, chunk_overlap: usize, unit: ChunkUnit) -> TextSplitter {
        TextSplitter::new(SplitterConfig {
            chunk_size,
            chunk_overlap,
            unit,
        })
        .unwrap()
    }

    fn contents(docs: &[Document]) -> Vec<&str> {
        docs.iter().map(|d| d.content.as_str()).collect()
    }

    #[test]
    fn short_document_is_returned_unchanged() {
        let s = TextSplitter::new(SplitterConfig::default()).unwrap();
        let input = vec![doc("foo bar")];
        assert_eq!(s.make_chunks(input.clone()), input);
    }

    #[test]
    fn short_document_keeps_original_whitespace() {
        let s = splitter(5, 0, ChunkUnit::Words);
        let input = vec![doc("  foo \n\t bar  ")];
        assert_eq!(s.make_chunks(input.clone()), input);
    }

    #[test]
    fn one_word_chunks() {
        let s = splitter(1, 0, ChunkUnit::Words);
        let out = s.make_chunks(vec![doc("foo bar")]);
        assert_eq!(out, vec![doc("foo"), doc("bar")]);
    }

    #[test]
    fn word_overlap_shares_boundary_words() {
        let s = splitter(3, 1, ChunkUnit::Words);
        let out = s.make_chunks(vec![doc("a b c d e f g")]);
        assert_eq!(contents(&out), vec!["a b c", "c d e", "e f g"]);
    }

    #[test]
    fn no_trailing_window_made_only_of_overlap() {
        let s = splitter(2, 1, ChunkUnit::Words);
        let out = s.make_chunks(vec![doc("a b c")]);
        assert_eq!(contents(&out), vec!["a b", "b c"]);
    }

    #[test]
    fn last_window_may_be_shorter() {
        let s = splitter(3, 0, ChunkUnit::Words);
        let out = s.make_chunks(vec![doc("one two three four")]);
        assert_eq!(contents(&out), vec!["one two three", "four"]);
    }

    #[test]
    fn char_unit_splits_exact_substrings() {
        let s = splitter(3, 0, ChunkUnit::Chars);
        let out = s.make_chunks(vec![doc("foo bar")]);
        assert_eq!(contents(&out), vec!["foo", " ba", "r"]);
    }

    #[test]
    fn char_unit_overlap() {
        let s = splitter(4, 2, ChunkUnit::Chars);
        let out = s.make_chunks(vec![doc("abcdefgh")]);
        assert_eq!(contents(&out), vec!["abcd", "cdef", "efgh"]);
    }

    #[test]
    fn char_unit_counts_scalars_not_bytes() {
        let s = splitter(2, 0, ChunkUnit::Chars);
        let out = s.make_chunks(vec![doc("héé")]);
        assert_eq!(contents(&out), vec!["hé", "é"]);
    }

    #[test]
    fn empty_content_yields_single_empty_document() {
        for unit in [ChunkUnit::Words, ChunkUnit::Chars] {
            let s = splitter(1, 0, unit);
            assert_eq!(s.make_chunks(vec![doc("")]), vec![doc("")]);
        }
    }

    #[test]
    fn metadata_is_cloned_onto_every_chunk() {
        let mut metadata = info_test();
        metadata.insert("tags".into(), json!(["a", {"b": null}]));
        let s = splitter(1, 0, ChunkUnit::Words);
        let out = s.make_chunks(vec![Document::new("x y z", metadata.clone())]);
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|d| d.metadata == metadata));
    }

    #[test]
    fn chunks_drop_existing_vector() {
        let s = splitter(1, 0, ChunkUnit::Words);
        let mut input = doc("foo bar");
        input.vector = Some(vec![0.5; 4]);
        assert!(s.split(input).iter().all(|d| d.vector.is_none()));
    }

    #[test]
    fn output_preserves_document_order() {
        let s = splitter(2, 0, ChunkUnit::Words);
        let out = s.make_chunks(vec![doc("a1 a2 a3"), doc("b1"), doc("c1 c2 c3 c4")]);
        assert_eq!(contents(&out), vec!["a1 a2", "a3", "b1", "c1 c2", "c3 c4"]);
    }

    #[test]
    fn rechunking_single_chunk_is_noop() {
        let s = splitter(2, 0, ChunkUnit::Words);
        let once = s.make_chunks(vec![doc("a b c d e")]);
        let twice = s.make_chunks(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn overlap_equal_to_size_is_invalid() {
        let err = TextSplitter::new(SplitterConfig {
            chunk_size: 3,
            chunk_overlap: 3,
            unit: ChunkUnit::Words,
        })
        .unwrap_err();
        assert!(matches!(err, DocumentError::InvalidConfiguration(_)));
    }

    #[test]
    fn zero_chunk_size_is_invalid() {
        let config = SplitterConfig {
            chunk_size: 0,
            chunk_overlap: 0,
            unit: ChunkUnit::Chars,
        };
        assert!(matches!(
            make_chunks(vec![doc("anything")], &config),
            Err(DocumentError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn default_config_is_valid() {
        assert!(SplitterConfig::default().validate().is_ok());
    }

    #[test]
    fn default_config_has_no_overlap() {
        let config = SplitterConfig::default();
        assert_eq!(config.chunk_size, 1024);
        assert_eq!(config.chunk_overlap, 0);
        assert_eq!(config.unit, ChunkUnit::Words);
    }

    #[test]
    fn unit_deserializes_lowercase() {
        let config: SplitterConfig =
            serde_json::from_value(json!({"chunk_size": 10, "chunk_overlap": 2, "unit": "chars"}))
                .unwrap();
        assert_eq!(config.unit, ChunkUnit::Chars);
        let config: SplitterConfig =
            serde_json::from_value(json!({"chunk_size": 10, "chunk_overlap": 2})).unwrap();
        assert_eq!(config.unit, ChunkUnit::Words);
    }

    mod proptest_splitter {
        use super::*;
        use proptest::prelude::*;

        fn unit() -> impl Strategy<Value = ChunkUnit> {
            prop_oneof![Just(ChunkUnit::Words), Just(ChunkUnit::Chars)]
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(500))]

            #[test]
            fn chunks_never_exceed_size(
                content in "\\PC{0,400}",
                chunk_size in 1usize..50,
                overlap_seed in 0usize..50,
                unit in unit(),
            ) {
                let chunk_overlap = overlap_seed % chunk_size;
                let s = splitter(chunk_size, chunk_overlap, unit);
                let input = doc(&content);
                let out = s.make_chunks(vec![input.clone()]);

                prop_assert!(!out.is_empty());
                if unit.measure(&content) <= chunk_size {
                    prop_assert_eq!(out, vec![input]);
                } else {
                    for chunk in &out {
                        prop_assert!(unit.measure(&chunk.content) <= chunk_size);
                        prop_assert_eq!(&chunk.metadata, &input.metadata);
                    }
                }
            }

            #[test]
            fn chars_without_overlap_reassemble_content(
                content in "\\PC{1,300}",
                chunk_size in 1usize..40,
            ) {
                let s = splitter(chunk_size, 0, ChunkUnit::Chars);
                let out = s.make_chunks(vec![doc(&content)]);
                let joined: String = out.iter().map(|d| d.content.as_str()).collect();
                prop_assert_eq!(joined, content);
            }

            #[test]
            fn words_without_overlap_reassemble_words(
                content in "[a-z]{1,6}( [a-z]{1,6}){0,60}",
                chunk_size in 1usize..20,
            ) {
                let s = splitter(chunk_size, 0, ChunkUnit::Words);
                let out = s.make_chunks(vec![doc(&content)]);
                let joined = out.iter().map(|d| d.content.as_str()).collect::<Vec<_>>().join(" ");
                prop_assert_eq!(joined, content);
            }

            #[test]
            fn adjacent_char_chunks_share_overlap(
                content in "[a-z]{20,200}",
                chunk_size in 2usize..20,
                overlap_seed in 1usize..20,
            ) {
                let chunk_overlap = overlap_seed % chunk_size;
                let s = splitter(chunk_size, chunk_overlap, ChunkUnit::Chars);
                let out = s.make_chunks(vec![doc(&content)]);
                for pair in out.windows(2) {
                    let prev = &pair[0].content;
                    let next = &pair[1].content;
                    prop_assert_eq!(prev.len(), chunk_size);
                    prop_assert_eq!(&prev[chunk_size - chunk_overlap..], &next[..chunk_overlap]);
                }
            }
        }
    }
}
