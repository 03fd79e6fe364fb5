//! Document chunking and embedding augmentation.

pub mod document;

pub use document::{
    AugmenterConfig, ChunkUnit, Document, DocumentError, Hippocampus, Metadata, SplitterConfig,
    TextSplitter, VectorAugmenter, make_chunks,
};
