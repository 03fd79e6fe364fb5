pub mod augmenter;
pub mod error;
pub mod hippocampus;
pub mod splitter;
pub mod types;

pub use augmenter::{AugmenterConfig, VectorAugmenter};
pub use error::DocumentError;
pub use hippocampus::Hippocampus;
pub use splitter::{ChunkUnit, SplitterConfig, TextSplitter, make_chunks};
pub use types::{Document, Metadata};
