//! LLM provider abstraction with OpenAI and Groq backends.

pub mod any;
pub mod error;
pub mod groq;
pub mod http;
#[cfg(feature = "mock")]
pub mod mock;
pub mod openai;
pub mod provider;
pub(crate) mod retry;

pub use error::LlmError;
pub use provider::LlmProvider;
