use std::time::Duration;

use anyhow::{Context, bail};
use hippo_llm::any::AnyProvider;
use hippo_llm::groq::GroqProvider;
use hippo_llm::openai::OpenAiProvider;
use hippo_llm::provider::LlmProvider;
use hippo_memory::{Hippocampus, TextSplitter, VectorAugmenter};

use crate::config::{Config, ProviderKind};
use crate::vault::{GROQ_API_KEY, OPENAI_API_KEY};

/// Build the chat provider selected by `llm.provider`.
///
/// # Errors
///
/// Returns an error if the provider's API key is missing or its client cannot be built.
pub fn create_provider(config: &Config) -> anyhow::Result<AnyProvider> {
    create_named_provider(config.llm.provider, config)
}

/// Build the provider selected by `embedding.provider`, requiring embedding support.
///
/// # Errors
///
/// Returns an error if the provider cannot be built or has no embedding model.
pub fn create_embedding_provider(config: &Config) -> anyhow::Result<AnyProvider> {
    let provider = create_named_provider(config.embedding.provider, config)?;
    if !provider.supports_embeddings() {
        bail!(
            "{} has no embedding model configured (set llm.{}.embedding_model)",
            provider.name(),
            config.embedding.provider
        );
    }
    Ok(provider)
}

/// Build the provider for `kind` with its API key, retry budget and an HTTP
/// client bounded by `timeouts.llm_seconds`.
///
/// # Errors
///
/// Returns an error if the API key for `kind` was not resolved or the HTTP
/// client cannot be built.
pub fn create_named_provider(kind: ProviderKind, config: &Config) -> anyhow::Result<AnyProvider> {
    let client = hippo_llm::http::client_with_timeout(Duration::from_secs(
        config.timeouts.llm_seconds,
    ))
    .context("failed to build HTTP client")?;

    match kind {
        ProviderKind::OpenAi => {
            let cfg = &config.llm.openai;
            let api_key = config
                .secrets
                .openai_api_key
                .as_ref()
                .with_context(|| format!("{OPENAI_API_KEY} not found in vault"))?
                .expose()
                .to_owned();
            let provider = OpenAiProvider::new(
                api_key,
                cfg.base_url.clone(),
                cfg.model.clone(),
                cfg.max_tokens,
                cfg.embedding_model.clone(),
            )?
            .with_client(client)
            .with_max_retries(cfg.max_retries);
            Ok(AnyProvider::OpenAi(provider))
        }
        ProviderKind::Groq => {
            let cfg = &config.llm.groq;
            let api_key = config
                .secrets
                .groq_api_key
                .as_ref()
                .with_context(|| format!("{GROQ_API_KEY} not found in vault"))?
                .expose()
                .to_owned();
            let provider = GroqProvider::new(
                api_key,
                cfg.base_url.clone(),
                cfg.model.clone(),
                cfg.max_tokens,
                cfg.embedding_model.clone(),
            )?
            .with_client(client)
            .with_max_retries(cfg.max_retries);
            Ok(AnyProvider::Groq(provider))
        }
    }
}

/// Wire a splitter and an augmenter over `provider` from config.
///
/// # Errors
///
/// Returns an error if chunking or embedding settings are invalid.
pub fn build_hippocampus(config: &Config, provider: &AnyProvider) -> anyhow::Result<Hippocampus> {
    let splitter =
        TextSplitter::new(config.splitter_config()).context("invalid chunking configuration")?;
    let augmenter = VectorAugmenter::new(provider.boxed_embed_fn(), config.augmenter_config())
        .context("invalid embedding configuration")?;
    tracing::debug!(
        provider = provider.name(),
        chunk_size = config.chunking.chunk_size,
        chunk_overlap = config.chunking.chunk_overlap,
        unit = ?config.chunking.unit,
        "built hippocampus"
    );
    Ok(Hippocampus::new(splitter, augmenter))
}
