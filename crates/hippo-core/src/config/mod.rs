mod env;
mod types;


pub use types::*;

use std::path::Path;

use anyhow::{Context, bail};

use crate::vault::{GROQ_API_KEY, OPENAI_API_KEY, VaultProvider, fetch_secret};

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

impl Config {
    /// Load configuration from a TOML file with env var overrides.
    ///
    /// Falls back to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str::<Self>(&content).context("failed to parse config file")?
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns an error if chunking or embedding settings are out of range.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.splitter_config()
            .validate()
            .context("invalid [chunking] section")?;
        if self.embedding.concurrency == 0 {
            bail!("embedding.concurrency must be at least 1");
        }
        if self.timeouts.embedding_seconds == 0 || self.timeouts.llm_seconds == 0 {
            bail!("timeouts must be greater than 0");
        }
        Ok(())
    }

    #[must_use]
    pub fn splitter_config(&self) -> hippo_memory::SplitterConfig {
        hippo_memory::SplitterConfig {
            chunk_size: self.chunking.chunk_size,
            chunk_overlap: self.chunking.chunk_overlap,
            unit: self.chunking.unit,
        }
    }

    #[must_use]
    pub fn augmenter_config(&self) -> hippo_memory::AugmenterConfig {
        hippo_memory::AugmenterConfig {
            concurrency: self.embedding.concurrency,
            timeout: std::time::Duration::from_secs(self.timeouts.embedding_seconds),
            expected_dimensions: self.embedding.expected_dimensions,
        }
    }

    /// Resolve provider API keys through the vault.
    ///
    /// # Errors
    ///
    /// Returns an error if the vault backend fails.
    pub async fn resolve_secrets(&mut self, vault: &dyn VaultProvider) -> anyhow::Result<()> {
        if let Some(secret) = fetch_secret(vault, OPENAI_API_KEY).await? {
            self.secrets.openai_api_key = Some(secret);
        }
        if let Some(secret) = fetch_secret(vault, GROQ_API_KEY).await? {
            self.secrets.groq_api_key = Some(secret);
        }
        Ok(())
    }
}
