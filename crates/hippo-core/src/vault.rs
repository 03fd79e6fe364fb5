use std::fmt;
use std::future::Future;
use std::pin::Pin;

use anyhow::Context;

pub const OPENAI_API_KEY: &str = "HIPPO_OPENAI_API_KEY";
pub const GROQ_API_KEY: &str = "HIPPO_GROQ_API_KEY";

/// Wrapper for sensitive strings with redacted Debug/Display.
#[derive(Clone)]
pub struct Secret(String);

impl Secret {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Pluggable secret retrieval backend.
pub trait VaultProvider: Send + Sync {
    fn get_secret(
        &self,
        key: &str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Option<String>>> + Send + '_>>;
}

/// Reads secrets from environment variables.
pub struct EnvVaultProvider;

impl VaultProvider for EnvVaultProvider {
    fn get_secret(
        &self,
        key: &str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Option<String>>> + Send + '_>> {
        let key = key.to_owned();
        Box::pin(async move { Ok(std::env::var(&key).ok()) })
    }
}

/// Look up `key` and wrap it as a [`Secret`].
///
/// Surrounding whitespace is stripped, and blank values count as unset, so a key
/// pasted with a trailing newline still authenticates.
///
/// # Errors
///
/// Returns an error if the vault backend fails.
pub async fn fetch_secret(vault: &dyn VaultProvider, key: &str) -> anyhow::Result<Option<Secret>> {
    let value = vault
        .get_secret(key)
        .await
        .with_context(|| format!("vault lookup for {key} failed"))?;
    Ok(value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .map(Secret::new))
}

#[cfg(test)]
#[derive(Default)]
pub struct MockVaultProvider {
    secrets: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl MockVaultProvider {
    #[must_use]
    pub fn with_secret(mut self, key: &str, value: &str) -> Self {
        self.secrets.insert(key.to_owned(), value.to_owned());
        self
    }
}

#[cfg(test)]
impl VaultProvider for MockVaultProvider {
    fn get_secret(
        &self,
        key: &str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Option<String>>> + Send + '_>> {
        let result = self.secrets.get(key).cloned();
        Box::pin(async move { Ok(result) })
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    fn secret_is_redacted() {
        let s = Secret::new("sk-live-123");
        assert_eq!(format!("{s:?}"), "[REDACTED]");
        assert_eq!(s.to_string(), "[REDACTED]");
        assert_eq!(s.expose(), "sk-live-123");
    }

    #[tokio::test]
    #[serial]
    async fn env_vault_reads_variable() {
        unsafe { std::env::set_var("HIPPO_TEST_VAULT_KEY", "value") };
        let got = EnvVaultProvider
            .get_secret("HIPPO_TEST_VAULT_KEY")
            .await
            .unwrap();
        unsafe { std::env::remove_var("HIPPO_TEST_VAULT_KEY") };
        assert_eq!(got.as_deref(), Some("value"));
    }

    #[tokio::test]
    #[serial]
    async fn fetch_secret_treats_blank_env_as_missing() {
        unsafe { std::env::set_var("HIPPO_TEST_VAULT_EMPTY", "  ") };
        let got = fetch_secret(&EnvVaultProvider, "HIPPO_TEST_VAULT_EMPTY")
            .await
            .unwrap();
        unsafe { std::env::remove_var("HIPPO_TEST_VAULT_EMPTY") };
        assert!(got.is_none());
    }

    #[tokio::test]
    async fn fetch_secret_trims_pasted_key() {
        let vault = MockVaultProvider::default().with_secret(OPENAI_API_KEY, " sk-abc\n");
        let got = fetch_secret(&vault, OPENAI_API_KEY).await.unwrap();
        assert_eq!(got.unwrap().expose(), "sk-abc");
    }

    #[tokio::test]
    async fn fetch_secret_missing_key_is_none() {
        let got = fetch_secret(&MockVaultProvider::default(), GROQ_API_KEY)
            .await
            .unwrap();
        assert!(got.is_none());
    }
}
