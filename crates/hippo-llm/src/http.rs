//! Shared HTTP client construction for consistent timeout and TLS configuration.

use std::time::Duration;

use crate::error::LlmError;

/// Create the HTTP client shared by every provider.
///
/// Config: 30s connect timeout, 60s request timeout, rustls TLS,
/// `hippo/{version}` user-agent, redirect limit 10.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized.
pub fn default_client() -> Result<reqwest::Client, LlmError> {
    client_with_timeout(Duration::from_secs(60))
}

/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized.
pub fn client_with_timeout(timeout: Duration) -> Result<reqwest::Client, LlmError> {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(30))
        .timeout(timeout)
        .user_agent(concat!("hippo/", env!("CARGO_PKG_VERSION")))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(LlmError::Http)
}
