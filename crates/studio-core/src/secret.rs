//! Secret management service trait.
//!
//! Defines the interface for loading the model service credential.

use crate::config::SecretConfig;
use crate::error::Result;

/// Service for loading secret configuration.
///
/// # Security Note
///
/// Implementations should ensure that:
/// - Secrets are never logged or exposed in error messages
/// - Secret files are readable by the owning user only
#[async_trait::async_trait]
pub trait SecretService: Send + Sync {
    /// Loads the secret configuration.
    async fn load_secrets(&self) -> Result<SecretConfig>;

    /// Resolves the Gemini API key, failing with a config error when none is available.
    async fn gemini_api_key(&self) -> Result<String> {
        let secrets = self.load_secrets().await?;
        secrets
            .gemini_api_key()
            .map(str::to_string)
            .ok_or_else(|| crate::StudioError::config("No Gemini API key configured"))
    }
}
