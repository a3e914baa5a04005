//! Secret service implementation.
//!
//! Reads `secret.json` and falls back to the `GEMINI_API_KEY` environment
//! variable when the file is absent or carries no key.

use std::path::PathBuf;

use studio_core::Result;
use studio_core::config::{GeminiSecret, SecretConfig};
use studio_core::secret::SecretService;

/// Environment variable consulted when secret.json has no key.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// File-backed secret service.
#[derive(Clone)]
pub struct FileSecretService {
    path: PathBuf,
    env_fallback: Option<String>,
}

impl FileSecretService {
    /// Creates a service reading `path`, with the environment fallback captured now.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            env_fallback: std::env::var(GEMINI_API_KEY_ENV).ok(),
        }
    }

    /// Replaces the environment fallback.
    pub fn with_env_fallback(mut self, key: Option<String>) -> Self {
        self.env_fallback = key;
        self
    }

    async fn read_file(&self) -> Result<SecretConfig> {
        if !tokio::fs::try_exists(&self.path).await? {
            return Ok(SecretConfig::default());
        }
        let content = tokio::fs::read_to_string(&self.path).await?;
        if content.trim().is_empty() {
            return Ok(SecretConfig::default());
        }
        Ok(serde_json::from_str(&content)?)
    }
}

#[async_trait::async_trait]
impl SecretService for FileSecretService {
    async fn load_secrets(&self) -> Result<SecretConfig> {
        let mut secrets = self.read_file().await?;

        if secrets.gemini_api_key().is_none() {
            if let Some(key) = self
                .env_fallback
                .as_deref()
                .map(str::trim)
                .filter(|key| !key.is_empty())
            {
                tracing::debug!("[Secret] Using {} from environment", GEMINI_API_KEY_ENV);
                secrets.gemini = Some(GeminiSecret {
                    api_key: key.to_string(),
                });
            }
        }

        Ok(secrets)
    }
}
