//! Configuration types.
//!
//! `config.toml` holds non-secret settings; `secret.json` holds the API key.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_VALIDATION_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_SYNTHESIS_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct StudioConfig {
    #[serde(default)]
    pub gemini: GeminiSettings,
}

/// Model service settings.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GeminiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model used for the yes/no face check.
    #[serde(default = "default_validation_model")]
    pub validation_model: String,
    /// Model used for image synthesis.
    #[serde(default = "default_synthesis_model")]
    pub synthesis_model: String,
    /// Per-request timeout in seconds. `0` disables it.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_validation_model() -> String {
    DEFAULT_VALIDATION_MODEL.to_string()
}

fn default_synthesis_model() -> String {
    DEFAULT_SYNTHESIS_MODEL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            validation_model: default_validation_model(),
            synthesis_model: default_synthesis_model(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl GeminiSettings {
    /// The configured timeout, or `None` when disabled.
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

/// Root of `secret.json`.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SecretConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gemini: Option<GeminiSecret>,
}

/// Gemini API credential.
#[derive(Deserialize, Serialize, Clone)]
pub struct GeminiSecret {
    pub api_key: String,
}

impl std::fmt::Debug for GeminiSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiSecret")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl SecretConfig {
    /// The Gemini key, if present and non-blank.
    pub fn gemini_api_key(&self) -> Option<&str> {
        self.gemini
            .as_ref()
            .map(|g| g.api_key.trim())
            .filter(|key| !key.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config: StudioConfig = toml::from_str("").unwrap();
        assert_eq!(config, StudioConfig::default());
        assert_eq!(config.gemini.synthesis_model, DEFAULT_SYNTHESIS_MODEL);
        assert_eq!(
            config.gemini.request_timeout(),
            Some(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        );
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config: StudioConfig = toml::from_str(
            r#"
            [gemini]
            synthesis_model = "custom-image-model"
            request_timeout_secs = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.gemini.synthesis_model, "custom-image-model");
        assert_eq!(config.gemini.validation_model, DEFAULT_VALIDATION_MODEL);
        assert_eq!(config.gemini.request_timeout(), None);
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let secrets: SecretConfig =
            serde_json::from_str(r#"{"gemini": {"api_key": "   "}}"#).unwrap();
        assert_eq!(secrets.gemini_api_key(), None);

        let secrets: SecretConfig =
            serde_json::from_str(r#"{"gemini": {"api_key": "abc"}}"#).unwrap();
        assert_eq!(secrets.gemini_api_key(), Some("abc"));
    }

    #[test]
    fn test_secret_debug_is_redacted() {
        let secret = GeminiSecret {
            api_key: "super-secret".to_string(),
        };
        assert!(!format!("{secret:?}").contains("super-secret"));
    }
}
