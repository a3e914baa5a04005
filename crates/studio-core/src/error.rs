//! Error types for Persona Studio.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Category;

/// A shared error type for the entire studio.
///
/// Every failure the wizard can observe is one of these variants. None of them
/// is fatal: the controller recovers from all of them at its boundary.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum StudioError {
    /// The remote model service could not be reached or answered with an error status.
    #[error("Transport error{}: {message}", status_code.map(|c| format!(" (HTTP {c})")).unwrap_or_default())]
    Transport {
        status_code: Option<u16>,
        message: String,
    },

    /// The synthesis call returned no inline image payload.
    #[error("Synthesis failed: {0}")]
    SynthesisFailed(String),

    /// An image could not be parsed or decoded.
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// A selection id that does not exist in the catalog category.
    #[error("Unknown {category} option '{id}'")]
    UnknownOption { category: Category, id: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },
}

impl StudioError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Transport error
    pub fn transport(status_code: Option<u16>, message: impl Into<String>) -> Self {
        Self::Transport {
            status_code,
            message: message.into(),
        }
    }

    /// Creates a SynthesisFailed error
    pub fn synthesis_failed(message: impl Into<String>) -> Self {
        Self::SynthesisFailed(message.into())
    }

    /// Creates an InvalidImage error
    pub fn invalid_image(message: impl Into<String>) -> Self {
        Self::InvalidImage(message.into())
    }

    /// Creates an UnknownOption error
    pub fn unknown_option(category: Category, id: impl Into<String>) -> Self {
        Self::UnknownOption {
            category,
            id: id.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Check if this is a synthesis failure
    pub fn is_synthesis_failed(&self) -> bool {
        matches!(self, Self::SynthesisFailed(_))
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is an unknown option error
    pub fn is_unknown_option(&self) -> bool {
        matches!(self, Self::UnknownOption { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for StudioError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for StudioError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for StudioError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<base64::DecodeError> for StudioError {
    fn from(err: base64::DecodeError) -> Self {
        Self::InvalidImage(format!("base64 payload could not be decoded: {err}"))
    }
}

/// A type alias for `Result<T, StudioError>`.
pub type Result<T> = std::result::Result<T, StudioError>;
