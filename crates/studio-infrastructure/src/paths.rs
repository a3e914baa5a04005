//! Unified path management for studio configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/persona-studio/    # Config directory (platform config dir)
//! ├── config.toml              # Model service settings
//! ├── secret.json              # API key
//! ├── catalog.toml             # Optional catalog override
//! └── logs/                    # Application logs
//!     └── studio.log.YYYY-MM-DD
//! ```

use std::path::{Path, PathBuf};

/// Application directory name under the platform config directory.
pub const APP_DIR_NAME: &str = "persona-studio";

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "PERSONA_STUDIO_CONFIG_DIR";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// No platform config directory could be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find a configuration directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for studio_core::StudioError {
    fn from(err: PathError) -> Self {
        studio_core::StudioError::config(err.to_string())
    }
}

/// Resolved locations of every studio file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudioPaths {
    config_dir: PathBuf,
}

impl StudioPaths {
    /// Uses `base` verbatim as the config directory.
    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: base.into(),
        }
    }

    /// Resolves the config directory: explicit override, then
    /// `PERSONA_STUDIO_CONFIG_DIR`, then the platform config directory.
    pub fn resolve(override_dir: Option<&Path>) -> Result<Self, PathError> {
        if let Some(dir) = override_dir {
            return Ok(Self::with_base(dir));
        }
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_base(PathBuf::from(dir)));
        }
        dirs::config_dir()
            .map(|dir| Self::with_base(dir.join(APP_DIR_NAME)))
            .ok_or(PathError::ConfigDirNotFound)
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Path to config.toml
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Path to secret.json
    ///
    /// # Security Note
    ///
    /// Keep this file at permissions 600.
    pub fn secret_file(&self) -> PathBuf {
        self.config_dir.join("secret.json")
    }

    /// Path to the optional catalog override.
    pub fn catalog_file(&self) -> PathBuf {
        self.config_dir.join("catalog.toml")
    }

    /// Directory for rotated log files.
    pub fn logs_dir(&self) -> PathBuf {
        self.config_dir.join("logs")
    }
}
