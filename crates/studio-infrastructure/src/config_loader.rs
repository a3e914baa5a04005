//! Configuration loading.
//!
//! Reads `StudioConfig` from `config.toml` once at startup. A missing file
//! means defaults; a malformed one is an error rather than a silent fallback.

use std::path::Path;

use studio_core::Result;
use studio_core::config::StudioConfig;

/// Loads `config.toml` at `path`, or the defaults when the file does not exist.
pub fn load_config(path: &Path) -> Result<StudioConfig> {
    if !path.exists() {
        tracing::debug!("[Config] {} not found, using defaults", path.display());
        return Ok(StudioConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config: StudioConfig = toml::from_str(&content)?;
    tracing::info!("[Config] Loaded {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use studio_core::config::DEFAULT_VALIDATION_MODEL;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = load_config(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config, StudioConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[gemini]\nsynthesis_model = \"img-x\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.gemini.synthesis_model, "img-x");
        assert_eq!(config.gemini.validation_model, DEFAULT_VALIDATION_MODEL);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[gemini\nbroken").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("TOML"));
    }
}
