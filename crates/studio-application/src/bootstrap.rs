//! Application bootstrap.
//!
//! Loads configuration and the catalog from the resolved studio paths, then
//! connects a [`WizardController`] to the Gemini client once a key is found.

use std::sync::Arc;

use studio_core::Result;
use studio_core::catalog::Catalog;
use studio_core::config::StudioConfig;
use studio_core::secret::SecretService;
use studio_infrastructure::{FileSecretService, StudioPaths, load_catalog, load_config};
use studio_interaction::GeminiStudioClient;

use crate::wizard::WizardController;

/// Everything a front end needs before it can start a session.
pub struct StudioBootstrap {
    pub paths: StudioPaths,
    pub config: StudioConfig,
    pub catalog: Arc<Catalog>,
}

impl StudioBootstrap {
    /// Reads `config.toml` and the catalog override. Missing files mean defaults.
    pub fn load(paths: StudioPaths) -> Result<Self> {
        tracing::info!("[Bootstrap] Using config dir {}", paths.config_dir().display());

        let config = load_config(&paths.config_file())?;
        let catalog = load_catalog(&paths.catalog_file())?;

        Ok(Self {
            paths,
            config,
            catalog: Arc::new(catalog),
        })
    }

    /// Builds a controller backed by the Gemini client, resolving the key via `secrets`.
    pub async fn connect(&self, secrets: &dyn SecretService) -> Result<WizardController> {
        let api_key = secrets.gemini_api_key().await?;
        let client = GeminiStudioClient::from_settings(api_key, &self.config.gemini)?;

        tracing::info!(
            "[Bootstrap] Gemini client ready (validation: {}, synthesis: {})",
            self.config.gemini.validation_model,
            self.config.gemini.synthesis_model
        );
        Ok(WizardController::new(
            Arc::clone(&self.catalog),
            Arc::new(client),
        ))
    }

    /// [`connect`](Self::connect) with the file-backed secret service.
    pub async fn build_controller(&self) -> Result<WizardController> {
        let secrets = FileSecretService::new(self.paths.secret_file());
        self.connect(&secrets).await
    }
}
