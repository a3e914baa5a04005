//! Catalog loading.
//!
//! The catalog is read once at startup: `catalog.toml` when present, the
//! built-in catalog otherwise.

use std::path::Path;

use studio_core::Result;
use studio_core::catalog::{Catalog, get_default_catalog};

/// Loads the catalog override at `path`, or the built-in catalog when the
/// file does not exist. An override must pass `Catalog::validate`.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    if !path.exists() {
        return Ok(get_default_catalog());
    }

    let content = std::fs::read_to_string(path)?;
    let catalog: Catalog = toml::from_str(&content)?;
    catalog.validate()?;

    tracing::info!(
        "[Catalog] Loaded override from {} ({} intro slides)",
        path.display(),
        catalog.intro_len()
    );
    Ok(catalog)
}
