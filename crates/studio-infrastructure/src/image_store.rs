//! Reading source portraits from disk and writing results back.

use std::path::Path;

use studio_core::image::EncodedImage;
use studio_core::{Result, StudioError};

/// Reads an image file into an [`EncodedImage`], inferring the MIME type
/// from the extension. Non-image extensions are rejected.
pub async fn load_image(path: &Path) -> Result<EncodedImage> {
    let mime = mime_guess::from_path(path).first().ok_or_else(|| {
        StudioError::invalid_image(format!("Cannot infer image type of {}", path.display()))
    })?;

    if mime.type_() != mime_guess::mime::IMAGE {
        return Err(StudioError::invalid_image(format!(
            "{} is {}, not an image",
            path.display(),
            mime.essence_str()
        )));
    }

    let bytes = tokio::fs::read(path).await?;
    if bytes.is_empty() {
        return Err(StudioError::invalid_image(format!(
            "{} is empty",
            path.display()
        )));
    }

    tracing::debug!("[ImageStore] Read {} ({} bytes)", path.display(), bytes.len());
    Ok(EncodedImage::from_bytes(&bytes, mime.essence_str()))
}

/// Decodes `image` and writes the raw bytes to `path`, creating parent
/// directories as needed.
pub async fn save_image(path: &Path, image: &EncodedImage) -> Result<()> {
    let bytes = image.decode()?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, &bytes).await?;
    tracing::info!("[ImageStore] Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}
