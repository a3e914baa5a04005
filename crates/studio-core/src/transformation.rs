//! The seam between the wizard and the remote model service.

use crate::error::Result;
use crate::image::EncodedImage;
use crate::session::UserSelections;

/// Remote face validation and styled-image synthesis.
///
/// Each call is a single attempt: implementations must not retry, cache, or
/// rate-limit. Implementations never touch session state; they return
/// results the controller applies.
#[async_trait::async_trait]
pub trait TransformationService: Send + Sync {
    /// Asks whether exactly one clear, front-facing human face is visible.
    ///
    /// # Returns
    ///
    /// - `Ok(true)`: the model answered affirmatively
    /// - `Ok(false)`: any other answer, including no answer at all
    /// - `Err(_)`: transport or service failure only
    async fn validate_face(&self, image: &EncodedImage) -> Result<bool>;

    /// Requests an identity-preserving restyle of `image`.
    ///
    /// Empty slots fall back to neutral phrases. Fails with
    /// `StudioError::SynthesisFailed` when the response carries no image.
    async fn transform_image(
        &self,
        image: &EncodedImage,
        selections: &UserSelections,
    ) -> Result<EncodedImage>;
}
