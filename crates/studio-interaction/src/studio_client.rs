//! GeminiStudioClient - face validation and identity-preserving synthesis.
//!
//! Implements [`TransformationService`] on top of any [`GenerateContentApi`].
//! Single attempt per call: no retries, caching, or rate limiting.

use async_trait::async_trait;
use studio_core::config::GeminiSettings;
use studio_core::image::EncodedImage;
use studio_core::session::UserSelections;
use studio_core::{Result, StudioError, TransformationService};

use crate::gemini_api::{
    Content, GeminiRestApi, GenerateContentApi, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, ImageConfig, InlineDataPayload, Part,
};
use crate::instructions::{
    AFFIRMATIVE_TOKEN, FACE_CHECK_INSTRUCTION, TARGET_ASPECT_RATIO, build_transform_instruction,
};

/// Transformation client that talks to Gemini models.
pub struct GeminiStudioClient<A = GeminiRestApi> {
    api: A,
    validation_model: String,
    synthesis_model: String,
}

impl GeminiStudioClient<GeminiRestApi> {
    /// Creates a client backed by the REST transport.
    pub fn from_settings(api_key: impl Into<String>, settings: &GeminiSettings) -> Result<Self> {
        let api = GeminiRestApi::from_settings(api_key, settings)?;
        Ok(Self::with_api(api, settings))
    }
}

impl<A: GenerateContentApi> GeminiStudioClient<A> {
    /// Creates a client over an arbitrary transport.
    pub fn with_api(api: A, settings: &GeminiSettings) -> Self {
        Self {
            api,
            validation_model: settings.validation_model.clone(),
            synthesis_model: settings.synthesis_model.clone(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }
}

fn image_part(image: &EncodedImage) -> Part {
    Part::InlineData {
        inline_data: InlineDataPayload {
            mime_type: image.mime_type().to_string(),
            data: image.base64_data().to_string(),
        },
    }
}

/// Builds the yes/no face-check request.
pub fn face_check_request(image: &EncodedImage) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content::user(vec![
            image_part(image),
            Part::Text {
                text: FACE_CHECK_INSTRUCTION.to_string(),
            },
        ])],
        generation_config: None,
    }
}

/// Builds the synthesis request: source image, composed instruction, 3:4 output.
pub fn transform_request(
    image: &EncodedImage,
    selections: &UserSelections,
) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content::user(vec![
            image_part(image),
            Part::Text {
                text: build_transform_instruction(selections),
            },
        ])],
        generation_config: Some(GenerationConfig {
            response_modalities: Some(vec!["IMAGE".to_string(), "TEXT".to_string()]),
            image_config: Some(ImageConfig {
                aspect_ratio: TARGET_ASPECT_RATIO.to_string(),
            }),
        }),
    }
}

/// Decodes the face-check answer.
///
/// `true` exactly when the answer, lower-cased, contains the affirmative
/// token. Missing text is a plain `false`, never an error.
pub fn decode_face_verdict(response: &GenerateContentResponse) -> Result<bool> {
    Ok(response
        .text()
        .is_some_and(|text| text.to_lowercase().contains(AFFIRMATIVE_TOKEN)))
}

/// Extracts the first inline image of the first candidate as a PNG.
///
/// Inline parts with empty `data` are skipped, so a leading empty payload
/// does not hide a real image later in the same candidate. A candidate whose
/// inline parts are all empty is a synthesis failure.
pub fn decode_synthesized_image(response: &GenerateContentResponse) -> Result<EncodedImage> {
    if let Some(inline) = response
        .first_candidate_parts()
        .iter()
        .filter_map(|part| part.inline_data.as_ref())
        .find(|inline| !inline.data.is_empty())
    {
        return Ok(EncodedImage::png(inline.data.clone()));
    }

    let mut reason = String::from("Identity-preserving generation failed: no image in response");
    if let Some(finish) = response.finish_reason() {
        reason.push_str(&format!(" (finish reason: {finish})"));
    }
    if let Some(text) = response.text() {
        let text: String = text.chars().take(200).collect();
        reason.push_str(&format!("; model said: {}", text.trim()));
    }
    Err(StudioError::synthesis_failed(reason))
}

#[async_trait]
impl<A: GenerateContentApi> TransformationService for GeminiStudioClient<A> {
    async fn validate_face(&self, image: &EncodedImage) -> Result<bool> {
        tracing::info!(
            "[GeminiClient] Validating face with {} ({:?})",
            self.validation_model,
            image
        );
        let response = self
            .api
            .generate_content(&self.validation_model, &face_check_request(image))
            .await?;

        let verdict = decode_face_verdict(&response)?;
        tracing::info!("[GeminiClient] Face check verdict: {}", verdict);
        Ok(verdict)
    }

    async fn transform_image(
        &self,
        image: &EncodedImage,
        selections: &UserSelections,
    ) -> Result<EncodedImage> {
        tracing::info!(
            "[GeminiClient] Requesting synthesis with {} ({:?})",
            self.synthesis_model,
            image
        );
        let response = self
            .api
            .generate_content(&self.synthesis_model, &transform_request(image, selections))
            .await?;

        let result = decode_synthesized_image(&response);
        match &result {
            Ok(output) => tracing::info!("[GeminiClient] Synthesis returned {:?}", output),
            Err(err) => tracing::warn!("[GeminiClient] {}", err),
        }
        result
    }
}
