//! Gemini `generateContent` REST transport.
//!
//! Wire types plus a thin reqwest client. Everything above this module talks
//! to [`GenerateContentApi`], so the studio client can be exercised against a
//! recorded API in tests.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use studio_core::config::GeminiSettings;
use studio_core::{Result, StudioError};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// One `generateContent` call against a named model.
#[async_trait]
pub trait GenerateContentApi: Send + Sync {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;
}

/// reqwest-backed implementation of [`GenerateContentApi`].
#[derive(Clone)]
pub struct GeminiRestApi {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiRestApi {
    /// Creates a transport honouring the configured endpoint and timeout.
    pub fn from_settings(api_key: impl Into<String>, settings: &GeminiSettings) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| StudioError::config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/{model}:generateContent", self.base_url)
    }
}

#[async_trait]
impl GenerateContentApi for GeminiRestApi {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        tracing::debug!("[GeminiClient] POST {}:generateContent", model);

        // The key travels in a header so it never shows up in reqwest's URL-bearing errors.
        let response = self
            .client
            .post(self.endpoint(model))
            .header(API_KEY_HEADER, &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        let body = response.text().await.map_err(|err| {
            StudioError::transport(
                Some(status.as_u16()),
                format!("Failed to read Gemini response body: {err}"),
            )
        })?;

        if !status.is_success() {
            return Err(map_http_error(status, &body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Classifies a failed send as a transport error.
fn map_send_error(err: reqwest::Error) -> StudioError {
    let kind = if err.is_timeout() {
        "timed out"
    } else if err.is_connect() {
        "could not connect"
    } else {
        "failed"
    };
    StudioError::transport(None, format!("Gemini API request {kind}: {err}"))
}

/// Turns a non-2xx response into a transport error, preferring the service's
/// own `error.status` and `error.message` over the raw body.
pub fn map_http_error(status: StatusCode, body: &str) -> StudioError {
    let message = serde_json::from_str::<ErrorWrapper>(body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.to_string());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.to_string());

    StudioError::transport(Some(status.as_u16()), message)
}

// ============================================================================
// Request wire types
// ============================================================================

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Serialize, Debug, Clone)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(parts: Vec<Part>) -> Self {
        Self {
            role: "user".to_string(),
            parts,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineDataPayload,
    },
}

impl Part {
    pub fn text(&self) -> Option<&str> {
        match self {
            Part::Text { text } => Some(text),
            Part::InlineData { .. } => None,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InlineDataPayload {
    pub mime_type: String,
    pub data: String,
}

#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_config: Option<ImageConfig>,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    pub aspect_ratio: String,
}

// ============================================================================
// Response wire types
// ============================================================================

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<ContentResponse>,
    pub finish_reason: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ContentResponse {
    #[serde(default)]
    pub parts: Vec<PartResponse>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PartResponse {
    pub text: Option<String>,
    #[serde(alias = "inline_data")]
    pub inline_data: Option<InlineDataResponse>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InlineDataResponse {
    pub mime_type: Option<String>,
    #[serde(default)]
    pub data: String,
}

impl GenerateContentResponse {
    /// Parts of the first candidate, or an empty slice.
    pub fn first_candidate_parts(&self) -> &[PartResponse] {
        self.candidates
            .as_deref()
            .and_then(|candidates| candidates.first())
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| content.parts.as_slice())
            .unwrap_or_default()
    }

    /// Finish reason of the first candidate.
    pub fn finish_reason(&self) -> Option<&str> {
        self.candidates
            .as_deref()
            .and_then(|candidates| candidates.first())
            .and_then(|candidate| candidate.finish_reason.as_deref())
    }

    /// Concatenated text parts of the first candidate, `None` when there are none.
    pub fn text(&self) -> Option<String> {
        let texts: Vec<&str> = self
            .first_candidate_parts()
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        (!texts.is_empty()).then(|| texts.concat())
    }
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[allow(dead_code)]
    code: Option<i32>,
    message: Option<String>,
    status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_http_error_uses_service_message() {
        let body = r#"{"error":{"code":429,"message":"Quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#;
        let err = map_http_error(StatusCode::TOO_MANY_REQUESTS, body);
        match err {
            StudioError::Transport {
                status_code,
                message,
            } => {
                assert_eq!(status_code, Some(429));
                assert_eq!(message, "RESOURCE_EXHAUSTED: Quota exceeded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_map_http_error_falls_back_to_raw_body() {
        let err = map_http_error(StatusCode::BAD_GATEWAY, "upstream exploded");
        assert_eq!(
            err.to_string(),
            "Transport error (HTTP 502): upstream exploded"
        );
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let request = GenerateContentRequest {
            contents: vec![Content::user(vec![
                Part::InlineData {
                    inline_data: InlineDataPayload {
                        mime_type: "image/jpeg".to_string(),
                        data: "AAAA".to_string(),
                    },
                },
                Part::Text {
                    text: "hello".to_string(),
                },
            ])],
            generation_config: Some(GenerationConfig {
                response_modalities: None,
                image_config: Some(ImageConfig {
                    aspect_ratio: "3:4".to_string(),
                }),
            }),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": [{
                    "role": "user",
                    "parts": [
                        {"inlineData": {"mimeType": "image/jpeg", "data": "AAAA"}},
                        {"text": "hello"}
                    ]
                }],
                "generationConfig": {"imageConfig": {"aspectRatio": "3:4"}}
            })
        );
    }

    #[test]
    fn test_response_text_concatenates_first_candidate() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"parts": [{"text": "tr"}, {"text": "ue"}]}, "finishReason": "STOP"},
                {"content": {"parts": [{"text": "false"}]}}
            ]
        }))
        .unwrap();
        assert_eq!(response.text().as_deref(), Some("true"));
        assert_eq!(response.finish_reason(), Some("STOP"));
    }

    #[test]
    fn test_response_without_candidates_has_no_parts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.first_candidate_parts().is_empty());
        assert!(response.text().is_none());
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let settings = GeminiSettings {
            base_url: "http://localhost:8080/models/".to_string(),
            ..GeminiSettings::default()
        };
        let api = GeminiRestApi::from_settings("key", &settings).unwrap();
        assert_eq!(
            api.endpoint("gemini-2.5-flash-image"),
            "http://localhost:8080/models/gemini-2.5-flash-image:generateContent"
        );
    }
}
