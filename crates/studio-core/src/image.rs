//! Encoded images exchanged between the wizard and the transformation client.
//!
//! Images cross component boundaries as base64 text tagged with a MIME type,
//! rendered as `data:<mime>;base64,<payload>` when a displayable reference is
//! needed.

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StudioError};

/// MIME type of every synthesized result.
pub const PNG_MIME: &str = "image/png";

/// MIME type assumed for bare base64 input without a data-URI header.
pub const DEFAULT_SOURCE_MIME: &str = "image/jpeg";

const DATA_URI_SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64";

/// A base64-encoded image with its MIME type.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedImage {
    mime_type: String,
    data: String,
}

impl EncodedImage {
    /// Wraps an already base64-encoded payload.
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Encodes raw image bytes.
    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self::new(mime_type, BASE64_STANDARD.encode(bytes))
    }

    /// Wraps a base64 PNG payload returned by the synthesis model.
    pub fn png(data: impl Into<String>) -> Self {
        Self::new(PNG_MIME, data)
    }

    /// Parses a `data:` URI, or treats the whole input as base64 when there is
    /// no URI header.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        let Some(rest) = input.strip_prefix(DATA_URI_SCHEME) else {
            if input.is_empty() {
                return Err(StudioError::invalid_image("image payload is empty"));
            }
            return Ok(Self::new(DEFAULT_SOURCE_MIME, input));
        };

        let (header, data) = rest
            .split_once(',')
            .ok_or_else(|| StudioError::invalid_image("data URI has no ',' separator"))?;

        let mime_type = header
            .strip_suffix(BASE64_MARKER)
            .ok_or_else(|| StudioError::invalid_image("only base64 data URIs are supported"))?;

        if data.is_empty() {
            return Err(StudioError::invalid_image("image payload is empty"));
        }

        let mime_type = if mime_type.is_empty() {
            DEFAULT_SOURCE_MIME
        } else {
            mime_type
        };

        Ok(Self::new(mime_type, data))
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// The base64 payload without any URI header.
    pub fn base64_data(&self) -> &str {
        &self.data
    }

    /// Renders a displayable `data:` URI.
    pub fn to_data_uri(&self) -> String {
        format!(
            "{DATA_URI_SCHEME}{}{BASE64_MARKER},{}",
            self.mime_type, self.data
        )
    }

    /// Decodes the payload to raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>> {
        Ok(BASE64_STANDARD.decode(self.data.as_bytes())?)
    }

    /// Approximate decoded size in bytes, for logging.
    pub fn approx_byte_len(&self) -> usize {
        self.data.len() / 4 * 3
    }
}

impl FromStr for EncodedImage {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

// Payloads run to megabytes; keep them out of debug output.
impl fmt::Debug for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedImage")
            .field("mime_type", &self.mime_type)
            .field("approx_bytes", &self.approx_byte_len())
            .finish()
    }
}
