use chrono::{DateTime, Utc};
use emerald_tone::{ImageAnalysis, PixelBuffer};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::codec::data_uri::to_data_uri;

/// Hex characters kept from the SHA-256 of the normalized bytes.
const ID_LENGTH: usize = 16;

/// Identifier of a processed image within a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ImageId(String);

impl ImageId {
    /// Derive an id from the content it identifies.
    pub fn from_content(bytes: &[u8]) -> Self {
        let digest = Sha256::digest(bytes);
        let mut id = hex::encode(digest);
        id.truncate(ID_LENGTH);
        Self(id)
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Encoded image bytes together with their MIME type.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedImage {
    pub mime_type: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl EncodedImage {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// `data:<mime>;base64,...` for display in a browser.
    pub fn to_data_uri(&self) -> String {
        to_data_uri(&self.mime_type, &self.bytes)
    }
}

impl std::fmt::Debug for EncodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncodedImage")
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// One normalized image, ready for before/after display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedImage {
    pub id: ImageId,
    pub name: String,
    pub original: EncodedImage,
    pub normalized: EncodedImage,
    /// Statistics of the original, not of the output
    pub analysis: ImageAnalysis,
    #[serde(skip)]
    pub output: PixelBuffer,
    pub processed_at: DateTime<Utc>,
}
