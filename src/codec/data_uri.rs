//! `data:<mime>;base64,<payload>` strings.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::DecodeError;

/// Build a base64 data URI for the given bytes.
pub fn to_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Split a base64 data URI into its MIME type and decoded payload.
///
/// Only the base64 form is accepted; percent-encoded data URIs never come
/// out of a file picker.
pub fn parse_data_uri(uri: &str) -> Result<(String, Vec<u8>), DecodeError> {
    let rest = uri
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| DecodeError::InvalidDataUri("missing data: prefix".to_string()))?;

    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| DecodeError::InvalidDataUri("missing ',' separator".to_string()))?;

    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| DecodeError::InvalidDataUri("payload is not base64".to_string()))?;

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| DecodeError::InvalidDataUri(e.to_string()))?;

    let mime = if mime.is_empty() {
        "application/octet-stream"
    } else {
        mime
    };
    Ok((mime.to_string(), bytes))
}
