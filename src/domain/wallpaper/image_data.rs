//! Helpers for the `imageData` string of a record.
//!
//! Embedded images use the `data:<mime>;base64,<payload>` form; anything
//! else is treated as a remote URL.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

/// Fallback when a payload carries no usable mime type
pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// Wrap raw image bytes as a `data:` URL.
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, BASE64.encode(bytes))
}

/// Split a base64 `data:` URL into `(mime, payload)`.
pub fn parse_data_url(value: &str) -> Option<(&str, &str)> {
    let rest = value.strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',')?;
    let mime = meta.strip_suffix(";base64")?;
    let mime = if mime.is_empty() { DEFAULT_IMAGE_MIME } else { mime };
    Some((mime, payload))
}

/// Decode the bytes of a base64 `data:` URL.
pub fn decode_data_url(value: &str) -> Option<Result<(String, Vec<u8>), base64::DecodeError>> {
    let (mime, payload) = parse_data_url(value)?;
    Some(BASE64.decode(payload.trim()).map(|bytes| (mime.to_string(), bytes)))
}

/// File extension for an image mime type (`jpg` when unknown).
pub fn extension_for_mime(mime: &str) -> &'static str {
    match mime.to_lowercase().as_str() {
        "image/png" => "png",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "jpg",
    }
}
