//! Base64 payload and `data:` URL handling for inline uploads.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::CoreError;

/// MIME type assumed when the client does not send one.
pub const DEFAULT_MIME_TYPE: &str = "video/mp4";

/// Strip a `data:<mime>;base64,` header, if present.
///
/// Everything up to and including the first comma is dropped; input without
/// a comma is returned unchanged.
pub fn strip_data_url_header(input: &str) -> &str {
    match input.split_once(',') {
        Some((_, payload)) => payload,
        None => input,
    }
}

/// Drop ASCII whitespace from a base64 payload.
///
/// Clients send MIME-wrapped payloads (line breaks every 76 characters) as
/// often as single-line ones; both compact to the same string.
pub fn compact_base64(payload: &str) -> String {
    payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect()
}

/// Decode a standard-alphabet, padded base64 payload. Embedded ASCII
/// whitespace is ignored.
pub fn decode_base64(payload: &str) -> Result<Vec<u8>, CoreError> {
    Ok(STANDARD.decode(compact_base64(payload))?)
}

/// Encode bytes as standard-alphabet, padded base64.
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Build a `data:` URL from a MIME type and an already-encoded payload.
pub fn build_data_url(mime_type: &str, payload: &str) -> String {
    format!("data:{mime_type};base64,{payload}")
}
