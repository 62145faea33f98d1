use super::wire::InlineData;

const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// Splits a data URL (`data:image/png;base64,AAAA`) into the MIME type and
/// base64 payload expected by the provider's `inlineData` part.
///
/// A header without a MIME type falls back to `image/jpeg`. A string with no
/// comma is treated as a bare payload.
pub fn inline_data_from_data_url(encoded: &str) -> InlineData {
    let (header, payload) = match encoded.split_once(',') {
        Some((header, payload)) => (header, payload),
        None => ("", encoded),
    };

    let mime_type = header
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(';'))
        .map(|(mime, _)| mime.trim())
        .filter(|mime| !mime.is_empty())
        .unwrap_or(DEFAULT_IMAGE_MIME);

    InlineData {
        mime_type: mime_type.to_string(),
        data: payload.to_string(),
    }
}
