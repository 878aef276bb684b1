use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine as _;

/// Decode a Base64URL body blob into UTF-8 text.
///
/// Gmail strips padding from part data in most responses but not all,
/// so both variants are tried. Malformed or non-UTF8 data yields None.
pub fn decode_body_data(data: &str) -> Option<String> {
    let bytes = URL_SAFE_NO_PAD
        .decode(data)
        .or_else(|_| URL_SAFE.decode(data))
        .ok()?;
    String::from_utf8(bytes).ok()
}

/// Encode an outbound RFC822 message for the provider's `raw` field:
/// Base64 with the URL-safe alphabet and trailing padding stripped.
pub fn encode_raw_message(message: &str) -> String {
    URL_SAFE_NO_PAD.encode(message.as_bytes())
}
