//! Share-token codec: message id <-> URL-safe base64 of its decimal text.
//!
//! Tokens are obfuscated, not secret. There is no checksum or version byte.

use base64::{engine::general_purpose::URL_SAFE, Engine as _};

/// A token that does not decode to a decimal message id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid share token")]
pub struct InvalidToken;

/// Encode an id as unpadded URL-safe base64 of its decimal representation.
pub fn encode(id: u64) -> String {
    let encoded = URL_SAFE.encode(id.to_string());
    encoded.trim_end_matches('=').to_string()
}

/// Decode a token produced by [`encode`].
///
/// Padding is restored before decoding. Anything that is not base64 of a run
/// of ASCII digits is rejected.
pub fn decode(token: &str) -> Result<u64, InvalidToken> {
    let mut padded = token.to_string();
    while padded.len() % 4 != 0 {
        padded.push('=');
    }

    let bytes = URL_SAFE.decode(padded.as_bytes()).map_err(|_| InvalidToken)?;
    if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
        return Err(InvalidToken);
    }

    // All-digit ASCII is valid UTF-8; only overflow can fail here.
    std::str::from_utf8(&bytes)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .ok_or(InvalidToken)
}
