//! URL component encoding.
//!
//! Matches JavaScript's `encodeURIComponent` / `decodeURIComponent`: every
//! byte except ASCII alphanumerics and `-_.!~*'()` is percent-encoded, and `+`
//! is left alone on decode (it is not a space outside form bodies).

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use thiserror::Error;

/// Characters left unescaped by `encodeURIComponent`, besides alphanumerics.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("invalid encoded string: {0}")]
    Invalid(String),
}

pub fn url_encode(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}

/// Decode percent escapes.
///
/// `percent_decode_str` passes malformed escapes (`%zz`, a trailing `%`)
/// through literally, so those are rejected up front.
pub fn url_decode(input: &str) -> Result<String, EncodingError> {
    let bytes = input.as_bytes();
    for (i, _) in input.match_indices('%') {
        let escape = bytes.get(i + 1..i + 3);
        if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
            return Err(EncodingError::Invalid(format!(
                "malformed escape at byte {i}"
            )));
        }
    }

    percent_decode_str(input)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| EncodingError::Invalid(format!("decoded bytes are not UTF-8: {e}")))
}
