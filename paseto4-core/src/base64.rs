//! Base64url encoding without padding.
//!
//! <https://github.com/paseto-standard/paseto-spec/blob/master/docs/01-Protocol-Versions/Common.md#base64-encoding>.
//!
//! Both directions run in constant time with respect to the data, courtesy of
//! [`base64ct`].

use base64ct::{Base64UrlUnpadded, Encoding};

use crate::PasetoError;

/// Encode bytes as unpadded base64url.
pub fn encode(bytes: &[u8]) -> String {
    Base64UrlUnpadded::encode_string(bytes)
}

/// Decode base64url text.
///
/// Padding is optional, but if present it must be canonical: the input length
/// must be a multiple of four and carry at most two `=`.
pub fn decode(src: &str) -> Result<Vec<u8>, PasetoError> {
    let unpadded = src.trim_end_matches('=');
    let padding = src.len() - unpadded.len();
    if padding > 0 && (padding > 2 || src.len() % 4 != 0) {
        return Err(PasetoError::EncodingInvalid);
    }

    Base64UrlUnpadded::decode_vec(unpadded).map_err(|_| PasetoError::EncodingInvalid)
}

/// Decode base64url text given as raw bytes.
pub fn decode_bytes(src: &[u8]) -> Result<Vec<u8>, PasetoError> {
    let src = core::str::from_utf8(src).map_err(|_| PasetoError::EncodingInvalid)?;
    decode(src)
}

/// Length of the decoded output for `n` characters of unpadded input.
pub(crate) fn decoded_len(n: usize) -> usize {
    // overflow-proof computation of `(3*n)/4`
    let k = n / 4;
    let l = n - 4 * k;
    3 * k + (3 * l) / 4
}
