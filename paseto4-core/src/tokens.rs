//! Splitting and joining the dot-delimited token string.
//!
//! `v4.<purpose>.<base64url(payload)>[.<base64url(footer)>]`

use crate::version::{self, Purpose};
use crate::{PasetoError, base64};

/// No v4 payload is shorter than this, whatever the purpose.
pub const MIN_PAYLOAD_LEN: usize = 32;

/// The segments of a token, with payload and footer decoded.
///
/// Nothing here has been authenticated yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenParts {
    pub purpose: Purpose,
    pub payload: Vec<u8>,
    pub footer: Option<Vec<u8>>,
}

impl TokenParts {
    /// The footer bytes, empty if the token had none.
    pub fn footer_bytes(&self) -> &[u8] {
        self.footer.as_deref().unwrap_or_default()
    }
}

/// Split a token of the given purpose into its parts.
///
/// The token must have exactly three or four segments, start with the v4 header
/// for `purpose`, and carry a payload of at least [`MIN_PAYLOAD_LEN`] bytes.
pub fn split(token: impl AsRef<[u8]>, purpose: Purpose) -> Result<TokenParts, PasetoError> {
    let mut segments = token.as_ref().split(|&b| b == b'.');

    let (Some(header), Some(kind), Some(payload)) =
        (segments.next(), segments.next(), segments.next())
    else {
        return Err(PasetoError::TokenInvalid);
    };
    let footer = segments.next();
    if segments.next().is_some() {
        return Err(PasetoError::TokenInvalid);
    }

    if header != version::HEADER.as_bytes() || kind != purpose.as_str().as_bytes() {
        return Err(PasetoError::TokenInvalid);
    }

    // cheap rejection before decoding anything
    if base64::decoded_len(payload.len()) < MIN_PAYLOAD_LEN {
        return Err(PasetoError::TokenInvalid);
    }
    let payload = base64::decode_bytes(payload)?;
    if payload.len() < MIN_PAYLOAD_LEN {
        return Err(PasetoError::TokenInvalid);
    }

    let footer = match footer {
        // `join` never writes an empty footer segment
        Some([]) => return Err(PasetoError::TokenInvalid),
        Some(footer) => Some(base64::decode_bytes(footer)?),
        None => None,
    };

    Ok(TokenParts {
        purpose,
        payload,
        footer,
    })
}

/// Join a payload and optional footer into a token string.
///
/// An empty footer is left out entirely.
pub fn join(purpose: Purpose, payload: &[u8], footer: Option<&[u8]>) -> String {
    let mut token = String::from(purpose.token_magic());
    token.push_str(&base64::encode(payload));
    if let Some(footer) = footer.filter(|f| !f.is_empty()) {
        token.push('.');
        token.push_str(&base64::encode(footer));
    }
    token
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "v4.local.AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAQAr68PS4AXe7If_ZgesdkUMvSwscFlAl1pk5HC0e8kApeaqMfGo_7OpBnwJOAbY9V7WU6abu74MmcUE8YWAiaArVI8XJ5hOb_4v9RmDkneN0S92dx0OW4pgy7omxgf3S8c3LlQg";

    #[test]
    fn splits_local_token() {
        let parts = split(TOKEN, Purpose::Local).unwrap();
        assert_eq!(parts.purpose, Purpose::Local);
        assert_eq!(parts.payload.len(), 133);
        assert_eq!(parts.footer, None);
        assert_eq!(parts.footer_bytes(), b"");
    }

    #[test]
    fn splits_bytes() {
        let parts = split(TOKEN.as_bytes(), Purpose::Local).unwrap();
        assert_eq!(parts.payload.len(), 133);
    }

    #[test]
    fn splits_footer() {
        let token = format!("{TOKEN}.YWJj");
        let parts = split(&token, Purpose::Local).unwrap();
        assert_eq!(parts.footer.as_deref(), Some(&b"abc"[..]));
    }

    #[test]
    fn rejects_extra_segments() {
        let token = format!("{TOKEN}.abc.def");
        assert!(matches!(
            split(&token, Purpose::Local),
            Err(PasetoError::TokenInvalid)
        ));
        assert!(matches!(
            split("v4.local", Purpose::Local),
            Err(PasetoError::TokenInvalid)
        ));
    }

    #[test]
    fn rejects_wrong_header() {
        assert!(matches!(
            split(TOKEN, Purpose::Public),
            Err(PasetoError::TokenInvalid)
        ));
        let v3 = TOKEN.replacen("v4.", "v3.", 1);
        assert!(matches!(
            split(&v3, Purpose::Local),
            Err(PasetoError::TokenInvalid)
        ));
        let upper = TOKEN.replacen("local", "LOCAL", 1);
        assert!(matches!(
            split(&upper, Purpose::Local),
            Err(PasetoError::TokenInvalid)
        ));
    }

    #[test]
    fn rejects_short_payload() {
        assert!(matches!(
            split("v4.local.abcdef", Purpose::Local),
            Err(PasetoError::TokenInvalid)
        ));
        assert!(matches!(
            split("v4.public.AAAAAAAAAAAAAAAAAAAAAAAAA", Purpose::Public),
            Err(PasetoError::TokenInvalid)
        ));
    }

    #[test]
    fn rejects_empty_footer_segment() {
        let token = format!("{TOKEN}.");
        assert!(matches!(
            split(&token, Purpose::Local),
            Err(PasetoError::TokenInvalid)
        ));
    }

    #[test]
    fn rejects_bad_encoding() {
        let token = format!("{TOKEN}.Y*Jj");
        assert!(matches!(
            split(&token, Purpose::Local),
            Err(PasetoError::EncodingInvalid)
        ));
    }

    #[test]
    fn joins() {
        let payload = [0u8; 40];
        let token = join(Purpose::Public, &payload, None);
        assert!(token.starts_with("v4.public."));
        assert_eq!(token.split('.').count(), 3);

        assert_eq!(join(Purpose::Public, &payload, Some(b"")), token);

        let token = join(Purpose::Local, &payload, Some(b"abc"));
        assert!(token.ends_with(".YWJj"));
        let parts = split(&token, Purpose::Local).unwrap();
        assert_eq!(parts.payload, payload);
        assert_eq!(parts.footer.as_deref(), Some(&b"abc"[..]));
    }
}
