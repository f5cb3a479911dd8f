use paseto4_claims::{Claims, Input, SizeLimits, parse_footer_claims, validate_assertion};
use paseto4_core::PasetoError;
use serde_json::{Map, Value};

/// The contents of a token that was decrypted or verified.
#[derive(Clone, Debug, PartialEq)]
pub struct UnsealedToken {
    /// The validated payload.
    pub claims: Claims,
    /// The raw footer, if the token had one.
    pub footer: Option<Vec<u8>>,
}

impl UnsealedToken {
    /// The footer as text, if it is valid UTF-8.
    pub fn footer_str(&self) -> Option<&str> {
        std::str::from_utf8(self.footer.as_deref()?).ok()
    }

    /// Parse the footer as a JSON object.
    ///
    /// `kid` and `wpk` must be strings if they are present. Returns `None` if
    /// the token has no footer.
    pub fn footer_claims(
        &self,
        limits: &SizeLimits,
    ) -> Result<Option<Map<String, Value>>, PasetoError> {
        self.footer
            .as_deref()
            .map(|footer| parse_footer_claims(footer, limits))
            .transpose()
    }
}

pub(crate) fn assertion_bytes(assertion: Option<Input>) -> Result<Vec<u8>, PasetoError> {
    Ok(match assertion {
        Some(assertion) => validate_assertion(assertion)?,
        None => Vec::new(),
    })
}
