//! Claims handling for PASETO v4 tokens.
//!
//! Payloads are JSON objects. Before a payload is sealed, its registered claims
//! are type-checked and its time claims are resolved and ordered. Missing `iat`
//! and `exp` claims can be filled in. The same checks run again after a token
//! is opened, so a token that expired after it was issued is still rejected.
//! An opened token's time claims must be absolute; a relative duration there
//! is rejected rather than resolved against the time of opening.
//!
//! When using a JSON footer, be aware of the risks of parsing user provided JSON.
//! <https://github.com/paseto-standard/paseto-spec/blob/master/docs/02-Implementation-Guide/01-Payload-Processing.md#storing-json-in-the-footer>.
//! [`guard::assert_size_bounds`] bounds the nesting depth and key count before parsing.

#![forbid(unsafe_code)]

pub use jiff;
pub use serde_json;

use serde_json::{Map, Value};

mod claims;
pub mod guard;
pub mod time;
mod validate;

pub use claims::Claims;
pub use guard::SizeLimits;
pub use validate::{
    DEFAULT_EXPIRATION, PayloadOptions, decode_payload, parse_footer_claims, validate_assertion,
    validate_footer, validate_payload,
};

/// A payload, footer or implicit assertion, in any of the shapes callers hand them over.
#[derive(Clone, Debug, PartialEq)]
pub enum Input {
    /// JSON text, or opaque text for footers and assertions.
    Text(String),
    /// Raw bytes, usually UTF-8 JSON.
    Bytes(Vec<u8>),
    /// An already parsed JSON value.
    Json(Value),
}

impl From<&str> for Input {
    fn from(s: &str) -> Self {
        Input::Text(s.to_owned())
    }
}

impl From<String> for Input {
    fn from(s: String) -> Self {
        Input::Text(s)
    }
}

impl From<&String> for Input {
    fn from(s: &String) -> Self {
        Input::Text(s.clone())
    }
}

impl From<&[u8]> for Input {
    fn from(b: &[u8]) -> Self {
        Input::Bytes(b.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for Input {
    fn from(b: &[u8; N]) -> Self {
        Input::Bytes(b.to_vec())
    }
}

impl From<Vec<u8>> for Input {
    fn from(b: Vec<u8>) -> Self {
        Input::Bytes(b)
    }
}

impl From<Value> for Input {
    fn from(v: Value) -> Self {
        Input::Json(v)
    }
}

impl From<Map<String, Value>> for Input {
    fn from(map: Map<String, Value>) -> Self {
        Input::Json(Value::Object(map))
    }
}

impl From<Claims> for Input {
    fn from(claims: Claims) -> Self {
        Input::Json(Value::Object(claims.into_map()))
    }
}
