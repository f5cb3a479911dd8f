//! Core encodings for PASETO v4.
//!
//! This crate holds the parts of a PASETO implementation that do not depend on
//! a particular cryptography backend: the base64 and pre-auth encodings, the
//! magic string tables, PASERK key parsing, and token framing. The actual
//! primitives are supplied through [`Primitives`](primitives::Primitives).

pub mod base64;
pub mod key;
pub mod pae;
pub mod primitives;
pub mod tokens;
pub mod version;

pub use key::{GeneratedKeys, KeyData, KeyFormat, KeyPair, RawKey};
pub use primitives::Primitives;
pub use version::{KeyKind, Purpose};

/// Error returned for all PASETO and PASERK operations that can fail
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PasetoError {
    /// Key material did not have the expected magic prefix, length or type.
    #[error("could not parse the key")]
    KeyInvalid,
    /// The requested purpose or key kind is not recognized.
    #[error("unrecognized purpose")]
    PurposeInvalid,
    /// The requested key serialization format is not recognized.
    #[error("unrecognized key format")]
    FormatInvalid,
    /// The token was malformed, or could not be decrypted/verified.
    #[error("could not parse or authenticate the token")]
    TokenInvalid,
    /// The payload was not a JSON object.
    #[error("invalid payload: {0}")]
    PayloadInvalid(String),
    /// A registered claim had the wrong type or broke a temporal constraint.
    #[error("invalid claim: {0}")]
    ClaimInvalid(String),
    /// A time value could not be resolved to a point in time.
    #[error("invalid time: {0}")]
    TimeInvalid(String),
    /// The input was not valid unpadded base64url.
    #[error("invalid base64url encoding")]
    EncodingInvalid,
    /// A parameter had the wrong shape entirely.
    #[error("invalid parameter: {0}")]
    TypeInvalid(String),
    /// JSON input exceeded the configured complexity bounds.
    #[error("size exceeded: {0}")]
    SizeExceeded(String),
    /// The random source or the primitives provider failed.
    #[error("cryptographic primitive failed")]
    Crypto,
}
