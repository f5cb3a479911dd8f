//! PASETO v4 (RustCrypto)
//!
//! ```
//! use paseto4::{Claims, GeneratedKeys, KeyFormat, Purpose, SignOptions, VerifyOptions};
//!
//! // create a new keypair
//! let GeneratedKeys::Public { secret_key, public_key } =
//!     paseto4::generate_keys(Purpose::Public, KeyFormat::Paserk).unwrap()
//! else {
//!     unreachable!()
//! };
//!
//! // create a set of token claims
//! let claims = Claims::new()
//!     .from_issuer("https://paseto.example/")
//!     .for_subject("johndoe");
//!
//! // sign a new token. `iat` and `exp` are added for us.
//! let token = paseto4::sign(&secret_key, claims, SignOptions::default()).unwrap();
//! assert!(token.starts_with("v4.public."));
//!
//! // verify the token signature and validate the claims.
//! let verified = paseto4::verify(&public_key, &token, VerifyOptions::default()).unwrap();
//! assert_eq!(verified.claims.subject(), Some("johndoe"));
//! assert!(verified.claims.expiration().is_some());
//! ```
//!
//! Local tokens work the same way with [`encrypt`] and [`decrypt`]. The
//! functions in [`local`] and [`public`] take the primitives backend as a type
//! parameter, and `encrypt` takes the random source, for callers that need to
//! inject either.

#![forbid(unsafe_code)]

/// Low level implementation primitives.
pub mod core;
pub mod local;
mod options;
pub mod public;
mod token;

pub use paseto4_claims::{Claims, Input, PayloadOptions, SizeLimits};
pub use paseto4_core::{
    GeneratedKeys, KeyData, KeyFormat, KeyKind, KeyPair, PasetoError, Purpose, RawKey,
};
pub use options::{
    DecryptOptions, EncryptOptions, OpenOptions, SealOptions, SignOptions, VerifyOptions,
};
pub use token::UnsealedToken;

use rand_core::OsRng;

use crate::core::V4;

/// Encrypt `payload` into a `v4.local` token using a `k4.local` key.
pub fn encrypt(
    key: impl Into<KeyData>,
    payload: impl Into<Input>,
    options: EncryptOptions,
) -> Result<String, PasetoError> {
    local::encrypt::<V4>(key, payload, options, OsRng)
}

/// Decrypt a `v4.local` token using a `k4.local` key.
pub fn decrypt(
    key: impl Into<KeyData>,
    token: impl AsRef<[u8]>,
    options: DecryptOptions,
) -> Result<UnsealedToken, PasetoError> {
    local::decrypt::<V4>(key, token, options)
}

/// Sign `payload` into a `v4.public` token using a `k4.secret` key.
pub fn sign(
    key: impl Into<KeyData>,
    payload: impl Into<Input>,
    options: SignOptions,
) -> Result<String, PasetoError> {
    public::sign::<V4>(key, payload, options)
}

/// Verify a `v4.public` token using a `k4.public` key.
pub fn verify(
    key: impl Into<KeyData>,
    token: impl AsRef<[u8]>,
    options: VerifyOptions,
) -> Result<UnsealedToken, PasetoError> {
    public::verify::<V4>(key, token, options)
}

/// Generate a local key or a signing key pair from the operating system's random source.
pub fn generate_keys(purpose: Purpose, format: KeyFormat) -> Result<GeneratedKeys, PasetoError> {
    paseto4_core::key::generate_keys::<V4>(purpose, format, OsRng)
}
