//! `v4.public` tokens: Ed25519 signatures over the pre-auth encoding.
//!
//! ```text
//! sig   = ed25519-sign(sk, PAE("v4.public.", m, f, i))
//! token = "v4.public." || b64(m || sig) [|| "." || b64(f)]
//! ```

use paseto4_claims::{Input, decode_payload, validate_footer, validate_payload};
use paseto4_core::key::parse_key_data;
use paseto4_core::pae::pae;
use paseto4_core::primitives::{PUBLIC_KEY_LEN, SECRET_KEY_LEN, SIGNATURE_LEN};
use paseto4_core::{KeyData, KeyKind, PasetoError, Primitives, Purpose, RawKey, tokens};

use crate::options::{SignOptions, VerifyOptions};
use crate::token::{UnsealedToken, assertion_bytes};

fn pre_auth(message: &[u8], footer: &[u8], assertion: &[u8]) -> Vec<u8> {
    pae(&[
        Purpose::Public.token_magic().as_bytes(),
        message,
        footer,
        assertion,
    ])
}

/// Sign `message` with a secret key, returning the token payload.
pub fn seal<P: Primitives>(
    key: &RawKey,
    message: &[u8],
    footer: &[u8],
    assertion: &[u8],
) -> Result<Vec<u8>, PasetoError> {
    let secret_key: &[u8; SECRET_KEY_LEN] = key
        .expect_kind(KeyKind::Secret)?
        .as_bytes()
        .try_into()
        .map_err(|_| PasetoError::KeyInvalid)?;

    let signature = P::sign(secret_key, &pre_auth(message, footer, assertion))?;

    let mut payload = Vec::with_capacity(message.len() + SIGNATURE_LEN);
    payload.extend_from_slice(message);
    payload.extend_from_slice(&signature);
    Ok(payload)
}

/// Verify a token payload with a public key, returning the signed message.
pub fn unseal<'a, P: Primitives>(
    key: &RawKey,
    payload: &'a [u8],
    footer: &[u8],
    assertion: &[u8],
) -> Result<&'a [u8], PasetoError> {
    let public_key: &[u8; PUBLIC_KEY_LEN] = key
        .expect_kind(KeyKind::Public)?
        .as_bytes()
        .try_into()
        .map_err(|_| PasetoError::KeyInvalid)?;

    let (message, signature) = payload
        .split_last_chunk::<SIGNATURE_LEN>()
        .ok_or(PasetoError::TokenInvalid)?;
    if message.is_empty() {
        return Err(PasetoError::TokenInvalid);
    }

    P::verify(public_key, &pre_auth(message, footer, assertion), signature).inspect_err(|_| {
        tracing::debug!("v4.public signature rejected");
    })?;
    Ok(message)
}

/// Sign `payload` into a `v4.public` token.
///
/// `key` must be a `k4.secret` key.
pub fn sign<P: Primitives>(
    key: impl Into<KeyData>,
    payload: impl Into<Input>,
    options: SignOptions,
) -> Result<String, PasetoError> {
    let key = parse_key_data(KeyKind::Secret, key)?;
    let claims = validate_payload(payload, &options.payload_options())?;
    let message = claims.to_vec()?;
    let footer = match options.footer {
        Some(footer) => validate_footer(footer)?,
        None => Vec::new(),
    };
    let assertion = assertion_bytes(options.assertion)?;

    let payload = seal::<P>(&key, &message, &footer, &assertion)?;
    tracing::trace!(purpose = "public", len = payload.len(), "sealed token");
    Ok(tokens::join(Purpose::Public, &payload, Some(&footer)))
}

/// Verify a `v4.public` token and check its claims.
///
/// `key` must be a `k4.public` key.
pub fn verify<P: Primitives>(
    key: impl Into<KeyData>,
    token: impl AsRef<[u8]>,
    options: VerifyOptions,
) -> Result<UnsealedToken, PasetoError> {
    let key = parse_key_data(KeyKind::Public, key)?;
    let assertion = assertion_bytes(options.assertion)?;

    let parts = tokens::split(token, Purpose::Public).inspect_err(|err| {
        tracing::debug!(error = %err, "could not split v4.public token");
    })?;
    let message = unseal::<P>(&key, &parts.payload, parts.footer_bytes(), &assertion)?;

    let claims = decode_payload(message, &options.limits, options.now).inspect_err(|err| {
        tracing::debug!(error = %err, "v4.public token claims rejected");
    })?;
    tracing::trace!(purpose = "public", len = message.len(), "opened token");

    Ok(UnsealedToken {
        claims,
        footer: parts.footer,
    })
}
