//! `v4.local` tokens: XChaCha20 with a BLAKE2b-MAC, keys derived per token.
//!
//! ```text
//! n            = random(32)
//! Ek || n2     = blake2b-56(key = k, "paseto-encryption-key" || n)
//! Ak           = blake2b-32(key = k, "paseto-auth-key-for-aead" || n)
//! c            = xchacha20(Ek, n2, m)
//! t            = blake2b-32(key = Ak, PAE("v4.local.", n, c, f, i))
//! token        = "v4.local." || b64(n || c || t) [|| "." || b64(f)]
//! ```

use paseto4_claims::{Input, decode_payload, validate_footer, validate_payload};
use paseto4_core::key::parse_key_data;
use paseto4_core::pae::pae_into;
use paseto4_core::primitives::{CIPHER_KEY_LEN, CIPHER_NONCE_LEN};
use paseto4_core::{KeyData, KeyKind, PasetoError, Primitives, Purpose, RawKey, tokens};
use rand_core::TryCryptoRng;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::options::{DecryptOptions, EncryptOptions};
use crate::token::{UnsealedToken, assertion_bytes};

pub const NONCE_LEN: usize = 32;
pub const TAG_LEN: usize = 32;

const ENCRYPTION_KEY_INFO: &[u8] = b"paseto-encryption-key";
const AUTH_KEY_INFO: &[u8] = b"paseto-auth-key-for-aead";

#[derive(Zeroize, ZeroizeOnDrop)]
struct SubKeys {
    ek: [u8; CIPHER_KEY_LEN],
    n2: [u8; CIPHER_NONCE_LEN],
    ak: [u8; 32],
}

impl SubKeys {
    fn derive<P: Primitives>(key: &RawKey, nonce: &[u8; NONCE_LEN]) -> Result<Self, PasetoError> {
        let mut tmp = Zeroizing::new([0u8; CIPHER_KEY_LEN + CIPHER_NONCE_LEN]);
        P::keyed_hash(
            key.as_bytes(),
            |w| {
                w.write(ENCRYPTION_KEY_INFO);
                w.write(nonce);
            },
            &mut tmp[..],
        )?;

        let mut keys = SubKeys {
            ek: [0; CIPHER_KEY_LEN],
            n2: [0; CIPHER_NONCE_LEN],
            ak: [0; 32],
        };
        keys.ek.copy_from_slice(&tmp[..CIPHER_KEY_LEN]);
        keys.n2.copy_from_slice(&tmp[CIPHER_KEY_LEN..]);
        P::keyed_hash(
            key.as_bytes(),
            |w| {
                w.write(AUTH_KEY_INFO);
                w.write(nonce);
            },
            &mut keys.ak,
        )?;
        Ok(keys)
    }

    fn tag<P: Primitives>(
        &self,
        nonce: &[u8],
        ciphertext: &[u8],
        footer: &[u8],
        assertion: &[u8],
    ) -> Result<[u8; TAG_LEN], PasetoError> {
        let magic = Purpose::Local.token_magic().as_bytes();
        let mut tag = [0; TAG_LEN];
        P::keyed_hash(
            &self.ak,
            |w| pae_into(&[magic, nonce, ciphertext, footer, assertion], w),
            &mut tag,
        )?;
        Ok(tag)
    }
}

/// Encrypt `message` under `key` with a caller chosen nonce, returning the token payload.
///
/// This is a low level building block. Reusing a nonce with the same key
/// breaks confidentiality; use [`encrypt`] unless you are reproducing test vectors.
pub fn dangerous_seal_with_nonce<P: Primitives>(
    key: &RawKey,
    nonce: &[u8; NONCE_LEN],
    message: &[u8],
    footer: &[u8],
    assertion: &[u8],
) -> Result<Vec<u8>, PasetoError> {
    key.expect_kind(KeyKind::Local)?;
    let keys = SubKeys::derive::<P>(key, nonce)?;

    let mut payload = Vec::with_capacity(NONCE_LEN + message.len() + TAG_LEN);
    payload.extend_from_slice(nonce);
    payload.extend_from_slice(message);

    let ciphertext = &mut payload[NONCE_LEN..];
    P::stream_xor(&keys.ek, &keys.n2, ciphertext)?;
    let tag = keys.tag::<P>(nonce, ciphertext, footer, assertion)?;
    payload.extend_from_slice(&tag);

    Ok(payload)
}

/// Authenticate and decrypt a token payload, returning the plaintext.
///
/// Every authentication failure is reported as [`PasetoError::TokenInvalid`].
pub fn unseal<P: Primitives>(
    key: &RawKey,
    payload: &[u8],
    footer: &[u8],
    assertion: &[u8],
) -> Result<Vec<u8>, PasetoError> {
    key.expect_kind(KeyKind::Local)?;

    let (nonce, rest) = payload
        .split_first_chunk::<NONCE_LEN>()
        .ok_or(PasetoError::TokenInvalid)?;
    let (ciphertext, tag) = rest
        .split_last_chunk::<TAG_LEN>()
        .ok_or(PasetoError::TokenInvalid)?;

    let keys = SubKeys::derive::<P>(key, nonce)?;
    let expected = keys.tag::<P>(nonce, ciphertext, footer, assertion)?;
    if !bool::from(expected.as_slice().ct_eq(tag.as_slice())) {
        tracing::debug!("v4.local authentication tag mismatch");
        return Err(PasetoError::TokenInvalid);
    }

    let mut plaintext = ciphertext.to_vec();
    P::stream_xor(&keys.ek, &keys.n2, &mut plaintext)?;
    Ok(plaintext)
}

/// Encrypt `payload` into a `v4.local` token.
///
/// The payload must be a JSON object, see
/// [`validate_payload`](paseto4_claims::validate_payload). The nonce is drawn from `rng`.
pub fn encrypt<P: Primitives>(
    key: impl Into<KeyData>,
    payload: impl Into<Input>,
    options: EncryptOptions,
    mut rng: impl TryCryptoRng,
) -> Result<String, PasetoError> {
    let key = parse_key_data(KeyKind::Local, key)?;
    let claims = validate_payload(payload, &options.payload_options())?;
    let message = Zeroizing::new(claims.to_vec()?);
    let footer = match options.footer {
        Some(footer) => validate_footer(footer)?,
        None => Vec::new(),
    };
    let assertion = assertion_bytes(options.assertion)?;

    let mut nonce = [0; NONCE_LEN];
    rng.try_fill_bytes(&mut nonce)
        .map_err(|_| PasetoError::Crypto)?;

    let payload = dangerous_seal_with_nonce::<P>(&key, &nonce, &message, &footer, &assertion)?;
    tracing::trace!(purpose = "local", len = payload.len(), "sealed token");
    Ok(tokens::join(Purpose::Local, &payload, Some(&footer)))
}

/// Decrypt a `v4.local` token and check its claims.
///
/// A token that authenticates but whose claims have expired, or are not yet
/// valid, still fails with [`PasetoError::ClaimInvalid`].
pub fn decrypt<P: Primitives>(
    key: impl Into<KeyData>,
    token: impl AsRef<[u8]>,
    options: DecryptOptions,
) -> Result<UnsealedToken, PasetoError> {
    let key = parse_key_data(KeyKind::Local, key)?;
    let assertion = assertion_bytes(options.assertion)?;

    let parts = tokens::split(token, Purpose::Local).inspect_err(|err| {
        tracing::debug!(error = %err, "could not split v4.local token");
    })?;

    let plaintext = Zeroizing::new(unseal::<P>(
        &key,
        &parts.payload,
        parts.footer_bytes(),
        &assertion,
    )?);

    let claims = decode_payload(&plaintext, &options.limits, options.now).inspect_err(|err| {
        tracing::debug!(error = %err, "v4.local token claims rejected");
    })?;
    tracing::trace!(purpose = "local", len = plaintext.len(), "opened token");

    Ok(UnsealedToken {
        claims,
        footer: parts.footer,
    })
}
