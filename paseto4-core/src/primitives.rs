//! The cryptographic primitives a PASETO v4 implementation is assembled from.
//!
//! This is a low level detail used to build PASETO version implementations.
//! The token and key logic in this workspace only deals with byte layouts; the
//! algorithms themselves come from an implementation of [`Primitives`].

use crate::PasetoError;
use crate::pae::WriteBytes;

/// Length of the public key in a v4 key pair.
pub const PUBLIC_KEY_LEN: usize = 32;
/// Length of the secret key in a v4 key pair: seed followed by public key.
pub const SECRET_KEY_LEN: usize = 64;
/// Length of the seed that a v4 key pair is derived from.
pub const SEED_LEN: usize = 32;
/// Length of a v4 signature.
pub const SIGNATURE_LEN: usize = 64;
/// Length of the stream cipher key.
pub const CIPHER_KEY_LEN: usize = 32;
/// Length of the stream cipher nonce.
pub const CIPHER_NONCE_LEN: usize = 24;

/// Cryptographic building blocks for v4 tokens.
///
/// * keyed BLAKE2b for key derivation and authentication tags
/// * XChaCha20 for encryption
/// * Ed25519 for signatures
pub trait Primitives {
    /// Keyed BLAKE2b over everything `message` writes, filling `out`.
    ///
    /// Implementations must support output lengths of 32 and 56 bytes.
    fn keyed_hash(
        key: &[u8],
        message: impl FnOnce(&mut dyn WriteBytes),
        out: &mut [u8],
    ) -> Result<(), PasetoError>;

    /// Apply the XChaCha20 keystream to `buf` in place.
    fn stream_xor(
        key: &[u8; CIPHER_KEY_LEN],
        nonce: &[u8; CIPHER_NONCE_LEN],
        buf: &mut [u8],
    ) -> Result<(), PasetoError>;

    /// Derive the Ed25519 public key for the given seed.
    fn public_key(seed: &[u8; SEED_LEN]) -> Result<[u8; PUBLIC_KEY_LEN], PasetoError>;

    /// Sign `message`.
    ///
    /// Fails with [`PasetoError::KeyInvalid`] if the public half of `secret_key`
    /// does not belong to its seed.
    fn sign(
        secret_key: &[u8; SECRET_KEY_LEN],
        message: &[u8],
    ) -> Result<[u8; SIGNATURE_LEN], PasetoError>;

    /// Verify `signature` over `message`.
    ///
    /// Any failure, including a malformed public key, is [`PasetoError::TokenInvalid`].
    fn verify(
        public_key: &[u8; PUBLIC_KEY_LEN],
        message: &[u8],
        signature: &[u8; SIGNATURE_LEN],
    ) -> Result<(), PasetoError>;
}
