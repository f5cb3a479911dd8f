use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use paseto4_core::PasetoError;
use paseto4_core::pae::WriteBytes;
use paseto4_core::primitives::{
    CIPHER_KEY_LEN, CIPHER_NONCE_LEN, PUBLIC_KEY_LEN, Primitives, SECRET_KEY_LEN, SEED_LEN,
    SIGNATURE_LEN,
};

use super::V4;

impl Primitives for V4 {
    fn keyed_hash(
        key: &[u8],
        message: impl FnOnce(&mut dyn WriteBytes),
        out: &mut [u8],
    ) -> Result<(), PasetoError> {
        V4::blake2b(key, message, out)
    }

    fn stream_xor(
        key: &[u8; CIPHER_KEY_LEN],
        nonce: &[u8; CIPHER_NONCE_LEN],
        buf: &mut [u8],
    ) -> Result<(), PasetoError> {
        V4::xchacha20(key, nonce, buf)
    }

    fn public_key(seed: &[u8; SEED_LEN]) -> Result<[u8; PUBLIC_KEY_LEN], PasetoError> {
        Ok(SigningKey::from_bytes(seed).verifying_key().to_bytes())
    }

    fn sign(
        secret_key: &[u8; SECRET_KEY_LEN],
        message: &[u8],
    ) -> Result<[u8; SIGNATURE_LEN], PasetoError> {
        // rejects a secret key whose public half does not match its seed
        let key = SigningKey::from_keypair_bytes(secret_key).map_err(|_| PasetoError::KeyInvalid)?;
        Ok(key.sign(message).to_bytes())
    }

    fn verify(
        public_key: &[u8; PUBLIC_KEY_LEN],
        message: &[u8],
        signature: &[u8; SIGNATURE_LEN],
    ) -> Result<(), PasetoError> {
        let key = VerifyingKey::from_bytes(public_key).map_err(|_| PasetoError::TokenInvalid)?;
        key.verify_strict(message, &Signature::from_bytes(signature))
            .map_err(|_| PasetoError::TokenInvalid)
    }
}
