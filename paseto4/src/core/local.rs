use blake2::Blake2bMac;
use chacha20::XChaCha20;
use cipher::{KeyIvInit, StreamCipher};
use digest::consts::{U32, U56};
use digest::{KeyInit, Mac};
use paseto4_core::PasetoError;
use paseto4_core::pae::WriteBytes;
use paseto4_core::primitives::{CIPHER_KEY_LEN, CIPHER_NONCE_LEN};

use super::V4;

struct MacWriter<'a, M: Mac>(&'a mut M);

impl<M: Mac> WriteBytes for MacWriter<'_, M> {
    fn write(&mut self, slice: &[u8]) {
        Mac::update(self.0, slice);
    }
}

fn keyed_hash_into<M: Mac + KeyInit>(
    key: &[u8],
    message: impl FnOnce(&mut dyn WriteBytes),
    out: &mut [u8],
) -> Result<(), PasetoError> {
    let mut mac = <M as Mac>::new_from_slice(key).map_err(|_| PasetoError::Crypto)?;
    message(&mut MacWriter(&mut mac));
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(())
}

impl V4 {
    pub(super) fn blake2b(
        key: &[u8],
        message: impl FnOnce(&mut dyn WriteBytes),
        out: &mut [u8],
    ) -> Result<(), PasetoError> {
        match out.len() {
            32 => keyed_hash_into::<Blake2bMac<U32>>(key, message, out),
            56 => keyed_hash_into::<Blake2bMac<U56>>(key, message, out),
            _ => Err(PasetoError::Crypto),
        }
    }

    pub(super) fn xchacha20(
        key: &[u8; CIPHER_KEY_LEN],
        nonce: &[u8; CIPHER_NONCE_LEN],
        buf: &mut [u8],
    ) -> Result<(), PasetoError> {
        let mut cipher = XChaCha20::new(
            chacha20::Key::from_slice(key),
            chacha20::XNonce::from_slice(nonce),
        );
        cipher
            .try_apply_keystream(buf)
            .map_err(|_| PasetoError::Crypto)
    }
}
