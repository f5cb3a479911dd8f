use rand_core::TryCryptoRng;
use zeroize::Zeroizing;

use super::{KeyData, KeyFormat, KeyPair, RawKey};
use crate::PasetoError;
use crate::primitives::{Primitives, SECRET_KEY_LEN, SEED_LEN};
use crate::version::{KeyKind, Purpose};

/// Freshly generated keys in their serialized form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GeneratedKeys {
    /// A symmetric key, for `local` tokens.
    Local(KeyData),
    /// A signing key pair, for `public` tokens.
    Public {
        secret_key: KeyData,
        public_key: KeyData,
    },
}

/// Generate a random local key.
pub fn generate_local_key(mut rng: impl TryCryptoRng) -> Result<RawKey, PasetoError> {
    let mut bytes = Zeroizing::new([0u8; 32]);
    rng.try_fill_bytes(&mut bytes[..])
        .map_err(|_| PasetoError::Crypto)?;
    RawKey::new(KeyKind::Local, &bytes[..])
}

/// Generate a random signing key pair.
pub fn generate_key_pair<P: Primitives>(
    mut rng: impl TryCryptoRng,
) -> Result<KeyPair, PasetoError> {
    let mut seed = Zeroizing::new([0u8; SEED_LEN]);
    rng.try_fill_bytes(&mut seed[..])
        .map_err(|_| PasetoError::Crypto)?;

    let public_key = P::public_key(&seed)?;

    let mut secret_key = Zeroizing::new([0u8; SECRET_KEY_LEN]);
    secret_key[..SEED_LEN].copy_from_slice(&seed[..]);
    secret_key[SEED_LEN..].copy_from_slice(&public_key);

    KeyPair::new(
        RawKey::new(KeyKind::Secret, &secret_key[..])?,
        RawKey::new(KeyKind::Public, &public_key)?,
    )
}

/// Generate keys for `purpose` and serialize them as `format`.
pub fn generate_keys<P: Primitives>(
    purpose: Purpose,
    format: KeyFormat,
    rng: impl TryCryptoRng,
) -> Result<GeneratedKeys, PasetoError> {
    match purpose {
        Purpose::Local => {
            let key = generate_local_key(rng)?;
            Ok(GeneratedKeys::Local(key.serialize(format)))
        }
        Purpose::Public => {
            let pair = generate_key_pair::<P>(rng)?;
            Ok(GeneratedKeys::Public {
                secret_key: pair.secret_key.serialize(format),
                public_key: pair.public_key.serialize(format),
            })
        }
    }
}
