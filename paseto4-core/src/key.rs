//! Raw key material and its PASERK encodings.
//!
//! Keys travel in one of two forms:
//! * `paserk` - the magic string followed by the base64url key, eg `k4.local.xqT1...`
//! * `buffer` - the magic string as ASCII bytes followed directly by the raw key
//!
//! Both forms must carry the magic prefix. Raw key bytes on their own are never
//! accepted, even if they happen to be the right length.

use core::fmt;
use core::str::FromStr;

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::primitives::{Primitives, SEED_LEN};
use crate::version::KeyKind;
use crate::{PasetoError, base64};

mod generate;

pub use generate::{GeneratedKeys, generate_key_pair, generate_keys, generate_local_key};

/// Key material of the exact length its [`KeyKind`] requires.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct RawKey {
    #[zeroize(skip)]
    kind: KeyKind,
    bytes: Vec<u8>,
}

impl RawKey {
    /// Wrap raw key bytes, checking the length for `kind`.
    pub fn new(kind: KeyKind, bytes: &[u8]) -> Result<Self, PasetoError> {
        if bytes.len() != kind.key_len() {
            return Err(PasetoError::KeyInvalid);
        }
        Ok(Self {
            kind,
            bytes: bytes.to_vec(),
        })
    }

    pub fn kind(&self) -> KeyKind {
        self.kind
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Parse key data, requiring the magic prefix for `kind`.
    pub fn parse(kind: KeyKind, data: impl Into<KeyData>) -> Result<Self, PasetoError> {
        parse_key_data(kind, data)
    }

    /// Encode the key in the given format.
    pub fn serialize(&self, format: KeyFormat) -> KeyData {
        serialize_key(self, format)
    }

    /// Encode the key as a PASERK string.
    pub fn to_paserk(&self) -> String {
        let mut s = String::from(self.kind.magic());
        s.push_str(&base64::encode(&self.bytes));
        s
    }

    /// Fails with [`PasetoError::KeyInvalid`] unless this key is of `kind`.
    pub fn expect_kind(&self, kind: KeyKind) -> Result<&Self, PasetoError> {
        if self.kind == kind {
            Ok(self)
        } else {
            Err(PasetoError::KeyInvalid)
        }
    }
}

impl PartialEq for RawKey {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && bool::from(self.bytes.as_slice().ct_eq(&other.bytes))
    }
}

impl Eq for RawKey {}

impl fmt::Debug for RawKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawKey")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// A secret key together with its public key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPair {
    pub secret_key: RawKey,
    pub public_key: RawKey,
}

impl KeyPair {
    /// Pair up two keys, checking their kinds.
    pub fn new(secret_key: RawKey, public_key: RawKey) -> Result<Self, PasetoError> {
        secret_key.expect_kind(KeyKind::Secret)?;
        public_key.expect_kind(KeyKind::Public)?;
        Ok(Self {
            secret_key,
            public_key,
        })
    }

    /// Derive the public key belonging to a secret key.
    ///
    /// The secret key embeds its public key after the seed. The embedded copy
    /// must match the one derived from the seed.
    pub fn from_secret<P: Primitives>(secret_key: RawKey) -> Result<Self, PasetoError> {
        secret_key.expect_kind(KeyKind::Secret)?;
        let (seed, embedded) = secret_key.as_bytes().split_at(SEED_LEN);
        let seed: &[u8; SEED_LEN] = seed.try_into().map_err(|_| PasetoError::KeyInvalid)?;

        let derived = P::public_key(seed)?;
        if !bool::from(derived.as_slice().ct_eq(embedded)) {
            return Err(PasetoError::KeyInvalid);
        }

        let public_key = RawKey::new(KeyKind::Public, &derived)?;
        Ok(Self {
            secret_key,
            public_key,
        })
    }
}

/// Which wire form to serialize a key into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyFormat {
    /// `<magic><base64url(key)>`
    #[default]
    Paserk,
    /// `<magic bytes><key bytes>`
    Buffer,
}

impl FromStr for KeyFormat {
    type Err = PasetoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paserk" => Ok(KeyFormat::Paserk),
            "buffer" => Ok(KeyFormat::Buffer),
            _ => Err(PasetoError::FormatInvalid),
        }
    }
}

/// Serialized key material, in either wire form.
///
/// The contents are wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub enum KeyData {
    Paserk(String),
    Buffer(Vec<u8>),
}

impl KeyData {
    pub fn format(&self) -> KeyFormat {
        match self {
            KeyData::Paserk(_) => KeyFormat::Paserk,
            KeyData::Buffer(_) => KeyFormat::Buffer,
        }
    }

    pub fn as_paserk(&self) -> Option<&str> {
        match self {
            KeyData::Paserk(s) => Some(s),
            KeyData::Buffer(_) => None,
        }
    }

    pub fn as_buffer(&self) -> Option<&[u8]> {
        match self {
            KeyData::Paserk(_) => None,
            KeyData::Buffer(b) => Some(b),
        }
    }

    /// The serialized bytes, whichever the form.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            KeyData::Paserk(s) => s.as_bytes(),
            KeyData::Buffer(b) => b,
        }
    }

    fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

impl Drop for KeyData {
    fn drop(&mut self) {
        match self {
            KeyData::Paserk(s) => s.zeroize(),
            KeyData::Buffer(b) => b.zeroize(),
        }
    }
}

impl fmt::Debug for KeyData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyData::Paserk(_) => f.write_str("KeyData::Paserk(..)"),
            KeyData::Buffer(_) => f.write_str("KeyData::Buffer(..)"),
        }
    }
}

impl From<&str> for KeyData {
    fn from(s: &str) -> Self {
        KeyData::Paserk(s.to_owned())
    }
}

impl From<String> for KeyData {
    fn from(s: String) -> Self {
        KeyData::Paserk(s)
    }
}

impl From<&String> for KeyData {
    fn from(s: &String) -> Self {
        KeyData::Paserk(s.clone())
    }
}

impl From<&[u8]> for KeyData {
    fn from(b: &[u8]) -> Self {
        KeyData::Buffer(b.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for KeyData {
    fn from(b: &[u8; N]) -> Self {
        KeyData::Buffer(b.to_vec())
    }
}

impl From<Vec<u8>> for KeyData {
    fn from(b: Vec<u8>) -> Self {
        KeyData::Buffer(b)
    }
}

impl From<&KeyData> for KeyData {
    fn from(k: &KeyData) -> Self {
        k.clone()
    }
}

impl From<&RawKey> for KeyData {
    fn from(key: &RawKey) -> Self {
        KeyData::Paserk(key.to_paserk())
    }
}

/// Parse key data for `kind`.
///
/// Fails with [`PasetoError::TypeInvalid`] if the data is empty, and with
/// [`PasetoError::KeyInvalid`] if the magic prefix is missing or wrong, or the
/// key has the wrong length.
pub fn parse_key_data(kind: KeyKind, data: impl Into<KeyData>) -> Result<RawKey, PasetoError> {
    let data = data.into();
    if data.is_empty() {
        return Err(PasetoError::TypeInvalid("key data is missing".into()));
    }

    let magic = kind.magic();
    match &data {
        KeyData::Paserk(s) => {
            let encoded = s.strip_prefix(magic).ok_or(PasetoError::KeyInvalid)?;
            let mut bytes = base64::decode(encoded).map_err(|_| PasetoError::KeyInvalid)?;
            let key = RawKey::new(kind, &bytes);
            bytes.zeroize();
            key
        }
        KeyData::Buffer(b) => {
            let bytes = b
                .strip_prefix(magic.as_bytes())
                .ok_or(PasetoError::KeyInvalid)?;
            RawKey::new(kind, bytes)
        }
    }
}

/// Serialize a key. The exact inverse of [`parse_key_data`].
pub fn serialize_key(key: &RawKey, format: KeyFormat) -> KeyData {
    match format {
        KeyFormat::Paserk => KeyData::Paserk(key.to_paserk()),
        KeyFormat::Buffer => {
            let magic = key.kind.magic().as_bytes();
            let mut buf = Vec::with_capacity(magic.len() + key.bytes.len());
            buf.extend_from_slice(magic);
            buf.extend_from_slice(&key.bytes);
            KeyData::Buffer(buf)
        }
    }
}
