//! Purposes, key kinds, and the magic tables that go with them.
//!
//! Only version 4 is implemented, so each table has exactly one row.

use core::fmt;
use core::str::FromStr;

use crate::PasetoError;

/// Header for PASETO v4 tokens
pub const HEADER: &str = "v4";
/// Header for PASERK v4 keys
pub const PASERK_HEADER: &str = "k4";

/// The token purpose: symmetric encryption or public signatures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Purpose {
    /// Marks tokens as encrypted
    Local,
    /// Marks tokens as signed
    Public,
}

impl Purpose {
    /// "local" or "public"
    pub const fn as_str(self) -> &'static str {
        match self {
            Purpose::Local => "local",
            Purpose::Public => "public",
        }
    }

    /// "v4.local." or "v4.public."
    pub const fn token_magic(self) -> &'static str {
        match self {
            Purpose::Local => "v4.local.",
            Purpose::Public => "v4.public.",
        }
    }

    /// The key kind that creates tokens of this purpose.
    pub const fn sealing_key(self) -> KeyKind {
        match self {
            Purpose::Local => KeyKind::Local,
            Purpose::Public => KeyKind::Secret,
        }
    }

    /// The key kind that opens tokens of this purpose.
    pub const fn unsealing_key(self) -> KeyKind {
        match self {
            Purpose::Local => KeyKind::Local,
            Purpose::Public => KeyKind::Public,
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Purpose {
    type Err = PasetoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Purpose::Local),
            "public" => Ok(Purpose::Public),
            _ => Err(PasetoError::PurposeInvalid),
        }
    }
}

/// The role a key plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyKind {
    /// A symmetric key used to encrypt and decrypt tokens.
    Local,
    /// An asymmetric key used to create token signatures.
    Secret,
    /// An asymmetric key used to validate token signatures.
    Public,
}

impl KeyKind {
    /// "local" or "secret" or "public"
    pub const fn as_str(self) -> &'static str {
        match self {
            KeyKind::Local => "local",
            KeyKind::Secret => "secret",
            KeyKind::Public => "public",
        }
    }

    /// "k4.local." or "k4.secret." or "k4.public."
    pub const fn magic(self) -> &'static str {
        match self {
            KeyKind::Local => "k4.local.",
            KeyKind::Secret => "k4.secret.",
            KeyKind::Public => "k4.public.",
        }
    }

    /// The exact length of the raw key material.
    pub const fn key_len(self) -> usize {
        match self {
            KeyKind::Local => 32,
            KeyKind::Secret => 64,
            KeyKind::Public => 32,
        }
    }

    pub const fn purpose(self) -> Purpose {
        match self {
            KeyKind::Local => Purpose::Local,
            KeyKind::Secret | KeyKind::Public => Purpose::Public,
        }
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyKind {
    type Err = PasetoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(KeyKind::Local),
            "secret" => Ok(KeyKind::Secret),
            "public" => Ok(KeyKind::Public),
            _ => Err(PasetoError::PurposeInvalid),
        }
    }
}
