use jiff::Timestamp;
use paseto4_claims::{Input, PayloadOptions, SizeLimits};

/// Options for sealing a token: [`encrypt`](crate::local::encrypt) and [`sign`](crate::public::sign).
#[derive(Clone, Debug, PartialEq)]
pub struct SealOptions {
    /// Authenticated but unencrypted data appended to the token.
    pub footer: Option<Input>,
    /// Authenticated data that is not part of the token and must be supplied again to open it.
    pub assertion: Option<Input>,
    /// Add an `iat` claim if the payload has none.
    pub add_iat: bool,
    /// Add an `exp` claim one hour out if the payload has none.
    pub add_exp: bool,
    /// The current time. Defaults to the system clock.
    pub now: Option<Timestamp>,
}

pub type EncryptOptions = SealOptions;
pub type SignOptions = SealOptions;

impl Default for SealOptions {
    fn default() -> Self {
        Self {
            footer: None,
            assertion: None,
            add_iat: true,
            add_exp: true,
            now: None,
        }
    }
}

impl SealOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_footer(mut self, footer: impl Into<Input>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn with_assertion(mut self, assertion: impl Into<Input>) -> Self {
        self.assertion = Some(assertion.into());
        self
    }

    pub fn add_iat(mut self, add_iat: bool) -> Self {
        self.add_iat = add_iat;
        self
    }

    pub fn add_exp(mut self, add_exp: bool) -> Self {
        self.add_exp = add_exp;
        self
    }

    pub fn valid_at(mut self, now: Timestamp) -> Self {
        self.now = Some(now);
        self
    }

    pub(crate) fn payload_options(&self) -> PayloadOptions {
        PayloadOptions {
            add_iat: self.add_iat,
            add_exp: self.add_exp,
            now: self.now,
        }
    }
}

/// Options for opening a token: [`decrypt`](crate::local::decrypt) and [`verify`](crate::public::verify).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OpenOptions {
    /// The implicit assertion the token was sealed with.
    pub assertion: Option<Input>,
    /// Bounds on the decoded payload before it is parsed.
    pub limits: SizeLimits,
    /// The time to check `exp`, `nbf` and `iat` against. Defaults to the system clock.
    pub now: Option<Timestamp>,
}

pub type DecryptOptions = OpenOptions;
pub type VerifyOptions = OpenOptions;

impl OpenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_assertion(mut self, assertion: impl Into<Input>) -> Self {
        self.assertion = Some(assertion.into());
        self
    }

    pub fn with_limits(mut self, limits: SizeLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn valid_at(mut self, now: Timestamp) -> Self {
        self.now = Some(now);
        self
    }
}
