use jiff::Timestamp;
use paseto4_core::PasetoError;
use serde_json::{Map, Value};

use crate::time::{format_time, parse_absolute_time_value};

/// A validated JSON claims object.
///
/// Key order is preserved, so a payload serializes back to the bytes it was
/// built from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Claims(Map<String, Value>);

impl Claims {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn str_claim(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    /// Relative durations are not points in time, so they read as `None`.
    fn time_claim(&self, name: &str) -> Option<Timestamp> {
        self.0
            .get(name)
            .and_then(|v| parse_absolute_time_value(v).ok())
    }

    pub fn subject(&self) -> Option<&str> {
        self.str_claim("sub")
    }

    pub fn issuer(&self) -> Option<&str> {
        self.str_claim("iss")
    }

    pub fn audience(&self) -> Option<&str> {
        self.str_claim("aud")
    }

    pub fn token_id(&self) -> Option<&str> {
        self.str_claim("jti")
    }

    pub fn issued_at(&self) -> Option<Timestamp> {
        self.time_claim("iat")
    }

    pub fn not_before(&self) -> Option<Timestamp> {
        self.time_claim("nbf")
    }

    pub fn expiration(&self) -> Option<Timestamp> {
        self.time_claim("exp")
    }

    /// Set an arbitrary claim. Registered claims are checked when the payload is sealed.
    pub fn with_claim(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn for_subject(self, sub: impl Into<String>) -> Self {
        self.with_claim("sub", Value::String(sub.into()))
    }

    pub fn from_issuer(self, iss: impl Into<String>) -> Self {
        self.with_claim("iss", Value::String(iss.into()))
    }

    pub fn for_audience(self, aud: impl Into<String>) -> Self {
        self.with_claim("aud", Value::String(aud.into()))
    }

    pub fn with_token_id(self, jti: impl Into<String>) -> Self {
        self.with_claim("jti", Value::String(jti.into()))
    }

    pub fn expires_at(self, exp: Timestamp) -> Self {
        self.with_claim("exp", format_time(exp))
    }

    pub fn valid_from(self, nbf: Timestamp) -> Self {
        self.with_claim("nbf", format_time(nbf))
    }

    pub fn issued_at_time(self, iat: Timestamp) -> Self {
        self.with_claim("iat", format_time(iat))
    }

    /// Serialize the claims to JSON bytes, in insertion order.
    pub fn to_vec(&self) -> Result<Vec<u8>, PasetoError> {
        serde_json::to_vec(&self.0).map_err(|e| PasetoError::PayloadInvalid(e.to_string()))
    }
}

impl From<Map<String, Value>> for Claims {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Claims {
    type Error = PasetoError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(PasetoError::PayloadInvalid(
                "payload must be a JSON object".into(),
            )),
        }
    }
}
