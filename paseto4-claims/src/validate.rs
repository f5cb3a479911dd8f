use jiff::{SignedDuration, Timestamp};
use paseto4_core::PasetoError;
use serde_json::{Map, Value};

use crate::guard::{SizeLimits, assert_size_bounds};
use crate::time::{format_time, parse_absolute_time_value, parse_duration, parse_time_value};
use crate::{Claims, Input};

/// How far after "now" an automatically added `exp` claim lies.
pub const DEFAULT_EXPIRATION: SignedDuration = SignedDuration::from_hours(1);

const STRING_CLAIMS: [&str; 4] = ["iss", "sub", "aud", "jti"];
const FOOTER_STRING_CLAIMS: [&str; 2] = ["kid", "wpk"];

/// Options for [`validate_payload`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PayloadOptions {
    /// Set `iat` to now if it is missing.
    pub add_iat: bool,
    /// Set `exp` to now plus [`DEFAULT_EXPIRATION`] if it is missing.
    pub add_exp: bool,
    /// The current time. Defaults to the system clock.
    pub now: Option<Timestamp>,
}

impl Default for PayloadOptions {
    fn default() -> Self {
        Self {
            add_iat: true,
            add_exp: true,
            now: None,
        }
    }
}

impl PayloadOptions {
    /// Only check the claims that are present.
    pub fn check_only(now: Option<Timestamp>) -> Self {
        Self {
            add_iat: false,
            add_exp: false,
            now,
        }
    }
}

fn payload_invalid(reason: impl Into<String>) -> PasetoError {
    PasetoError::PayloadInvalid(reason.into())
}

fn parse_object(value: Value) -> Result<Map<String, Value>, PasetoError> {
    match value {
        Value::Object(map) => Ok(map),
        Value::String(s) => match serde_json::from_str(&s) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(payload_invalid("payload must be a JSON object")),
            Err(e) => Err(payload_invalid(e.to_string())),
        },
        _ => Err(payload_invalid("payload must be a JSON object")),
    }
}

fn parse_value(input: Input) -> Result<Value, PasetoError> {
    match input {
        Input::Text(s) => serde_json::from_str(&s).map_err(|e| payload_invalid(e.to_string())),
        Input::Bytes(b) => serde_json::from_slice(&b).map_err(|e| payload_invalid(e.to_string())),
        Input::Json(v) => Ok(v),
    }
}

fn check_claim_types(map: &Map<String, Value>) -> Result<(), PasetoError> {
    for name in STRING_CLAIMS {
        if let Some(v) = map.get(name)
            && !v.is_string()
        {
            return Err(PasetoError::ClaimInvalid(format!("{name} must be a string")));
        }
    }
    if let Some(iat) = map.get("iat")
        && !iat.is_string()
    {
        return Err(PasetoError::ClaimInvalid("iat must be a string".into()));
    }
    Ok(())
}

/// Normalize a payload into validated [`Claims`].
///
/// The payload must be a JSON object, or text or bytes holding one.
/// `iss`, `sub`, `aud` and `jti` must be strings. `iat`, `nbf` and `exp` must
/// resolve to points in time, with `iat <= nbf <= exp`, `iat` and `nbf` not in
/// the future and `exp` not in the past. `iat` must be a string; `nbf` and
/// `exp` may also be epoch milliseconds. Relative durations such as `"2 hours"`
/// are rewritten to the timestamp they resolve to. Other claims pass through untouched.
pub fn validate_payload(
    input: impl Into<Input>,
    options: &PayloadOptions,
) -> Result<Claims, PasetoError> {
    let mut map = parse_object(parse_value(input.into())?)?;
    check_claim_types(&map)?;

    let now = options.now.unwrap_or_else(Timestamp::now);
    let iat = resolve_time(&mut map, "iat", now)?;
    let nbf = resolve_time(&mut map, "nbf", now)?;
    let exp = resolve_time(&mut map, "exp", now)?;
    check_times(iat, nbf, exp, now)?;

    if options.add_iat && iat.is_none() {
        map.insert("iat".into(), Value::String(format_time(now)));
    }
    if options.add_exp && exp.is_none() {
        let exp = now
            .checked_add(DEFAULT_EXPIRATION)
            .map_err(|e| PasetoError::ClaimInvalid(format!("exp: {e}")))?;
        map.insert("exp".into(), Value::String(format_time(exp)));
    }

    Ok(Claims::from(map))
}

fn resolve_time(
    map: &mut Map<String, Value>,
    name: &str,
    now: Timestamp,
) -> Result<Option<Timestamp>, PasetoError> {
    let Some(value) = map.get_mut(name) else {
        return Ok(None);
    };
    let ts = parse_time_value(value, now)
        .map_err(|e| PasetoError::ClaimInvalid(format!("{name}: {e}")))?;

    if let Value::String(s) = value
        && parse_duration(s).is_some()
    {
        *value = Value::String(format_time(ts));
    }
    Ok(Some(ts))
}

fn absolute_time(map: &Map<String, Value>, name: &str) -> Result<Option<Timestamp>, PasetoError> {
    map.get(name)
        .map(|value| {
            parse_absolute_time_value(value)
                .map_err(|e| PasetoError::ClaimInvalid(format!("{name}: {e}")))
        })
        .transpose()
}

fn check_times(
    iat: Option<Timestamp>,
    nbf: Option<Timestamp>,
    exp: Option<Timestamp>,
    now: Timestamp,
) -> Result<(), PasetoError> {
    check_order(("exp", exp), ("nbf", nbf))?;
    check_order(("exp", exp), ("iat", iat))?;
    check_order(("nbf", nbf), ("iat", iat))?;

    if let Some(iat) = iat
        && iat > now
    {
        return Err(PasetoError::ClaimInvalid("iat is in the future".into()));
    }
    if let Some(nbf) = nbf
        && nbf > now
    {
        return Err(PasetoError::ClaimInvalid("token is not yet valid".into()));
    }
    if let Some(exp) = exp
        && exp < now
    {
        return Err(PasetoError::ClaimInvalid("token has expired".into()));
    }
    Ok(())
}

fn check_order(
    (later, later_ts): (&str, Option<Timestamp>),
    (earlier, earlier_ts): (&str, Option<Timestamp>),
) -> Result<(), PasetoError> {
    match (later_ts, earlier_ts) {
        (Some(l), Some(e)) if l < e => Err(PasetoError::ClaimInvalid(format!(
            "{later} must not be before {earlier}"
        ))),
        _ => Ok(()),
    }
}

fn check_footer_claims(map: &Map<String, Value>) -> Result<(), PasetoError> {
    for name in FOOTER_STRING_CLAIMS {
        if let Some(v) = map.get(name)
            && !v.is_string()
        {
            return Err(PasetoError::ClaimInvalid(format!("{name} must be a string")));
        }
    }
    Ok(())
}

fn check_footer_json(bytes: &[u8]) -> Result<(), PasetoError> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => check_footer_claims(&map),
        _ => Ok(()),
    }
}

/// Normalize a footer to the bytes that will be sealed into the token.
///
/// Footers that hold a JSON object must keep `kid` and `wpk` as strings.
/// Text and bytes that are not JSON are opaque and pass through unchanged.
pub fn validate_footer(input: impl Into<Input>) -> Result<Vec<u8>, PasetoError> {
    match input.into() {
        Input::Text(s) | Input::Json(Value::String(s)) => {
            check_footer_json(s.as_bytes())?;
            Ok(s.into_bytes())
        }
        Input::Bytes(b) => {
            check_footer_json(&b)?;
            Ok(b)
        }
        Input::Json(Value::Object(map)) => {
            check_footer_claims(&map)?;
            serde_json::to_vec(&map).map_err(|e| PasetoError::TypeInvalid(e.to_string()))
        }
        Input::Json(_) => Err(PasetoError::TypeInvalid(
            "footer must be text, bytes or a JSON object".into(),
        )),
    }
}

/// Normalize an implicit assertion to bytes. Objects are serialized as JSON.
pub fn validate_assertion(input: impl Into<Input>) -> Result<Vec<u8>, PasetoError> {
    match input.into() {
        Input::Text(s) | Input::Json(Value::String(s)) => Ok(s.into_bytes()),
        Input::Bytes(b) => Ok(b),
        Input::Json(Value::Object(map)) => {
            serde_json::to_vec(&map).map_err(|e| PasetoError::TypeInvalid(e.to_string()))
        }
        Input::Json(_) => Err(PasetoError::TypeInvalid(
            "assertion must be text, bytes or a JSON object".into(),
        )),
    }
}

/// Parse and check the plaintext of an opened token.
///
/// The text is bounded by `limits` before it is parsed. Time claims must be
/// absolute, an RFC 3339 string or epoch milliseconds, and are checked against
/// `now`. The claims are returned exactly as they were authenticated.
pub fn decode_payload(
    payload: &[u8],
    limits: &SizeLimits,
    now: Option<Timestamp>,
) -> Result<Claims, PasetoError> {
    let text = core::str::from_utf8(payload)
        .map_err(|_| payload_invalid("payload is not valid UTF-8"))?;
    assert_size_bounds(text, limits)?;

    let map = match serde_json::from_str(text) {
        Ok(Value::Object(map)) => map,
        Ok(_) => return Err(payload_invalid("payload must be a JSON object")),
        Err(e) => return Err(payload_invalid(e.to_string())),
    };
    check_claim_types(&map)?;

    let now = now.unwrap_or_else(Timestamp::now);
    let iat = absolute_time(&map, "iat")?;
    let nbf = absolute_time(&map, "nbf")?;
    let exp = absolute_time(&map, "exp")?;
    check_times(iat, nbf, exp, now)?;

    Ok(Claims::from(map))
}

/// Parse a footer as a JSON object with string `kid` and `wpk` claims, if present.
pub fn parse_footer_claims(
    footer: &[u8],
    limits: &SizeLimits,
) -> Result<Map<String, Value>, PasetoError> {
    let text = core::str::from_utf8(footer)
        .map_err(|_| payload_invalid("footer is not valid UTF-8"))?;
    assert_size_bounds(text, limits)?;
    match serde_json::from_str(text) {
        Ok(Value::Object(map)) => {
            check_footer_claims(&map)?;
            Ok(map)
        }
        Ok(_) => Err(payload_invalid("footer must be a JSON object")),
        Err(e) => Err(payload_invalid(e.to_string())),
    }
}
