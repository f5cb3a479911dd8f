//! Resolving claim values to points in time.
//!
//! Accepted forms:
//! * RFC 3339 timestamps, `2023-01-09T15:34:46.865Z`. Civil date-times and bare
//!   dates without an offset are read as UTC.
//! * Durations relative to now, `1 hour`, `2days`, `1w`.
//! * Milliseconds since the Unix epoch.

use jiff::civil::{Date, DateTime};
use jiff::tz::TimeZone;
use jiff::{SignedDuration, Timestamp};
use paseto4_core::PasetoError;
use serde_json::Value;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Something that can be resolved to a [`Timestamp`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeInput<'a> {
    Text(&'a str),
    Millis(i64),
    Timestamp(Timestamp),
}

/// Resolve `input` to a point in time. Durations are added to `now`.
pub fn parse_time(input: TimeInput<'_>, now: Timestamp) -> Result<Timestamp, PasetoError> {
    match input {
        TimeInput::Timestamp(ts) => Ok(ts),
        TimeInput::Millis(ms) => Timestamp::from_millisecond(ms)
            .map_err(|_| PasetoError::TimeInvalid(format!("{ms} is out of range"))),
        TimeInput::Text(s) => parse_time_str(s, now),
    }
}

/// Resolve a JSON claim value: strings are parsed, numbers are epoch milliseconds.
pub fn parse_time_value(value: &Value, now: Timestamp) -> Result<Timestamp, PasetoError> {
    match value {
        Value::String(s) => parse_time(TimeInput::Text(s), now),
        Value::Number(n) => parse_time(TimeInput::Millis(number_millis(n)?), now),
        _ => Err(PasetoError::TimeInvalid(
            "expected a string or a number".into(),
        )),
    }
}

/// Resolve a JSON claim value that must already name a point in time.
///
/// Durations are rejected, since there is no meaningful "now" to add them to.
pub fn parse_absolute_time_value(value: &Value) -> Result<Timestamp, PasetoError> {
    match value {
        Value::String(s) => parse_absolute(s.trim()).ok_or_else(|| {
            PasetoError::TimeInvalid(format!("{s:?} is not an absolute time"))
        }),
        Value::Number(n) => {
            parse_time(TimeInput::Millis(number_millis(n)?), Timestamp::UNIX_EPOCH)
        }
        _ => Err(PasetoError::TimeInvalid(
            "expected a string or a number".into(),
        )),
    }
}

fn number_millis(n: &serde_json::Number) -> Result<i64, PasetoError> {
    match n.as_i64() {
        Some(ms) => Ok(ms),
        None => match n.as_f64() {
            Some(f) if f.is_finite() => Ok(f.trunc() as i64),
            _ => Err(PasetoError::TimeInvalid(format!("{n} is out of range"))),
        },
    }
}

fn parse_time_str(s: &str, now: Timestamp) -> Result<Timestamp, PasetoError> {
    let s = s.trim();
    if let Some(ts) = parse_absolute(s) {
        return Ok(ts);
    }
    if let Some(duration) = parse_duration(s) {
        return now
            .checked_add(duration)
            .map_err(|_| PasetoError::TimeInvalid(format!("{s:?} is out of range")));
    }
    Err(PasetoError::TimeInvalid(format!("cannot parse {s:?}")))
}

fn parse_absolute(s: &str) -> Option<Timestamp> {
    s.parse::<Timestamp>().ok().or_else(|| parse_civil(s))
}

fn parse_civil(s: &str) -> Option<Timestamp> {
    let zoned = match s.parse::<DateTime>() {
        Ok(dt) => dt.to_zoned(TimeZone::UTC).ok()?,
        Err(_) => s.parse::<Date>().ok()?.to_zoned(TimeZone::UTC).ok()?,
    };
    Some(zoned.timestamp())
}

/// Parse a duration expression such as `1 hour`, `30min` or `2 weeks`.
///
/// Months are 30 days and years are 365 days.
pub fn parse_duration(s: &str) -> Option<SignedDuration> {
    let s = s.trim();
    let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    if split == 0 {
        return None;
    }
    let n: i64 = s[..split].parse().ok()?;

    let unit = match s[split..].trim_start().to_ascii_lowercase().as_str() {
        "s" | "sec" | "secs" | "second" | "seconds" => 1,
        "m" | "min" | "mins" | "minute" | "minutes" => MINUTE,
        "h" | "hr" | "hrs" | "hour" | "hours" => HOUR,
        "d" | "day" | "days" => DAY,
        "w" | "wk" | "wks" | "week" | "weeks" => 7 * DAY,
        "mo" | "mos" | "month" | "months" => 30 * DAY,
        "y" | "yr" | "yrs" | "year" | "years" => 365 * DAY,
        _ => return None,
    };

    n.checked_mul(unit).map(SignedDuration::from_secs)
}

/// Format a timestamp the way auto-generated claims are written: RFC 3339,
/// UTC, millisecond precision.
pub fn format_time(ts: Timestamp) -> String {
    format!("{ts:.3}")
}
