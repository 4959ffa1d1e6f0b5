//! Data models for the skills console.
//!
//! Records arriving from the organization API are deserialized once into these
//! types. Missing or `null` collections and strings collapse to empty values so
//! the rest of the crate never has to inspect optional shapes. Per-skill fields that arrive in the
//! wrong shape degrade to `None` instead of failing the whole collection.

mod catalog;
mod employee;
mod organization;

pub use catalog::*;
pub use employee::*;
pub use organization::*;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub(crate) fn default_active() -> bool {
    true
}

/// Deserialize a value that may be `null` into its default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize a loosely formatted date, yielding `None` for blank or unparseable input.
pub(crate) fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(raw)) => parse_date(&raw),
        _ => None,
    })
}

/// Deserialize a rating that may arrive as an integer, a float or a numeric
/// string. Fractions round to the nearest whole point; anything else is `None`.
pub(crate) fn lenient_rating<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_f64(Option::<Value>::deserialize(deserializer)?)
        .filter(|n| n.abs() <= f64::from(i32::MAX))
        .map(|n| n.round() as i32))
}

/// Deserialize a number that may arrive as a string, yielding `None` otherwise.
pub(crate) fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_f64(Option::<Value>::deserialize(deserializer)?))
}

/// Deserialize free text, yielding `None` for anything that is not a string.
pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text),
        _ => None,
    })
}

fn lenient_f64(value: Option<Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

/// Deserialize a date supplied by a console client: blank means absent,
/// anything else must parse.
pub(crate) fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse_date(&raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid date: {raw}"))),
    }
}

/// Parse `YYYY-MM-DD`, a naive timestamp, or an RFC 3339 timestamp into a date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}
