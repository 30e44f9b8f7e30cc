//! Lenient deserialization helpers shared by the backend record models.
//!
//! Backend records are loosely typed: identifiers arrive as strings or
//! numbers, prices occasionally as numeric strings, timestamps in several
//! shapes, and `colors` as either an array or junk. These helpers absorb
//! that looseness so the transforms stay total — a malformed optional
//! field degrades to its safe default instead of failing the record.

use chrono::{DateTime, Utc};
use serde::de::{Deserializer, Error as DeError};
use serde::Deserialize;
use serde_json::Value;

/// Deserializes an identifier from a string or a number.
///
/// # Errors
///
/// Fails only when the field is absent or of a non-scalar type — identity
/// is the one thing a record must carry.
pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::String(s) if !s.is_empty() => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(DeError::custom(format!("invalid identifier: {other}"))),
    }
}

/// Deserializes an integer amount from a number or a numeric string,
/// defaulting to 0 on anything else.
pub fn lenient_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(lenient_int_from(&value))
}

fn lenient_int_from(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// Deserializes a non-negative quantity, clamping negatives to 0.
pub fn lenient_quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(u32::try_from(lenient_int_from(&value).max(0)).unwrap_or(u32::MAX))
}

/// Deserializes `colors`: an array of strings stays a list, anything else
/// (absent, null, scalar junk) becomes `None`.
pub fn colors<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(None);
    };
    Ok(Some(
        items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
    ))
}

/// Deserializes a timestamp leniently: an RFC 3339 string parses, anything
/// else reads as `None`.
pub fn lenient_datetime<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let Value::String(raw) = value else {
        return Ok(None);
    };
    Ok(DateTime::parse_from_rfc3339(&raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .ok())
}

/// The `true` default for `isActive`-style flags.
pub const fn default_true() -> bool {
    true
}

/// The quantity default for order/cart lines.
pub const fn default_quantity() -> u32 {
    1
}
