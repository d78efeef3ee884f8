//! Decoding helpers that swap missing or malformed values for defaults.

use serde::Deserialize;
use serde::de::{DeserializeOwned, Deserializer};
use serde_json::Value;

/// Decode a field, falling back to `T::default()` when the value has the
/// wrong shape.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(from_value_or_default(&value))
}

/// Decode an identifier that may arrive as a JSON string or number.
pub(crate) fn identifier<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(identifier_from_value(&value))
}

/// Decode a non-negative count, saturating at `u64::MAX`.
pub(crate) fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(count_from_value(&value))
}

/// `2^64`, the first float no `u64` can hold.
const COUNT_OVERFLOW: f64 = 18_446_744_073_709_551_616.0;

/// Read a count from `value`.
///
/// Integers beyond `u64::MAX` (which JSON parsing surfaces as floats)
/// saturate; negative, fractional, or non-numeric values become `0`.
pub(crate) fn count_from_value(value: &Value) -> u64 {
    let Value::Number(number) = value else {
        return 0;
    };
    number.as_u64().unwrap_or_else(|| match number.as_f64() {
        Some(float) if float >= COUNT_OVERFLOW => u64::MAX,
        _ => 0,
    })
}

pub(crate) fn from_value_or_default<T>(value: &Value) -> T
where
    T: DeserializeOwned + Default,
{
    T::deserialize(value).unwrap_or_default()
}

pub(crate) fn identifier_from_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        _ => String::new(),
    }
}
