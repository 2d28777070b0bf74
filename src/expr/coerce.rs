//! Canonical coercions shared by the expression kinds.

use crate::types::{TypeRegistry, Value, ValueType};

/// Normalize a loosely-typed value into a number.
///
/// Precedence, first match wins:
/// 1. `Int` / `Float` convert directly.
/// 2. `String` parses as a number, or else yields its character count.
/// 3. `List` yields its element count.
/// 4. `Enum` yields its underlying integer.
///
/// Strings are enumerable, but they are consumed by step 2 and never counted
/// as a collection, so `"12"` is `12.0`, not `2.0`.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn try_retrieve_number(value: &Value) -> Option<f64> {
    match value {
        Value::Int(v) => Some(*v as f64),
        Value::Float(v) => Some(*v),
        Value::String(s) => Some(parse_number(s).unwrap_or_else(|| s.chars().count() as f64)),
        Value::List(items) => Some(items.len() as f64),
        Value::Enum(e) => Some(e.value as f64),
        _ => None,
    }
}

/// Resolve a type descriptor: a `Type` value as-is, or a type name looked up in
/// `types`. No other fallback.
#[must_use]
pub fn try_retrieve_type(value: &Value, types: &TypeRegistry) -> Option<ValueType> {
    match value {
        Value::Type(t) => Some(t.clone()),
        Value::String(name) => types.resolve(name.trim()),
        _ => None,
    }
}

/// Element count of a collection-like value: list length or string character count.
#[must_use]
pub fn collection_count(value: &Value) -> Option<usize> {
    match value {
        Value::List(items) => Some(items.len()),
        Value::String(s) => Some(s.chars().count()),
        _ => None,
    }
}

/// Strict numeric reading: numbers and numeric strings only, no length fallback.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn try_parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Int(v) => Some(*v as f64),
        Value::Float(v) => Some(*v),
        Value::String(s) => parse_number(s),
        _ => None,
    }
}

/// Strict integer reading: integers, integral floats and integer strings.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub(crate) fn try_parse_int(value: &Value) -> Option<i64> {
    match value {
        Value::Int(v) => Some(*v),
        Value::Float(v)
            if v.fract() == 0.0 && *v >= i64::MIN as f64 && *v <= i64::MAX as f64 =>
        {
            Some(*v as i64)
        }
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Only finite results count: `"nan"` and `"inf"` are words, not numbers.
fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}
