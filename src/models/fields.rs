//! Typed field extraction from request payloads.

use crate::error::AppError;
use serde_json::{Map, Value};

/// A request body that parsed as a JSON object.
pub type Payload = Map<String, Value>;

/// Keys no request may set, on any entity.
pub const IMMUTABLE_KEYS: &[&str] = &["id", "created_at", "updated_at", "__class__"];

/// Required string: absent or `null` is "Missing", any other non-string is "Invalid".
pub fn required_str(payload: &Payload, field: &str) -> Result<String, AppError> {
    match payload.get(field) {
        None | Some(Value::Null) => Err(AppError::missing(field)),
        Some(v) => string_value(field, v),
    }
}

pub fn optional_str(payload: &Payload, field: &str) -> Result<Option<String>, AppError> {
    match payload.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => string_value(field, v).map(Some),
    }
}

pub fn optional_int(payload: &Payload, field: &str) -> Result<Option<i64>, AppError> {
    match payload.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => int_value(field, v).map(Some),
    }
}

pub fn optional_float(payload: &Payload, field: &str) -> Result<Option<f64>, AppError> {
    match payload.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => float_value(field, v).map(Some),
    }
}

pub fn string_value(field: &str, v: &Value) -> Result<String, AppError> {
    v.as_str().map(str::to_string).ok_or_else(|| AppError::invalid(field))
}

pub fn int_value(field: &str, v: &Value) -> Result<i64, AppError> {
    v.as_i64().ok_or_else(|| AppError::invalid(field))
}

/// Integers are accepted where a float is expected.
pub fn float_value(field: &str, v: &Value) -> Result<f64, AppError> {
    v.as_f64().ok_or_else(|| AppError::invalid(field))
}

/// Payload entries an update may apply: everything except the immutable keys and `frozen`.
pub fn updatable<'a>(
    payload: &'a Payload,
    frozen: &'a [&'a str],
) -> impl Iterator<Item = (&'a str, &'a Value)> + 'a {
    payload
        .iter()
        .map(|(k, v)| (k.as_str(), v))
        .filter(move |(k, _)| !IMMUTABLE_KEYS.contains(k) && !frozen.contains(k))
}
