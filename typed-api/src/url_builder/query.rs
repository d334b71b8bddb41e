//! Turning serialized arguments into path segments and query strings.

use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::error::{ParamLocation, ParameterError};

/// Serializes a caller-supplied argument into a JSON object.
///
/// `null` (from `()` or `None`) is treated as an empty object.
pub(crate) fn to_object<T>(
    value: &T,
    location: ParamLocation,
) -> Result<Map<String, Value>, ParameterError>
where
    T: Serialize + ?Sized,
{
    let value = serde_json::to_value(value)
        .map_err(|source| ParameterError::Serialize { location, source })?;
    into_object(value, location)
}

/// Interprets an already-serialized value as an object.
pub(crate) fn into_object(
    value: Value,
    location: ParamLocation,
) -> Result<Map<String, Value>, ParameterError> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(ParameterError::NotAnObject {
            location,
            found: json_kind(&other),
        }),
    }
}

/// Renders a scalar the way it appears in a URL: strings verbatim, numbers
/// in their shortest form (`40.0` becomes `40`), booleans as `true`/`false`.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_text(n)),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Largest magnitude below which every integer is exactly representable as `f64`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f)
            if !n.is_i64() && !n.is_u64() && f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER =>
        {
            (f as i64).to_string()
        }
        _ => n.to_string(),
    }
}

/// Serializes query pairs as `k=v&k=v`, skipping null values.
///
/// Keys keep the order of the object. Values are percent-encoded, leaving
/// only `A-Z a-z 0-9 - _ . ~` unescaped.
pub(crate) fn encode_query(query: &Map<String, Value>) -> Result<String, ParameterError> {
    let mut tokens = Vec::with_capacity(query.len());
    for (key, value) in query {
        if value.is_null() {
            continue;
        }
        let Some(text) = scalar_text(value) else {
            return Err(ParameterError::InvalidValue {
                name: key.clone(),
                location: ParamLocation::Query,
                value: value.to_string(),
                expected: "a string, number or boolean".to_string(),
            });
        };
        tokens.push(format!("{key}={}", urlencoding::encode(&text)));
    }
    Ok(tokens.join("&"))
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
