//! Explicit JSON decoding with per-field error reporting.
//!
//! Request bodies are parsed into a JSON object first, then each writable
//! field is pulled out and type checked on its own, so one response can list
//! every problem with the payload.

pub mod todo;

use serde_json::{Map, Value};

use crate::error::{AppError, FieldErrors};

pub const NON_FIELD_ERRORS: &str = "non_field_errors";

pub const REQUIRED: &str = "This field is required.";
pub const NOT_NULL: &str = "This field may not be null.";
pub const INVALID_STRING: &str = "Not a valid string.";
pub const INVALID_BOOLEAN: &str = "Must be a valid boolean.";

const TRUE_VALUES: &[&str] = &["t", "y", "yes", "true", "on", "1"];
const FALSE_VALUES: &[&str] = &["f", "n", "no", "false", "off", "0"];

/// Parses a request body into a JSON object. An empty body counts as `{}`.
pub fn parse_object(body: &[u8]) -> Result<Map<String, Value>, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|err| AppError::bad_request(format!("JSON parse error - {err}")))?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(AppError::Validation(FieldErrors::single(
            NON_FIELD_ERRORS,
            format!(
                "Invalid data. Expected a dictionary, but got {}.",
                json_kind(&other)
            ),
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Outcome of reading one field from a payload.
#[derive(Debug, PartialEq)]
pub enum FieldValue<T> {
    Missing,
    Present(T),
    Invalid,
}

impl<T> FieldValue<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Missing | Self::Invalid => None,
        }
    }
}

fn lookup<'a>(
    data: &'a Map<String, Value>,
    field: &str,
    required: bool,
    errors: &mut FieldErrors,
) -> Option<&'a Value> {
    match data.get(field) {
        None => {
            if required {
                errors.add(field, REQUIRED);
            }
            None
        }
        Some(Value::Null) => {
            errors.add(field, NOT_NULL);
            None
        }
        Some(value) => Some(value),
    }
}

/// Reads a string field. Numbers are accepted and rendered as text; other
/// JSON types are rejected.
pub fn string_field(
    data: &Map<String, Value>,
    field: &str,
    required: bool,
    errors: &mut FieldErrors,
) -> FieldValue<String> {
    let Some(value) = lookup(data, field, required, errors) else {
        return if data.contains_key(field) {
            FieldValue::Invalid
        } else {
            FieldValue::Missing
        };
    };

    match value {
        Value::String(text) => FieldValue::Present(text.clone()),
        Value::Number(number) => FieldValue::Present(number.to_string()),
        _ => {
            errors.add(field, INVALID_STRING);
            FieldValue::Invalid
        }
    }
}

/// Reads a boolean field, accepting the common textual and 0/1 spellings.
pub fn boolean_field(
    data: &Map<String, Value>,
    field: &str,
    required: bool,
    errors: &mut FieldErrors,
) -> FieldValue<bool> {
    let Some(value) = lookup(data, field, required, errors) else {
        return if data.contains_key(field) {
            FieldValue::Invalid
        } else {
            FieldValue::Missing
        };
    };

    match parse_boolean(value) {
        Some(flag) => FieldValue::Present(flag),
        None => {
            errors.add(field, INVALID_BOOLEAN);
            FieldValue::Invalid
        }
    }
}

fn parse_boolean(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => match number.as_f64() {
            Some(n) if n == 1.0 => Some(true),
            Some(n) if n == 0.0 => Some(false),
            _ => None,
        },
        Value::String(text) => {
            let text = text.trim().to_ascii_lowercase();
            if TRUE_VALUES.contains(&text.as_str()) {
                Some(true)
            } else if FALSE_VALUES.contains(&text.as_str()) {
                Some(false)
            } else {
                None
            }
        }
        _ => None,
    }
}
