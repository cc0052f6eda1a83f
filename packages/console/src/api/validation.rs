// ABOUTME: Request payload validation helpers
// ABOUTME: Required-field checks with falsy emptiness, id extraction

use serde_json::{Map, Value};

/// Check that every named field is present and non-empty, returning the
/// error message for the first violation.
///
/// Emptiness is falsy-style: `null`, `""`, `0`, `false`, `[]`, and `{}`
/// all count as empty.
pub fn validate_required(payload: &Map<String, Value>, fields: &[&str]) -> Option<String> {
    for field in fields {
        let empty = match payload.get(*field) {
            None => true,
            Some(value) => is_empty(value),
        };
        if empty {
            return Some(format!("Field '{}' is required", field));
        }
    }
    None
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !*b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Read an id field that may arrive as a JSON number or a numeric string
pub fn extract_id(payload: &Map<String, Value>, field: &str) -> Option<i64> {
    match payload.get(field)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
