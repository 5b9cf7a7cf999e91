//! Helpers for describing and comparing JSON values
//!
//! Values flow through the engine as `Option<&Value>`: `None` is the
//! "absent" state (nothing was produced), which is distinct from an explicit
//! `Value::Null`.

use serde_json::Value;

/// Name of the realized runtime category of a value.
///
/// `null`, absent (`undefined`), arrays and objects are reported separately
/// rather than merged into a generic "object".
pub fn kind_name(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}

/// Absent or explicit null
pub fn is_missing(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

/// Structural equality where numbers compare by numeric value, so `1` and
/// `1.0` are the same item.
pub fn structurally_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| structurally_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| structurally_equal(x, y)))
        }
        _ => a == b,
    }
}
