//! Core validation types
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use super::error::{ValidationError, ValidationResult};
use super::registry::ValidatorRegistry;
use crate::value::kind_name;
use serde_json::{Map, Value};

/// Constraint bag handed to a validator: the rule's constraint fields, or a
/// nested `items` schema for array elements
pub type Schema = Map<String, Value>;

/// Checks a value against one type tag and that type's constraints.
///
/// `value` is `None` when nothing was produced. Validators receive the
/// registry so container types can validate their children.
pub trait ConstraintValidator: Send + Sync {
    /// Type tag this validator is registered under
    fn type_name(&self) -> &str;

    /// Check `value` against the constraints in `schema`
    fn validate(
        &self,
        value: Option<&Value>,
        schema: &Schema,
        registry: &ValidatorRegistry,
    ) -> ValidationResult<()>;
}

pub(crate) fn type_mismatch(expected: &str, value: Option<&Value>) -> ValidationError {
    ValidationError::TypeMismatch {
        expected: expected.to_string(),
        actual: kind_name(value).to_string(),
    }
}

/// Numeric constraint, ignored unless it is a JSON number
pub(crate) fn number_constraint(schema: &Schema, key: &str) -> Option<f64> {
    schema.get(key).and_then(Value::as_f64)
}

/// Non-negative whole-number constraint such as `minLength` or `maxItems`
pub(crate) fn count_constraint(schema: &Schema, key: &str) -> Option<usize> {
    let value = schema.get(key)?;
    value
        .as_u64()
        .or_else(|| {
            value
                .as_f64()
                .filter(|n| *n >= 0.0 && n.fract() == 0.0)
                .map(|n| n as u64)
        })
        .map(|n| usize::try_from(n).unwrap_or(usize::MAX))
}

pub(crate) fn string_constraint<'s>(schema: &'s Schema, key: &str) -> Option<&'s str> {
    schema.get(key).and_then(Value::as_str)
}

/// Render an allowed-values list for error messages
pub(crate) fn describe_enum(allowed: &[Value]) -> String {
    let rendered: Vec<String> = allowed.iter().map(Value::to_string).collect();
    format!("[{}]", rendered.join(", "))
}
