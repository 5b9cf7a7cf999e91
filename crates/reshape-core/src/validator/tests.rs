//! Tests for validator dispatch
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use super::{ConstraintValidator, Schema, ValidationError, ValidationResult, ValidatorRegistry};
use serde_json::{json, Value};

/// Accepts strings of decimal digits
struct DigitsValidator;

impl ConstraintValidator for DigitsValidator {
    fn type_name(&self) -> &str {
        "digits"
    }

    fn validate(
        &self,
        value: Option<&Value>,
        _schema: &Schema,
        _registry: &ValidatorRegistry,
    ) -> ValidationResult<()> {
        match value.and_then(Value::as_str) {
            Some(text) if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) => Ok(()),
            _ => Err(ValidationError::TypeMismatch {
                expected: "digits".to_string(),
                actual: "other".to_string(),
            }),
        }
    }
}

#[test]
fn test_builtin_dispatch() {
    let registry = ValidatorRegistry::new();
    let schema = Schema::new();
    assert!(registry.validate(Some(&json!("x")), "string", &schema).is_ok());
    assert!(registry.validate(Some(&json!(1.5)), "number", &schema).is_ok());
    assert!(registry.validate(Some(&json!(2)), "integer", &schema).is_ok());
    assert!(registry.validate(Some(&json!(true)), "boolean", &schema).is_ok());
    assert!(registry.validate(Some(&json!([])), "array", &schema).is_ok());
    assert!(registry.validate(Some(&json!({})), "object", &schema).is_ok());
    assert!(registry.validate(Some(&Value::Null), "null", &schema).is_ok());
}

#[test]
fn test_unknown_type_tag() {
    let registry = ValidatorRegistry::new();
    let err = registry
        .validate(Some(&json!(1)), "decimal", &Schema::new())
        .unwrap_err();
    assert_eq!(
        err,
        ValidationError::UnknownType {
            type_name: "decimal".to_string()
        }
    );
    assert!(!registry.contains("decimal"));
}

#[test]
fn test_builtin_validators_are_cached() {
    let registry = ValidatorRegistry::new();
    let first = registry.get("string").unwrap() as *const dyn ConstraintValidator as *const ();
    let second = registry.get("string").unwrap() as *const dyn ConstraintValidator as *const ();
    assert_eq!(first, second);
}

#[test]
fn test_custom_validator_registration() {
    let mut registry = ValidatorRegistry::new();
    assert!(registry.register(DigitsValidator).is_none());
    assert!(registry.contains("digits"));
    assert!(registry.type_names().contains(&"digits".to_string()));

    let schema = Schema::new();
    assert!(registry
        .validate(Some(&json!("0042")), "digits", &schema)
        .is_ok());
    assert!(registry
        .validate(Some(&json!("42a")), "digits", &schema)
        .is_err());
}

#[test]
fn test_custom_validator_reachable_from_array_items() {
    let mut registry = ValidatorRegistry::new();
    registry.register(DigitsValidator);

    let schema = json!({"items": {"type": "digits"}});
    let schema = schema.as_object().cloned().unwrap_or_default();
    assert!(registry
        .validate(Some(&json!(["1", "22"])), "array", &schema)
        .is_ok());
    let err = registry
        .validate(Some(&json!(["1", "x"])), "array", &schema)
        .unwrap_err();
    assert!(matches!(err, ValidationError::Item { index: 1, .. }));
}

#[test]
fn test_type_names_are_sorted() {
    let names = ValidatorRegistry::new().type_names();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
    assert_eq!(names.len(), 7);
}
