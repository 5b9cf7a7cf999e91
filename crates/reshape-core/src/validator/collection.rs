//! Array and object validation
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use super::error::{ValidationError, ValidationResult};
use super::registry::ValidatorRegistry;
use super::types::{count_constraint, type_mismatch, ConstraintValidator, Schema};
use crate::value::structurally_equal;
use serde_json::Value;

/// Validates `array` values.
///
/// Constraints: `minItems`/`maxItems` (inclusive), `uniqueItems` (structural
/// equality) and `items`, a nested schema applied to every element when it
/// declares a `type`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayValidator;

impl ConstraintValidator for ArrayValidator {
    fn type_name(&self) -> &str {
        "array"
    }

    fn validate(
        &self,
        value: Option<&Value>,
        schema: &Schema,
        registry: &ValidatorRegistry,
    ) -> ValidationResult<()> {
        let items = match value {
            Some(Value::Array(items)) => items,
            other => return Err(type_mismatch(self.type_name(), other)),
        };

        let length = items.len();
        if let Some(min) = count_constraint(schema, "minItems") {
            if length < min {
                return Err(ValidationError::MinItems { length, min });
            }
        }
        if let Some(max) = count_constraint(schema, "maxItems") {
            if length > max {
                return Err(ValidationError::MaxItems { length, max });
            }
        }

        if schema.get("uniqueItems") == Some(&Value::Bool(true)) {
            for (first, a) in items.iter().enumerate() {
                if let Some(offset) = items[first + 1..]
                    .iter()
                    .position(|b| structurally_equal(a, b))
                {
                    return Err(ValidationError::DuplicateItems {
                        first,
                        second: first + 1 + offset,
                    });
                }
            }
        }

        if let Some(Value::Object(item_schema)) = schema.get("items") {
            if let Some(Value::String(item_type)) = item_schema.get("type") {
                let validator = registry.get(item_type)?;
                for (index, item) in items.iter().enumerate() {
                    validator
                        .validate(Some(item), item_schema, registry)
                        .map_err(|source| ValidationError::Item {
                            index,
                            source: Box::new(source),
                        })?;
                }
            }
        }

        Ok(())
    }
}

/// Validates `object` values (arrays and null excluded).
///
/// Constraint: `required`, a list of property names that must be present.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectValidator;

impl ConstraintValidator for ObjectValidator {
    fn type_name(&self) -> &str {
        "object"
    }

    fn validate(
        &self,
        value: Option<&Value>,
        schema: &Schema,
        _registry: &ValidatorRegistry,
    ) -> ValidationResult<()> {
        let object = match value {
            Some(Value::Object(object)) => object,
            other => return Err(type_mismatch(self.type_name(), other)),
        };

        if let Some(Value::Array(required)) = schema.get("required") {
            for property in required.iter().filter_map(Value::as_str) {
                if !object.contains_key(property) {
                    return Err(ValidationError::MissingProperty {
                        property: property.to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn array(value: Value, constraints: Value) -> ValidationResult<()> {
        let schema = constraints.as_object().cloned().unwrap_or_default();
        ArrayValidator.validate(Some(&value), &schema, &ValidatorRegistry::new())
    }

    fn object(value: Value, constraints: Value) -> ValidationResult<()> {
        let schema = constraints.as_object().cloned().unwrap_or_default();
        ObjectValidator.validate(Some(&value), &schema, &ValidatorRegistry::new())
    }

    #[test]
    fn test_array_type_check() {
        let err = array(json!({"0": 1}), json!({})).unwrap_err();
        assert_eq!(err.to_string(), "Expected type array but got object");
    }

    #[test]
    fn test_item_count_bounds() {
        let bounds = json!({"minItems": 1, "maxItems": 2});
        assert!(array(json!([1]), bounds.clone()).is_ok());
        assert!(array(json!([1, 2]), bounds.clone()).is_ok());
        assert!(matches!(
            array(json!([]), bounds.clone()).unwrap_err(),
            ValidationError::MinItems { length: 0, min: 1 }
        ));
        assert!(matches!(
            array(json!([1, 2, 3]), bounds).unwrap_err(),
            ValidationError::MaxItems { length: 3, max: 2 }
        ));
    }

    #[test]
    fn test_unique_items_uses_structural_equality() {
        let unique = json!({"uniqueItems": true});
        assert!(array(json!([1, 2, {"a": 1}, {"a": 2}]), unique.clone()).is_ok());
        assert!(matches!(
            array(json!([{"a": [1]}, 2, {"a": [1]}]), unique.clone()).unwrap_err(),
            ValidationError::DuplicateItems {
                first: 0,
                second: 2
            }
        ));
        assert!(array(json!([1, 1]), json!({"uniqueItems": false})).is_ok());
    }

    #[test]
    fn test_items_schema_is_applied_to_every_element() {
        let schema = json!({"items": {"type": "string", "minLength": 2}});
        assert!(array(json!(["ab", "cd"]), schema.clone()).is_ok());

        let err = array(json!(["ab", "c"]), schema).unwrap_err();
        match err {
            ValidationError::Item { index, source } => {
                assert_eq!(index, 1);
                assert!(matches!(*source, ValidationError::MinLength { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_nested_array_items() {
        let schema = json!({
            "items": {"type": "array", "items": {"type": "integer"}}
        });
        assert!(array(json!([[1, 2], [3]]), schema.clone()).is_ok());
        let err = array(json!([[1, 2], [3.5]]), schema).unwrap_err();
        assert!(err.to_string().contains("index 1"));
        assert!(err.to_string().contains("integer"));
    }

    #[test]
    fn test_items_without_type_are_not_checked() {
        assert!(array(json!([1, "a", null]), json!({"items": {"minLength": 3}})).is_ok());
    }

    #[test]
    fn test_items_with_unknown_type() {
        let err = array(json!([1]), json!({"items": {"type": "decimal"}})).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownType { .. }));
    }

    #[test]
    fn test_object_excludes_arrays_and_null() {
        assert!(object(json!({}), json!({})).is_ok());
        assert_eq!(
            object(json!([]), json!({})).unwrap_err().to_string(),
            "Expected type object but got array"
        );
        assert_eq!(
            object(Value::Null, json!({})).unwrap_err().to_string(),
            "Expected type object but got null"
        );
    }

    #[test]
    fn test_object_required_properties() {
        let schema = json!({"required": ["id", "name"]});
        assert!(object(json!({"id": 1, "name": null}), schema.clone()).is_ok());
        let err = object(json!({"id": 1}), schema).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingProperty {
                property: "name".to_string()
            }
        );
    }
}
