//! Boolean and null validation
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use super::error::ValidationResult;
use super::registry::ValidatorRegistry;
use super::types::{type_mismatch, ConstraintValidator, Schema};
use serde_json::Value;

/// Validates `boolean` values; type check only
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanValidator;

impl ConstraintValidator for BooleanValidator {
    fn type_name(&self) -> &str {
        "boolean"
    }

    fn validate(
        &self,
        value: Option<&Value>,
        _schema: &Schema,
        _registry: &ValidatorRegistry,
    ) -> ValidationResult<()> {
        match value {
            Some(Value::Bool(_)) => Ok(()),
            other => Err(type_mismatch(self.type_name(), other)),
        }
    }
}

/// Validates `null`: the value must be an explicit null, not merely absent
#[derive(Debug, Clone, Copy, Default)]
pub struct NullValidator;

impl ConstraintValidator for NullValidator {
    fn type_name(&self) -> &str {
        "null"
    }

    fn validate(
        &self,
        value: Option<&Value>,
        _schema: &Schema,
        _registry: &ValidatorRegistry,
    ) -> ValidationResult<()> {
        match value {
            Some(Value::Null) => Ok(()),
            other => Err(type_mismatch(self.type_name(), other)),
        }
    }
}
