//! Type-tag to validator dispatch
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use super::collection::{ArrayValidator, ObjectValidator};
use super::error::{ValidationError, ValidationResult};
use super::numeric::NumberValidator;
use super::scalar::{BooleanValidator, NullValidator};
use super::string::StringValidator;
use super::types::{ConstraintValidator, Schema};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Type tags served by the built-in validators
pub const BUILTIN_TYPES: [&str; 7] = [
    "string", "number", "integer", "boolean", "array", "object", "null",
];

/// Built-in validators, each created on first use and then reused
#[derive(Default, Clone)]
struct BuiltinSlots {
    string: OnceLock<StringValidator>,
    number: OnceLock<NumberValidator>,
    integer: OnceLock<NumberValidator>,
    boolean: OnceLock<BooleanValidator>,
    array: OnceLock<ArrayValidator>,
    object: OnceLock<ObjectValidator>,
    null: OnceLock<NullValidator>,
}

/// Maps type tags to validators.
///
/// Each engine owns its own registry. Custom validators are added through
/// [`ValidatorRegistry::register`] and take precedence over built-ins with
/// the same tag.
#[derive(Default, Clone)]
pub struct ValidatorRegistry {
    builtins: BuiltinSlots,
    custom: HashMap<String, Arc<dyn ConstraintValidator>>,
}

impl ValidatorRegistry {
    /// Create a registry with only the built-in validators
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a validator under its own type tag, returning any validator
    /// it replaced
    pub fn register<V>(&mut self, validator: V) -> Option<Arc<dyn ConstraintValidator>>
    where
        V: ConstraintValidator + 'static,
    {
        let type_name = validator.type_name().to_string();
        log::debug!("Registering validator for type '{}'", type_name);
        self.custom.insert(type_name, Arc::new(validator))
    }

    /// Validator for `type_name`
    pub fn get(&self, type_name: &str) -> ValidationResult<&dyn ConstraintValidator> {
        if let Some(validator) = self.custom.get(type_name) {
            return Ok(validator.as_ref());
        }

        let slots = &self.builtins;
        let validator: &dyn ConstraintValidator = match type_name {
            "string" => slots.string.get_or_init(StringValidator::new),
            "number" => slots.number.get_or_init(NumberValidator::number),
            "integer" => slots.integer.get_or_init(NumberValidator::integer),
            "boolean" => slots.boolean.get_or_init(BooleanValidator::default),
            "array" => slots.array.get_or_init(ArrayValidator::default),
            "object" => slots.object.get_or_init(ObjectValidator::default),
            "null" => slots.null.get_or_init(NullValidator::default),
            other => {
                return Err(ValidationError::UnknownType {
                    type_name: other.to_string(),
                })
            }
        };
        Ok(validator)
    }

    /// Whether a validator exists for `type_name`
    pub fn contains(&self, type_name: &str) -> bool {
        self.custom.contains_key(type_name) || BUILTIN_TYPES.contains(&type_name)
    }

    /// Every known type tag, sorted
    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = BUILTIN_TYPES
            .iter()
            .map(|name| name.to_string())
            .chain(self.custom.keys().cloned())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Dispatch `value` to the validator for `type_name`
    pub fn validate(
        &self,
        value: Option<&Value>,
        type_name: &str,
        schema: &Schema,
    ) -> ValidationResult<()> {
        self.get(type_name)?.validate(value, schema, self)
    }
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut custom: Vec<&String> = self.custom.keys().collect();
        custom.sort();
        f.debug_struct("ValidatorRegistry")
            .field("builtins", &BUILTIN_TYPES)
            .field("custom", &custom)
            .finish()
    }
}
