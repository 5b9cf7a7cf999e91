//! String validation
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use super::error::{ValidationError, ValidationResult};
use super::formats::StringFormat;
use super::registry::ValidatorRegistry;
use super::types::{
    count_constraint, describe_enum, string_constraint, type_mismatch, ConstraintValidator, Schema,
};
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock, PoisonError};

/// Compiled `pattern` constraints, shared by every validator
static PATTERN_CACHE: OnceLock<Mutex<HashMap<String, Regex>>> = OnceLock::new();

/// Distinct patterns kept before the cache is cleared
pub const PATTERN_CACHE_CAPACITY: usize = 256;

/// Compile `pattern`, reusing an earlier compilation of the same text
fn compiled_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    let cache = PATTERN_CACHE.get_or_init(|| Mutex::new(HashMap::new()));
    let mut cache = cache.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(regex) = cache.get(pattern) {
        return Ok(regex.clone());
    }

    let regex = Regex::new(pattern)?;
    if cache.len() >= PATTERN_CACHE_CAPACITY {
        cache.clear();
    }
    cache.insert(pattern.to_string(), regex.clone());
    Ok(regex)
}

/// Validates `string` values.
///
/// Constraints: `enum`, `minLength`, `maxLength` (inclusive, counted in
/// characters), `pattern` (unanchored regular expression) and `format`.
/// Unknown formats are accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringValidator;

impl StringValidator {
    pub fn new() -> Self {
        Self
    }
}

impl ConstraintValidator for StringValidator {
    fn type_name(&self) -> &str {
        "string"
    }

    fn validate(
        &self,
        value: Option<&Value>,
        schema: &Schema,
        _registry: &ValidatorRegistry,
    ) -> ValidationResult<()> {
        let text = match value {
            Some(Value::String(text)) => text,
            other => return Err(type_mismatch(self.type_name(), other)),
        };

        if let Some(Value::Array(allowed)) = schema.get("enum") {
            if !allowed.iter().any(|candidate| candidate.as_str() == Some(text.as_str())) {
                return Err(ValidationError::NotInEnum {
                    value: format!("\"{text}\""),
                    allowed: describe_enum(allowed),
                });
            }
        }

        let length = text.chars().count();
        if let Some(min) = count_constraint(schema, "minLength") {
            if length < min {
                return Err(ValidationError::MinLength { length, min });
            }
        }
        if let Some(max) = count_constraint(schema, "maxLength") {
            if length > max {
                return Err(ValidationError::MaxLength { length, max });
            }
        }

        if let Some(pattern) = string_constraint(schema, "pattern") {
            let regex = compiled_pattern(pattern).map_err(|err| ValidationError::InvalidPattern {
                pattern: pattern.to_string(),
                message: err.to_string(),
            })?;
            if !regex.is_match(text) {
                return Err(ValidationError::PatternMismatch {
                    value: text.clone(),
                    pattern: pattern.to_string(),
                });
            }
        }

        if let Some(format) = string_constraint(schema, "format").and_then(StringFormat::from_name)
        {
            if !format.matches(text) {
                return Err(ValidationError::Format {
                    value: text.clone(),
                    format: format.name().to_string(),
                });
            }
        }

        Ok(())
    }
}
