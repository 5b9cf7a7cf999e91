//! Number and integer validation
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use super::error::{ValidationError, ValidationResult};
use super::registry::ValidatorRegistry;
use super::types::{
    describe_enum, number_constraint, string_constraint, type_mismatch, ConstraintValidator,
    Schema,
};
use serde_json::Value;

/// Distance from an exact multiple still accepted by `multipleOf`
pub const MULTIPLE_OF_TOLERANCE: f64 = 1e-12;

const INT64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Validates `number` and `integer` values.
///
/// Constraints: `minimum`/`maximum` (inclusive), `exclusiveMinimum`/
/// `exclusiveMaximum`, `multipleOf`, `enum`, and for integers a `format` of
/// `int32` or `int64`.
#[derive(Debug, Clone, Copy)]
pub struct NumberValidator {
    integer: bool,
}

impl NumberValidator {
    /// Validator for the `number` type
    pub fn number() -> Self {
        Self { integer: false }
    }

    /// Validator for the `integer` type
    pub fn integer() -> Self {
        Self { integer: true }
    }

    /// Check a raw numeric value against `schema`.
    ///
    /// NaN and infinities are rejected before any other check.
    pub fn check(&self, n: f64, schema: &Schema) -> ValidationResult<()> {
        self.check_exact(n, None, schema)
    }

    /// Like [`check`](Self::check), with the exact value when it fits in an `i64`
    fn check_exact(&self, n: f64, exact: Option<i64>, schema: &Schema) -> ValidationResult<()> {
        let expected = self.type_name();
        if n.is_nan() {
            return Err(ValidationError::NotANumber {
                expected: expected.to_string(),
            });
        }
        if n.is_infinite() {
            return Err(ValidationError::NotFinite {
                expected: expected.to_string(),
                value: if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string(),
            });
        }

        if self.integer {
            if n.fract() != 0.0 {
                return Err(ValidationError::TypeMismatch {
                    expected: expected.to_string(),
                    actual: "float".to_string(),
                });
            }
            check_integer_format(n, exact, schema)?;
        }

        check_bounds(n, schema)?;
        check_multiple_of(n, schema)?;

        if let Some(Value::Array(allowed)) = schema.get("enum") {
            if !allowed.iter().any(|candidate| candidate.as_f64() == Some(n)) {
                return Err(ValidationError::NotInEnum {
                    value: n.to_string(),
                    allowed: describe_enum(allowed),
                });
            }
        }

        Ok(())
    }
}

impl ConstraintValidator for NumberValidator {
    fn type_name(&self) -> &str {
        if self.integer {
            "integer"
        } else {
            "number"
        }
    }

    fn validate(
        &self,
        value: Option<&Value>,
        schema: &Schema,
        _registry: &ValidatorRegistry,
    ) -> ValidationResult<()> {
        match value {
            Some(Value::Number(number)) => match number.as_f64() {
                Some(n) => self.check_exact(n, number.as_i64(), schema),
                None => Err(ValidationError::NotANumber {
                    expected: self.type_name().to_string(),
                }),
            },
            other => Err(type_mismatch(self.type_name(), other)),
        }
    }
}

fn check_integer_format(n: f64, exact: Option<i64>, schema: &Schema) -> ValidationResult<()> {
    let in_range = match (string_constraint(schema, "format"), exact) {
        (Some("int32"), Some(i)) => i32::try_from(i).is_ok(),
        (Some("int32"), None) => n >= f64::from(i32::MIN) && n <= f64::from(i32::MAX),
        (Some("int64"), Some(_)) => true,
        // 2^63 and above only arrive as u64 or float
        (Some("int64"), None) => (-INT64_BOUND..INT64_BOUND).contains(&n),
        _ => true,
    };
    if in_range {
        Ok(())
    } else {
        Err(ValidationError::IntegerFormat {
            value: exact.map_or_else(|| n.to_string(), |i| i.to_string()),
            format: string_constraint(schema, "format")
                .unwrap_or_default()
                .to_string(),
        })
    }
}

fn check_bounds(n: f64, schema: &Schema) -> ValidationResult<()> {
    if let Some(minimum) = number_constraint(schema, "minimum") {
        if n < minimum {
            return Err(ValidationError::Minimum {
                value: n.to_string(),
                minimum: minimum.to_string(),
            });
        }
    }

    if let Some(maximum) = number_constraint(schema, "maximum") {
        // A negative maximum bounds the magnitude of the value.
        let exceeded = if maximum < 0.0 {
            n.abs() > maximum.abs()
        } else {
            n > maximum
        };
        if exceeded {
            return Err(ValidationError::Maximum {
                value: n.to_string(),
                maximum: maximum.to_string(),
            });
        }
    }

    if let Some(bound) = number_constraint(schema, "exclusiveMinimum") {
        if n <= bound {
            return Err(ValidationError::ExclusiveMinimum {
                value: n.to_string(),
                bound: bound.to_string(),
            });
        }
    }

    if let Some(bound) = number_constraint(schema, "exclusiveMaximum") {
        if n >= bound {
            return Err(ValidationError::ExclusiveMaximum {
                value: n.to_string(),
                bound: bound.to_string(),
            });
        }
    }

    Ok(())
}

fn check_multiple_of(n: f64, schema: &Schema) -> ValidationResult<()> {
    let Some(raw) = schema.get("multipleOf") else {
        return Ok(());
    };
    let divisor = raw
        .as_f64()
        .filter(|m| *m != 0.0 && m.is_finite())
        .ok_or_else(|| ValidationError::InvalidMultipleOf {
            divisor: raw.to_string(),
        })?;

    let remainder = (n % divisor).abs();
    let near_multiple =
        remainder < MULTIPLE_OF_TOLERANCE || (divisor.abs() - remainder) < MULTIPLE_OF_TOLERANCE;
    if near_multiple {
        Ok(())
    } else {
        Err(ValidationError::NotMultipleOf {
            value: n.to_string(),
            divisor: divisor.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema(value: Value) -> Schema {
        value.as_object().cloned().unwrap_or_default()
    }

    fn number(value: Value, constraints: Value) -> ValidationResult<()> {
        NumberValidator::number().validate(
            Some(&value),
            &schema(constraints),
            &ValidatorRegistry::new(),
        )
    }

    fn integer(value: Value, constraints: Value) -> ValidationResult<()> {
        NumberValidator::integer().validate(
            Some(&value),
            &schema(constraints),
            &ValidatorRegistry::new(),
        )
    }

    #[test]
    fn test_nan_and_infinity_have_dedicated_messages() {
        let validator = NumberValidator::number();
        let empty = Schema::new();

        let err = validator.check(f64::NAN, &empty).unwrap_err();
        assert_eq!(err.to_string(), "Expected type number but got NaN");

        let err = validator.check(f64::INFINITY, &empty).unwrap_err();
        assert_eq!(err.to_string(), "Expected type number but got Infinity");

        let err = NumberValidator::integer()
            .check(f64::NEG_INFINITY, &empty)
            .unwrap_err();
        assert_eq!(err.to_string(), "Expected type integer but got -Infinity");
    }

    #[test]
    fn test_type_mismatch() {
        let err = number(json!("12"), json!({})).unwrap_err();
        assert_eq!(err.to_string(), "Expected type number but got string");
    }

    #[test]
    fn test_integer_rejects_fractions() {
        assert!(integer(json!(42), json!({})).is_ok());
        assert!(integer(json!(42.0), json!({})).is_ok());
        let err = integer(json!(42.5), json!({})).unwrap_err();
        assert_eq!(err.to_string(), "Expected type integer but got float");
    }

    #[test]
    fn test_inclusive_bounds() {
        let bounds = json!({"minimum": 1, "maximum": 10});
        assert!(number(json!(1), bounds.clone()).is_ok());
        assert!(number(json!(10), bounds.clone()).is_ok());
        assert!(matches!(
            number(json!(0.5), bounds.clone()).unwrap_err(),
            ValidationError::Minimum { .. }
        ));
        assert!(matches!(
            number(json!(10.5), bounds).unwrap_err(),
            ValidationError::Maximum { .. }
        ));
    }

    #[test]
    fn test_negative_maximum_bounds_magnitude() {
        let bound = json!({"maximum": -5});
        assert!(number(json!(-3), bound.clone()).is_ok());
        assert!(number(json!(4), bound.clone()).is_ok());
        assert!(number(json!(-5), bound.clone()).is_ok());
        assert!(matches!(
            number(json!(-6), bound.clone()).unwrap_err(),
            ValidationError::Maximum { .. }
        ));
        assert!(matches!(
            number(json!(6), bound).unwrap_err(),
            ValidationError::Maximum { .. }
        ));
    }

    #[test]
    fn test_exclusive_bounds() {
        let bounds = json!({"exclusiveMinimum": 0, "exclusiveMaximum": 1});
        assert!(number(json!(0.5), bounds.clone()).is_ok());
        assert!(matches!(
            number(json!(0), bounds.clone()).unwrap_err(),
            ValidationError::ExclusiveMinimum { .. }
        ));
        assert!(matches!(
            number(json!(1), bounds).unwrap_err(),
            ValidationError::ExclusiveMaximum { .. }
        ));
    }

    #[test]
    fn test_multiple_of() {
        assert!(number(json!(15), json!({"multipleOf": 5})).is_ok());
        assert!(number(json!(-15), json!({"multipleOf": 5})).is_ok());
        let err = number(json!(17), json!({"multipleOf": 5})).unwrap_err();
        assert!(err.to_string().contains("not a multiple of 5"));
    }

    #[test]
    fn test_multiple_of_uses_float_tolerance() {
        assert!(number(json!(0.3), json!({"multipleOf": 0.1})).is_ok());
        assert!(number(json!(1.1), json!({"multipleOf": 0.01})).is_ok());
        assert!(number(json!(0.35), json!({"multipleOf": 0.1})).is_err());
    }

    #[test]
    fn test_invalid_multiple_of() {
        assert!(matches!(
            number(json!(10), json!({"multipleOf": 0})).unwrap_err(),
            ValidationError::InvalidMultipleOf { .. }
        ));
        assert!(matches!(
            number(json!(10), json!({"multipleOf": "5"})).unwrap_err(),
            ValidationError::InvalidMultipleOf { .. }
        ));
    }

    #[test]
    fn test_enum_exact_numeric_match() {
        assert!(number(json!(2), json!({"enum": [1, 2, 3]})).is_ok());
        assert!(number(json!(2.0), json!({"enum": [1, 2, 3]})).is_ok());
        assert!(matches!(
            number(json!(4), json!({"enum": [1, 2, 3]})).unwrap_err(),
            ValidationError::NotInEnum { .. }
        ));
    }

    #[test]
    fn test_integer_formats() {
        assert!(integer(json!(2_147_483_647), json!({"format": "int32"})).is_ok());
        assert!(integer(json!(-2_147_483_648i64), json!({"format": "int32"})).is_ok());
        assert!(matches!(
            integer(json!(2_147_483_648i64), json!({"format": "int32"})).unwrap_err(),
            ValidationError::IntegerFormat { .. }
        ));
        assert!(integer(json!(2_147_483_648i64), json!({"format": "int64"})).is_ok());
        assert!(matches!(
            integer(json!(u64::MAX), json!({"format": "int64"})).unwrap_err(),
            ValidationError::IntegerFormat { .. }
        ));
    }

    #[test]
    fn test_int64_accepts_its_own_extremes() {
        let int64 = json!({"format": "int64"});
        assert!(integer(json!(i64::MAX), int64.clone()).is_ok());
        assert!(integer(json!(i64::MIN), int64.clone()).is_ok());
        assert!(matches!(
            integer(json!(i64::MAX as u64 + 1), int64.clone()).unwrap_err(),
            ValidationError::IntegerFormat { .. }
        ));
        assert!(integer(json!(1.0e18), int64.clone()).is_ok());
        assert!(integer(json!(1.0e19), int64).is_err());
    }

    #[test]
    fn test_int32_boundaries_use_exact_values() {
        let int32 = json!({"format": "int32"});
        assert!(integer(json!(i32::MIN), int32.clone()).is_ok());
        let err = integer(json!(i64::from(i32::MAX) + 1), int32).unwrap_err();
        assert_eq!(
            err,
            ValidationError::IntegerFormat {
                value: "2147483648".to_string(),
                format: "int32".to_string(),
            }
        );
    }
}
