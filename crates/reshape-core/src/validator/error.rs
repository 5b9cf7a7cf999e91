//! Constraint violation errors
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use thiserror::Error;

/// A value failed its type check or one of its constraints
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Realized runtime category differs from the declared type
    #[error("Expected type {expected} but got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// Number validators reject NaN explicitly
    #[error("Expected type {expected} but got NaN")]
    NotANumber { expected: String },

    /// Number validators reject positive and negative infinity explicitly
    #[error("Expected type {expected} but got {value}")]
    NotFinite { expected: String, value: String },

    #[error("Value {value} is not one of the allowed values: {allowed}")]
    NotInEnum { value: String, allowed: String },

    #[error("String length {length} is less than minimum length {min}")]
    MinLength { length: usize, min: usize },

    #[error("String length {length} exceeds maximum length {max}")]
    MaxLength { length: usize, max: usize },

    #[error("Value \"{value}\" does not match pattern \"{pattern}\"")]
    PatternMismatch { value: String, pattern: String },

    /// The `pattern` constraint is not a valid regular expression
    #[error("Invalid pattern \"{pattern}\": {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Value \"{value}\" does not match {format} format")]
    Format { value: String, format: String },

    #[error("Value {value} is less than minimum {minimum}")]
    Minimum { value: String, minimum: String },

    #[error("Value {value} is greater than maximum {maximum}")]
    Maximum { value: String, maximum: String },

    #[error("Value {value} must be greater than {bound}")]
    ExclusiveMinimum { value: String, bound: String },

    #[error("Value {value} must be less than {bound}")]
    ExclusiveMaximum { value: String, bound: String },

    #[error("Value {value} is not a multiple of {divisor}")]
    NotMultipleOf { value: String, divisor: String },

    /// `multipleOf` is zero or not a number
    #[error("Invalid multipleOf constraint {divisor}: must be a non-zero number")]
    InvalidMultipleOf { divisor: String },

    /// Integer outside the range of its `int32`/`int64` format
    #[error("Value {value} is out of range for {format}")]
    IntegerFormat { value: String, format: String },

    #[error("Array length {length} is less than minItems {min}")]
    MinItems { length: usize, min: usize },

    #[error("Array length {length} exceeds maxItems {max}")]
    MaxItems { length: usize, max: usize },

    #[error("Array items must be unique: items at index {first} and {second} are equal")]
    DuplicateItems { first: usize, second: usize },

    /// An array element failed the `items` schema
    #[error("Invalid item at index {index}: {source}")]
    Item {
        index: usize,
        source: Box<ValidationError>,
    },

    #[error("Missing required property \"{property}\"")]
    MissingProperty { property: String },

    /// No validator is registered for the type tag
    #[error("Unknown type \"{type_name}\"")]
    UnknownType { type_name: String },
}

/// Result alias for validation
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;
