//! Constraint validation for produced values
//!
//! Every rule names a type tag; the matching validator checks the value's
//! runtime category and then the type-specific constraints found in the
//! rule's constraint bag.
//!
//! The validator is organized into focused modules:
//! - `types`: the [`ConstraintValidator`] trait and constraint helpers
//! - `registry`: type-tag dispatch with lazily created built-ins
//! - `string`, `formats`: string constraints and format grammars
//! - `numeric`: number and integer constraints
//! - `collection`: array and object constraints
//! - `scalar`: boolean and null
//! - `tests`: registry-level tests
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

pub mod collection;
pub mod error;
pub mod formats;
pub mod numeric;
pub mod registry;
pub mod scalar;
pub mod string;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export public API
pub use collection::{ArrayValidator, ObjectValidator};
pub use error::{ValidationError, ValidationResult};
pub use formats::StringFormat;
pub use numeric::NumberValidator;
pub use registry::{ValidatorRegistry, BUILTIN_TYPES};
pub use scalar::{BooleanValidator, NullValidator};
pub use string::StringValidator;
pub use types::{ConstraintValidator, Schema};
