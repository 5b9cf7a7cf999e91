//! Reshape Core - declarative object-to-object transformation engine
//!
//! This crate turns a list of mapping rules and a source record into a freshly
//! built target record. Each rule extracts named values from source paths,
//! optionally runs a transform function, applies a default, validates the
//! result against a type/constraint schema and writes it into a (possibly
//! nested) target path.
//!
//! # Main Components
//!
//! - **Paths**: dot-delimited path parsing, extraction and writing
//! - **Validators**: string/number/integer/boolean/array/object/null constraint checks
//! - **Transformation Engine**: the per-rule extract → transform → default →
//!   required → validate → write pipeline
//! - **Configuration**: declarative JSON/YAML rule documents
//!
//! # Example
//!
//! ```
//! use reshape_core::{Rule, TransformationEngine};
//! use serde_json::json;
//!
//! let engine = TransformationEngine::new(vec![
//!     Rule::builder("userName", "string")
//!         .source("u", "user_name")
//!         .required()
//!         .build(),
//! ])
//! .unwrap();
//!
//! let output = engine.transform(&json!({ "user_name": "John" })).unwrap();
//! assert_eq!(output, json!({ "userName": "John" }));
//! ```

pub mod config;
pub mod error;
pub mod path;
pub mod transform;
pub mod validator;
pub mod value;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use path::{
    ContainerInference, Extractor, PathError, PathParser, ValueExtractor, ValueWriter, Writer,
};
pub use transform::{
    DefaultValue, EngineBuilder, Rule, RuleBuilder, TransformCatalog, TransformContext,
    TransformFunction, TransformationEngine,
};
pub use validator::{ConstraintValidator, Schema, ValidationError, ValidatorRegistry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
