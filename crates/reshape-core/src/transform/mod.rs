//! Rule-driven transformation of source records into target records
//!
//! The transformer is organized into focused modules:
//! - `types`: rules, transform functions and default values
//! - `builder`: fluent construction of rules
//! - `engine`: the rule pipeline and engine configuration
//! - `built_in`: named transform functions for rule documents
//! - `tests`: engine-level tests
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

pub mod built_in;
pub mod builder;
pub mod engine;
pub mod types;


// Re-export public API
pub use built_in::TransformCatalog;
pub use builder::RuleBuilder;
pub use engine::{EngineBuilder, TransformationEngine};
pub use types::{DefaultProducer, DefaultValue, Rule, TransformContext, TransformFunction};
