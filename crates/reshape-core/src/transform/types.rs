//! Core types for mapping rules
//!
//! This module defines the rule a transformation engine executes, the
//! transform function capability rules may carry, and default values.
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use super::builder::RuleBuilder;
use crate::validator::Schema;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Read-only context handed to transform functions
#[derive(Debug, Clone, Copy)]
pub struct TransformContext<'a> {
    /// The complete source record being transformed
    pub source: &'a Value,
    /// Target path of the rule being applied
    pub target: &'a str,
}

/// A pure function from the named input object to the produced value.
///
/// Returning `Ok(None)` produces nothing (absent). Errors are reported with
/// their original message, wrapped with the rule's target path.
pub type TransformFunction =
    Arc<dyn Fn(&Value, &TransformContext<'_>) -> anyhow::Result<Option<Value>> + Send + Sync>;

/// Zero-argument producer for computed defaults
pub type DefaultProducer = Arc<dyn Fn() -> Value + Send + Sync>;

/// Value used when a rule produces nothing, or null
#[derive(Clone)]
pub enum DefaultValue {
    /// A fixed value, cloned on each use
    Value(Value),
    /// Computed on each use
    Producer(DefaultProducer),
}

impl DefaultValue {
    /// Materialize the default
    pub fn resolve(&self) -> Value {
        match self {
            DefaultValue::Value(value) => value.clone(),
            DefaultValue::Producer(produce) => produce(),
        }
    }
}

impl From<Value> for DefaultValue {
    fn from(value: Value) -> Self {
        DefaultValue::Value(value)
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Value(value) => f.debug_tuple("Value").field(value).finish(),
            DefaultValue::Producer(_) => f.write_str("Producer(<function>)"),
        }
    }
}

/// One declarative mapping instruction.
///
/// Rules are immutable once built; construct them with [`Rule::builder`].
#[derive(Clone)]
pub struct Rule {
    pub(crate) sources: BTreeMap<String, String>,
    pub(crate) target: String,
    pub(crate) value_type: String,
    pub(crate) transform: Option<TransformFunction>,
    pub(crate) default: Option<DefaultValue>,
    pub(crate) required: bool,
    pub(crate) constraints: Schema,
}

impl Rule {
    /// Start building a rule that writes to `target` and validates as `value_type`
    pub fn builder(target: impl Into<String>, value_type: impl Into<String>) -> RuleBuilder {
        RuleBuilder::new(target, value_type)
    }

    /// Input name to source path, ordered by input name
    pub fn sources(&self) -> &BTreeMap<String, String> {
        &self.sources
    }

    /// Path the produced value is written to
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Type tag selecting the validator
    pub fn value_type(&self) -> &str {
        &self.value_type
    }

    pub fn transform(&self) -> Option<&TransformFunction> {
        self.transform.as_ref()
    }

    pub fn default_value(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }

    /// Whether a value must survive defaulting
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Type-specific constraints handed to the validator
    pub fn constraints(&self) -> &Schema {
        &self.constraints
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("sources", &self.sources)
            .field("target", &self.target)
            .field("value_type", &self.value_type)
            .field("transform", &self.transform.as_ref().map(|_| "<function>"))
            .field("default", &self.default)
            .field("required", &self.required)
            .field("constraints", &self.constraints)
            .finish()
    }
}
