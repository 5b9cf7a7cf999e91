//! Builder for creating mapping rules
//!
//! This module provides a fluent builder API for constructing rules.
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use super::types::{DefaultValue, Rule, TransformContext, TransformFunction};
use crate::validator::Schema;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Builder for creating mapping rules
pub struct RuleBuilder {
    sources: BTreeMap<String, String>,
    target: String,
    value_type: String,
    transform: Option<TransformFunction>,
    default: Option<DefaultValue>,
    required: bool,
    constraints: Schema,
}

impl RuleBuilder {
    /// Create a new rule builder
    pub fn new(target: impl Into<String>, value_type: impl Into<String>) -> Self {
        Self {
            sources: BTreeMap::new(),
            target: target.into(),
            value_type: value_type.into(),
            transform: None,
            default: None,
            required: false,
            constraints: Schema::new(),
        }
    }

    /// Read the source value at `path` into the input named `name`
    pub fn source(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.sources.insert(name.into(), path.into());
        self
    }

    /// Add several named sources at once
    pub fn sources<I, K, P>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: Into<String>,
    {
        for (name, path) in sources {
            self.sources.insert(name.into(), path.into());
        }
        self
    }

    /// Compute the value from the named inputs
    pub fn transform<F>(mut self, function: F) -> Self
    where
        F: Fn(&Value, &TransformContext<'_>) -> anyhow::Result<Option<Value>>
            + Send
            + Sync
            + 'static,
    {
        self.transform = Some(Arc::new(function));
        self
    }

    /// Use an already shared transform function
    pub fn transform_fn(mut self, function: TransformFunction) -> Self {
        self.transform = Some(function);
        self
    }

    /// Fixed value used when nothing (or null) was produced
    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(DefaultValue::Value(value));
        self
    }

    /// Computed value used when nothing (or null) was produced
    pub fn default_with<F>(mut self, producer: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.default = Some(DefaultValue::Producer(Arc::new(producer)));
        self
    }

    /// Make the rule required
    pub fn required(self) -> Self {
        self.required_if(true)
    }

    pub fn required_if(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Add one validator constraint such as `minLength` or `format`
    pub fn constraint(mut self, name: impl Into<String>, value: Value) -> Self {
        self.constraints.insert(name.into(), value);
        self
    }

    /// Merge a whole constraint bag
    pub fn constraints(mut self, constraints: Schema) -> Self {
        self.constraints.extend(constraints);
        self
    }

    /// Build the rule
    pub fn build(self) -> Rule {
        Rule {
            sources: self.sources,
            target: self.target,
            value_type: self.value_type,
            transform: self.transform,
            default: self.default,
            required: self.required,
            constraints: self.constraints,
        }
    }
}
