//! Rule execution
//!
//! The engine applies its rules in order against one source record, building
//! a fresh target record. Per rule the stages run strictly as
//! extract → transform → default → required → validate → write, and the
//! first failing rule aborts the whole transformation.
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use super::built_in::TransformCatalog;
use super::types::{Rule, TransformContext};
use crate::path::{
    ContainerInference, Extractor, PathParser, ValueExtractor, ValueWriter, Writer,
};
use crate::validator::{ConstraintValidator, ValidatorRegistry};
use crate::value::is_missing;
use crate::{Error, Result};
use serde_json::{Map, Value};
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

/// Executes an ordered list of mapping rules.
///
/// The engine holds no per-call state: one instance can serve any number of
/// [`transform`](TransformationEngine::transform) calls, from any number of
/// threads.
pub struct TransformationEngine {
    rules: Vec<Rule>,
    extractor: Box<dyn Extractor>,
    writer: Box<dyn Writer>,
    registry: ValidatorRegistry,
}

impl TransformationEngine {
    /// Create an engine with the default extractor, writer and validators.
    ///
    /// Fails with [`Error::Configuration`] when a rule is malformed.
    pub fn new(rules: Vec<Rule>) -> Result<Self> {
        Self::builder(rules).build()
    }

    /// Start configuring an engine with custom components
    pub fn builder(rules: Vec<Rule>) -> EngineBuilder {
        EngineBuilder::new(rules)
    }

    /// Create an engine from a declarative rule document
    pub fn from_document(document: &Value, catalog: &TransformCatalog) -> Result<Self> {
        Self::new(crate::config::parse_rules(document, catalog)?)
    }

    /// Create an engine from a JSON or YAML rule file
    pub fn from_file(path: impl AsRef<Path>, catalog: &TransformCatalog) -> Result<Self> {
        Self::new(crate::config::load_rules(path, catalog)?)
    }

    /// The rules, in execution order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn registry(&self) -> &ValidatorRegistry {
        &self.registry
    }

    /// Transform `source` into a newly built record.
    ///
    /// `source` is never modified. A rule failure aborts the call and is
    /// reported as [`Error::Transformation`] naming the rule's target.
    pub fn transform(&self, source: &Value) -> Result<Value> {
        let mut output = Value::Object(Map::new());

        for rule in &self.rules {
            self.apply_rule(rule, source, &mut output).map_err(|err| {
                log::warn!("Rule for field '{}' failed: {}", rule.target(), err);
                Error::at_field(rule.target(), err)
            })?;
        }

        Ok(output)
    }

    fn apply_rule(&self, rule: &Rule, source: &Value, output: &mut Value) -> Result<()> {
        let input = self.extract_inputs(rule, source)?;
        let produced = produce(rule, input, source)?;
        let value = apply_default(rule, produced)?;

        if rule.is_required() && is_missing(value.as_ref()) {
            return Err(Error::RequiredFieldMissing {
                target: rule.target().to_string(),
            });
        }

        let Some(value) = value else {
            log::debug!("Rule for field '{}' produced no value", rule.target());
            return Ok(());
        };

        self.registry
            .validate(Some(&value), rule.value_type(), rule.constraints())?;
        self.writer.write(output, rule.target(), value)?;
        Ok(())
    }

    /// Named inputs for `rule`; absent source values are left out
    fn extract_inputs(&self, rule: &Rule, source: &Value) -> Result<Map<String, Value>> {
        let mut input = Map::new();
        for (name, path) in rule.sources() {
            if let Some(value) = self.extractor.extract(source, path)? {
                input.insert(name.clone(), value.clone());
            }
        }
        Ok(input)
    }
}

fn produce(rule: &Rule, input: Map<String, Value>, source: &Value) -> Result<Option<Value>> {
    match rule.transform() {
        Some(function) => {
            let input = Value::Object(input);
            let context = TransformContext {
                source,
                target: rule.target(),
            };
            guarded(|| function(&input, &context))
        }
        None if rule.sources().len() == 1 => Ok(input.into_iter().next().map(|(_, value)| value)),
        None => Err(Error::AmbiguousPassthrough {
            count: rule.sources().len(),
        }),
    }
}

fn apply_default(rule: &Rule, value: Option<Value>) -> Result<Option<Value>> {
    if !is_missing(value.as_ref()) {
        return Ok(value);
    }
    match rule.default_value() {
        Some(default) => {
            log::debug!("Applying default for field '{}'", rule.target());
            guarded(|| Ok(default.resolve())).map(Some)
        }
        None => Ok(value),
    }
}

/// Run caller code, turning both returned errors and panics into
/// [`Error::TransformFunction`]
fn guarded<T>(call: impl FnOnce() -> anyhow::Result<T>) -> Result<T> {
    match panic::catch_unwind(AssertUnwindSafe(call)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(Error::TransformFunction {
            message: err.to_string(),
        }),
        Err(payload) => Err(Error::TransformFunction {
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "transform function panicked".to_string()
    }
}

impl fmt::Debug for TransformationEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformationEngine")
            .field("rules", &self.rules)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

/// Builder for a [`TransformationEngine`] with replaced components
pub struct EngineBuilder {
    rules: Vec<Rule>,
    extractor: Option<Box<dyn Extractor>>,
    writer: Option<Box<dyn Writer>>,
    registry: ValidatorRegistry,
    inference: ContainerInference,
}

impl EngineBuilder {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self {
            rules,
            extractor: None,
            writer: None,
            registry: ValidatorRegistry::new(),
            inference: ContainerInference::default(),
        }
    }

    /// Replace the path extractor
    pub fn extractor(mut self, extractor: impl Extractor + 'static) -> Self {
        self.extractor = Some(Box::new(extractor));
        self
    }

    /// Replace the path writer; overrides [`container_inference`](Self::container_inference)
    pub fn writer(mut self, writer: impl Writer + 'static) -> Self {
        self.writer = Some(Box::new(writer));
        self
    }

    /// Container inference for the default writer
    pub fn container_inference(mut self, inference: ContainerInference) -> Self {
        self.inference = inference;
        self
    }

    /// Replace the validator registry
    pub fn registry(mut self, registry: ValidatorRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Register one additional validator
    pub fn validator(mut self, validator: impl ConstraintValidator + 'static) -> Self {
        self.registry.register(validator);
        self
    }

    /// Validate the rules and build the engine
    pub fn build(self) -> Result<TransformationEngine> {
        validate_rules(&self.rules)?;
        log::debug!("Built transformation engine with {} rules", self.rules.len());

        let inference = self.inference;
        Ok(TransformationEngine {
            rules: self.rules,
            extractor: self
                .extractor
                .unwrap_or_else(|| Box::new(ValueExtractor::new())),
            writer: self
                .writer
                .unwrap_or_else(|| Box::new(ValueWriter::with_inference(inference))),
            registry: self.registry,
        })
    }
}

/// Reject rules the pipeline cannot execute
fn validate_rules(rules: &[Rule]) -> Result<()> {
    let parser = PathParser::new();
    for (index, rule) in rules.iter().enumerate() {
        if rule.sources().is_empty() {
            return Err(Error::configuration(index, "sources", "must be a non-empty mapping"));
        }
        if rule.sources().keys().any(|name| name.trim().is_empty()) {
            return Err(Error::configuration(index, "sources", "contains an empty input name"));
        }
        for (name, path) in rule.sources() {
            if PathParser::is_root(path) {
                continue;
            }
            parser.parse(path).map_err(|err| {
                Error::configuration(index, "sources", format!("input \"{name}\": {err}"))
            })?;
        }
        if rule.target().trim().is_empty() {
            return Err(Error::configuration(index, "target", "must be a non-empty string"));
        }
        if PathParser::is_root(rule.target()) {
            return Err(Error::configuration(
                index,
                "target",
                "must name a field, not the record root",
            ));
        }
        parser
            .parse(rule.target())
            .map_err(|err| Error::configuration(index, "target", err.to_string()))?;
        if rule.value_type().trim().is_empty() {
            return Err(Error::configuration(index, "type", "must be a non-empty string"));
        }
    }
    Ok(())
}
