//! Built-in transform functions for common operations
//!
//! This module provides named transform functions for type conversions and
//! string cleanup, and the [`TransformCatalog`] that rule documents resolve
//! transform names against.
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use super::types::{TransformContext, TransformFunction};
use crate::value::kind_name;
use anyhow::{anyhow, bail};
use serde_json::{Number, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Named transform functions available to rule documents
#[derive(Clone)]
pub struct TransformCatalog {
    functions: HashMap<String, TransformFunction>,
}

impl TransformCatalog {
    /// Create a catalog with no functions
    pub fn empty() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// Create a catalog holding every built-in function
    pub fn with_builtins() -> Self {
        let mut catalog = Self::empty();
        catalog.register("trim", trim);
        catalog.register("lowercase", lowercase);
        catalog.register("uppercase", uppercase);
        catalog.register("to_number", to_number);
        catalog.register("to_string", to_string);
        catalog.register("to_boolean", to_boolean);
        catalog.register("concat", concat);
        catalog.register("coalesce", coalesce);
        catalog
    }

    /// Register `function` under `name`, replacing any previous entry
    pub fn register<F>(&mut self, name: impl Into<String>, function: F) -> &mut Self
    where
        F: Fn(&Value, &TransformContext<'_>) -> anyhow::Result<Option<Value>>
            + Send
            + Sync
            + 'static,
    {
        self.functions.insert(name.into(), Arc::new(function));
        self
    }

    pub fn get(&self, name: &str) -> Option<TransformFunction> {
        self.functions.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for TransformCatalog {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for TransformCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformCatalog")
            .field("functions", &self.names())
            .finish()
    }
}

/// The only input of a single-input function; null counts as nothing
fn single<'v>(function: &str, input: &'v Value) -> anyhow::Result<Option<&'v Value>> {
    let fields = input
        .as_object()
        .ok_or_else(|| anyhow!("{} expects named inputs", function))?;
    if fields.len() > 1 {
        bail!(
            "{} expects a single input but got {}",
            function,
            fields.len()
        );
    }
    Ok(fields.values().next().filter(|value| !value.is_null()))
}

fn map_string(
    function: &str,
    input: &Value,
    map: impl Fn(&str) -> String,
) -> anyhow::Result<Option<Value>> {
    match single(function, input)? {
        None => Ok(None),
        Some(Value::String(text)) => Ok(Some(Value::String(map(text)))),
        Some(other) => bail!(
            "{} expects a string but got {}",
            function,
            kind_name(Some(other))
        ),
    }
}

/// Strip leading and trailing whitespace
pub fn trim(input: &Value, _context: &TransformContext<'_>) -> anyhow::Result<Option<Value>> {
    map_string("trim", input, |text| text.trim().to_string())
}

pub fn lowercase(input: &Value, _context: &TransformContext<'_>) -> anyhow::Result<Option<Value>> {
    map_string("lowercase", input, str::to_lowercase)
}

pub fn uppercase(input: &Value, _context: &TransformContext<'_>) -> anyhow::Result<Option<Value>> {
    map_string("uppercase", input, str::to_uppercase)
}

/// Parse a string as a number; numbers pass through unchanged
pub fn to_number(input: &Value, _context: &TransformContext<'_>) -> anyhow::Result<Option<Value>> {
    match single("to_number", input)? {
        None => Ok(None),
        Some(Value::Number(number)) => Ok(Some(Value::Number(number.clone()))),
        Some(Value::String(text)) => parse_number(text.trim()).map(|n| Some(Value::Number(n))),
        Some(other) => bail!(
            "to_number expects a string or number but got {}",
            kind_name(Some(other))
        ),
    }
}

fn parse_number(text: &str) -> anyhow::Result<Number> {
    if let Ok(integer) = text.parse::<i64>() {
        return Ok(Number::from(integer));
    }
    text.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| anyhow!("Cannot convert \"{}\" to a number", text))
}

/// Render a scalar as a string; arrays and objects become compact JSON
pub fn to_string(input: &Value, _context: &TransformContext<'_>) -> anyhow::Result<Option<Value>> {
    Ok(single("to_string", input)?.map(|value| Value::String(render(value))))
}

fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Interpret `true`/`false`/`1`/`0`/`yes`/`no` (any case) as a boolean
pub fn to_boolean(input: &Value, _context: &TransformContext<'_>) -> anyhow::Result<Option<Value>> {
    let flag = match single("to_boolean", input)? {
        None => return Ok(None),
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => true,
            "false" | "0" | "no" => false,
            _ => bail!("Cannot convert \"{}\" to a boolean", text),
        },
        Some(Value::Number(number)) => match number.as_f64() {
            Some(n) if n == 1.0 => true,
            Some(n) if n == 0.0 => false,
            _ => bail!("Cannot convert {} to a boolean", number),
        },
        Some(other) => bail!(
            "to_boolean expects a string, number or boolean but got {}",
            kind_name(Some(other))
        ),
    };
    Ok(Some(Value::Bool(flag)))
}

/// Join every present, non-null input with a single space, in input-name order
pub fn concat(input: &Value, _context: &TransformContext<'_>) -> anyhow::Result<Option<Value>> {
    let fields = input
        .as_object()
        .ok_or_else(|| anyhow!("concat expects named inputs"))?;
    let parts: Vec<String> = fields
        .values()
        .filter(|value| !value.is_null())
        .map(render)
        .collect();

    if parts.is_empty() {
        return Ok(None);
    }
    Ok(Some(Value::String(parts.join(" "))))
}

/// First non-null input, in input-name order
pub fn coalesce(input: &Value, _context: &TransformContext<'_>) -> anyhow::Result<Option<Value>> {
    let fields = input
        .as_object()
        .ok_or_else(|| anyhow!("coalesce expects named inputs"))?;
    Ok(fields.values().find(|value| !value.is_null()).cloned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn call(name: &str, input: Value) -> anyhow::Result<Option<Value>> {
        let catalog = TransformCatalog::with_builtins();
        let function = catalog.get(name).unwrap();
        let source = json!({});
        let context = TransformContext {
            source: &source,
            target: "out",
        };
        function(&input, &context)
    }

    #[test]
    fn test_string_cleanup() {
        assert_eq!(call("trim", json!({"v": "  hi  "})).unwrap(), Some(json!("hi")));
        assert_eq!(call("lowercase", json!({"v": "HeLLo"})).unwrap(), Some(json!("hello")));
        assert_eq!(call("uppercase", json!({"v": "HeLLo"})).unwrap(), Some(json!("HELLO")));
    }

    #[test]
    fn test_single_input_functions_reject_several_inputs() {
        let err = call("trim", json!({"a": "x", "b": "y"})).unwrap_err();
        assert_eq!(err.to_string(), "trim expects a single input but got 2");
    }

    #[test]
    fn test_absent_and_null_inputs_produce_nothing() {
        assert_eq!(call("trim", json!({})).unwrap(), None);
        assert_eq!(call("to_number", json!({"v": null})).unwrap(), None);
        assert_eq!(call("concat", json!({})).unwrap(), None);
        assert_eq!(call("coalesce", json!({"a": null})).unwrap(), None);
    }

    #[test]
    fn test_to_number() {
        assert_eq!(call("to_number", json!({"v": "42"})).unwrap(), Some(json!(42)));
        assert_eq!(call("to_number", json!({"v": " 2.5 "})).unwrap(), Some(json!(2.5)));
        assert_eq!(call("to_number", json!({"v": 7})).unwrap(), Some(json!(7)));

        let err = call("to_number", json!({"v": "abc"})).unwrap_err();
        assert_eq!(err.to_string(), "Cannot convert \"abc\" to a number");
        assert!(call("to_number", json!({"v": "NaN"})).is_err());
        assert!(call("to_number", json!({"v": true})).is_err());
    }

    #[test]
    fn test_to_string() {
        assert_eq!(call("to_string", json!({"v": 12})).unwrap(), Some(json!("12")));
        assert_eq!(call("to_string", json!({"v": false})).unwrap(), Some(json!("false")));
        assert_eq!(call("to_string", json!({"v": "s"})).unwrap(), Some(json!("s")));
        assert_eq!(call("to_string", json!({"v": [1, 2]})).unwrap(), Some(json!("[1,2]")));
    }

    #[test]
    fn test_to_boolean() {
        for truthy in ["true", "TRUE", "1", "yes", " Yes "] {
            assert_eq!(call("to_boolean", json!({"v": truthy})).unwrap(), Some(json!(true)));
        }
        for falsy in ["false", "0", "no"] {
            assert_eq!(call("to_boolean", json!({"v": falsy})).unwrap(), Some(json!(false)));
        }
        assert_eq!(call("to_boolean", json!({"v": 0})).unwrap(), Some(json!(false)));
        assert!(call("to_boolean", json!({"v": "maybe"})).is_err());
        assert!(call("to_boolean", json!({"v": 2})).is_err());
    }

    #[test]
    fn test_concat_uses_input_name_order() {
        let result = call(
            "concat",
            json!({"b_last": "Doe", "a_first": "Jane", "c": null}),
        )
        .unwrap();
        assert_eq!(result, Some(json!("Jane Doe")));
        assert_eq!(call("concat", json!({"a": "n", "b": 1})).unwrap(), Some(json!("n 1")));
    }

    #[test]
    fn test_coalesce_picks_first_non_null() {
        let result = call("coalesce", json!({"a": null, "b": 0, "c": "x"})).unwrap();
        assert_eq!(result, Some(json!(0)));
    }

    #[test]
    fn test_catalog_registration() {
        let mut catalog = TransformCatalog::empty();
        assert!(catalog.names().is_empty());
        catalog.register("double", |input, _context| {
            let n = input.get("n").and_then(Value::as_f64).unwrap_or_default();
            Ok(Some(json!(n * 2.0)))
        });
        assert!(catalog.contains("double"));
        assert_eq!(catalog.names(), vec!["double"]);
        assert_eq!(TransformCatalog::default().names().len(), 8);
    }
}
