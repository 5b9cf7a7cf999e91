//! Declarative rule documents
//!
//! Rules can be described in JSON or YAML instead of code, either as a bare
//! list or as `{ "rules": [...] }`:
//!
//! ```yaml
//! rules:
//!   - sources: { name: user.name }
//!     target: userName
//!     type: string
//!     transform: trim
//!     required: true
//!     minLength: 1
//! ```
//!
//! Apart from `sources`, `target`, `type`, `transform`, `default` and
//! `required`, every key of a rule is kept as a validator constraint.
//! Transform functions are referenced by name and resolved against a
//! [`TransformCatalog`].
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use crate::transform::{Rule, TransformCatalog};
use crate::validator::Schema;
use crate::{Error, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Serialization format of a rule document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    #[default]
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Format implied by a file extension; anything but `.yaml`/`.yml` is JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                DocumentFormat::Yaml
            }
            _ => DocumentFormat::Json,
        }
    }

    /// Parse `text` into a JSON value
    pub fn parse(self, text: &str) -> Result<Value> {
        match self {
            DocumentFormat::Json => serde_json::from_str(text).map_err(|err| Error::Document {
                message: format!("invalid JSON: {}", err),
                source: Some(err.into()),
            }),
            DocumentFormat::Yaml => serde_yaml::from_str(text).map_err(|err| Error::Document {
                message: format!("invalid YAML: {}", err),
                source: Some(err.into()),
            }),
        }
    }
}

/// One rule as written in a document, before shape checks
#[derive(Debug, Deserialize)]
struct RuleDocument {
    #[serde(default)]
    sources: Option<Value>,
    #[serde(default)]
    target: Option<Value>,
    #[serde(rename = "type", default)]
    value_type: Option<Value>,
    #[serde(default)]
    transform: Option<Value>,
    #[serde(default)]
    default: Option<Value>,
    #[serde(default)]
    required: Option<Value>,
    #[serde(flatten)]
    constraints: Map<String, Value>,
}

/// Read a JSON or YAML rule file
pub fn load_rules(path: impl AsRef<Path>, catalog: &TransformCatalog) -> Result<Vec<Rule>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        message: format!("cannot read rule document {}", path.display()),
        source,
    })?;

    let format = DocumentFormat::from_path(path);
    log::debug!("Loading {:?} rule document from {}", format, path.display());
    parse_rules(&format.parse(&text)?, catalog)
}

/// Turn a parsed rule document into rules, checking the shape of every entry
pub fn parse_rules(document: &Value, catalog: &TransformCatalog) -> Result<Vec<Rule>> {
    let entries = match document {
        Value::Array(entries) => entries,
        Value::Object(fields) => match fields.get("rules") {
            Some(Value::Array(entries)) => entries,
            Some(_) => return Err(Error::document("'rules' must be a list")),
            None => {
                return Err(Error::document(
                    "expected a list of rules or an object with a 'rules' list",
                ))
            }
        },
        _ => return Err(Error::document("expected a list of rules")),
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_rule(index, entry, catalog))
        .collect()
}

fn parse_rule(index: usize, entry: &Value, catalog: &TransformCatalog) -> Result<Rule> {
    if !entry.is_object() {
        return Err(Error::configuration(index, "rule", "must be an object"));
    }
    let document: RuleDocument = serde_json::from_value(entry.clone())
        .map_err(|err| Error::configuration(index, "rule", err.to_string()))?;

    let sources = parse_sources(index, document.sources)?;
    let target = non_empty_string(index, "target", document.target)?;
    let value_type = non_empty_string(index, "type", document.value_type)?;
    let mut constraints: Schema = document.constraints;

    let mut builder = Rule::builder(target, value_type).sources(sources);

    match document.transform {
        None => {}
        Some(Value::String(name)) => {
            let function = catalog.get(&name).ok_or_else(|| {
                Error::configuration(
                    index,
                    "transform",
                    format!("names unknown function \"{}\"", name),
                )
            })?;
            builder = builder.transform_fn(function);
        }
        Some(_) => {
            return Err(Error::configuration(
                index,
                "transform",
                "must be the name of a transform function",
            ))
        }
    }

    match document.required {
        None => {}
        Some(Value::Bool(required)) => builder = builder.required_if(required),
        Some(Value::Array(properties)) if properties.iter().all(Value::is_string) => {
            constraints.insert("required".to_string(), Value::Array(properties));
        }
        Some(_) => {
            return Err(Error::configuration(
                index,
                "required",
                "must be a boolean or a list of property names",
            ))
        }
    }

    if let Some(default) = document.default {
        builder = builder.default_value(default);
    }

    Ok(builder.constraints(constraints).build())
}

fn parse_sources(index: usize, sources: Option<Value>) -> Result<Vec<(String, String)>> {
    let fields = match sources {
        Some(Value::Object(fields)) => fields,
        Some(Value::Array(_)) => {
            return Err(Error::configuration(index, "sources", "must be an object, not an array"))
        }
        None => return Err(Error::configuration(index, "sources", "is missing")),
        Some(_) => return Err(Error::configuration(index, "sources", "must be an object")),
    };
    if fields.is_empty() {
        return Err(Error::configuration(index, "sources", "must not be empty"));
    }

    fields
        .into_iter()
        .map(|(name, path)| match path {
            Value::String(path) => Ok((name, path)),
            _ => Err(Error::configuration(
                index,
                "sources",
                format!("entry \"{}\" must be a path string", name),
            )),
        })
        .collect()
}

fn non_empty_string(index: usize, field: &str, value: Option<Value>) -> Result<String> {
    match value {
        Some(Value::String(text)) if !text.trim().is_empty() => Ok(text),
        None => Err(Error::configuration(index, field, "is missing")),
        Some(_) => Err(Error::configuration(index, field, "must be a non-empty string")),
    }
}
