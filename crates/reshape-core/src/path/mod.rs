//! Path addressing for nested records
//!
//! Paths are dot-delimited strings such as `user.address.city` or
//! `items.0.sku`. This module provides:
//!
//! - [`parser`] - splitting paths into segments and rejecting malformed ones
//! - [`extractor`] - reading a value at a path, where anything missing is absent
//! - [`writer`] - writing a value at a path, creating intermediate containers
//! - [`error`] - the [`PathError`] type shared by all three
//!
//! The engine talks to extraction and writing through the [`Extractor`] and
//! [`Writer`] traits so callers can inject their own implementations.
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod extractor;
pub mod parser;
pub mod writer;

pub use error::{PathError, PathResult};
pub use extractor::ValueExtractor;
pub use parser::{as_index, PathParser, ROOT, SEPARATOR};
pub use writer::{ValueWriter, RESERVED_LIST_SEGMENT};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reads a value out of a source record
pub trait Extractor: Send + Sync {
    /// Value at `path`, or `None` when any segment along the way is missing
    fn extract<'a>(&self, source: &'a Value, path: &str) -> PathResult<Option<&'a Value>>;
}

/// Writes a value into a target record
pub trait Writer: Send + Sync {
    /// Place `value` at `path` inside `target`, returning `target` for chaining
    fn write<'t>(
        &self,
        target: &'t mut Value,
        path: &str,
        value: Value,
    ) -> PathResult<&'t mut Value>;
}

/// How the writer decides between a list and a map when it has to create a
/// missing intermediate container
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContainerInference {
    /// A segment named `items` becomes a list and must be followed by a
    /// numeric index; every other segment becomes a map
    #[default]
    ReservedItems,
    /// A list exactly when the next segment is a numeric index
    NextSegment,
}

impl std::fmt::Display for ContainerInference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContainerInference::ReservedItems => write!(f, "reserved-items"),
            ContainerInference::NextSegment => write!(f, "next-segment"),
        }
    }
}
