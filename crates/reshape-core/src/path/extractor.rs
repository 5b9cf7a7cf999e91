//! Reading values out of nested records by path
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use super::error::PathResult;
use super::parser::{as_index, PathParser};
use super::Extractor;
use serde_json::Value;

/// Default [`Extractor`]: walks parsed segments through objects and arrays.
///
/// A missing key, an out-of-range index, or stepping into null or a scalar
/// yields `None` (absent) instead of an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueExtractor {
    parser: PathParser,
}

impl ValueExtractor {
    /// Create a new extractor
    pub fn new() -> Self {
        Self {
            parser: PathParser::new(),
        }
    }
}

impl Extractor for ValueExtractor {
    fn extract<'a>(&self, source: &'a Value, path: &str) -> PathResult<Option<&'a Value>> {
        if PathParser::is_root(path) {
            return Ok(Some(source));
        }

        let mut current = source;
        for segment in self.parser.parse(path)? {
            let next = match current {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => as_index(segment).and_then(|index| items.get(index)),
                _ => None,
            };
            match next {
                Some(value) => current = value,
                None => return Ok(None),
            }
        }

        Ok(Some(current))
    }
}
