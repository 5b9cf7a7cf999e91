//! Writing values into nested records by path
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use super::error::{PathError, PathResult};
use super::parser::{as_index, PathParser, ROOT, SEPARATOR};
use super::{ContainerInference, Writer};
use crate::value::kind_name;
use serde_json::{Map, Value};

/// Segment name that [`ContainerInference::ReservedItems`] always creates as a list
pub const RESERVED_LIST_SEGMENT: &str = "items";

/// How far past the end of an array a write may reach; the gap is null-padded
pub const MAX_INDEX_GAP: usize = 10_000;

/// Default [`Writer`]: creates missing intermediate containers and
/// overwrites the final segment unconditionally.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueWriter {
    parser: PathParser,
    inference: ContainerInference,
}

impl ValueWriter {
    /// Create a writer using the default container inference
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with an explicit container inference policy
    pub fn with_inference(inference: ContainerInference) -> Self {
        Self {
            parser: PathParser::new(),
            inference,
        }
    }

    /// The container inference policy in use
    pub fn inference(&self) -> ContainerInference {
        self.inference
    }

    fn assign(&self, target: &mut Value, segments: &[&str], value: Value) -> PathResult<()> {
        let mut current = target;
        for depth in 0..segments.len() - 1 {
            current = self.descend(current, segments, depth)?;
        }
        set_last(current, segments, value)
    }

    /// Step from `current` into `segments[depth]`, creating the child container
    /// when it is absent or null.
    fn descend<'v>(
        &self,
        current: &'v mut Value,
        segments: &[&str],
        depth: usize,
    ) -> PathResult<&'v mut Value> {
        let segment = segments[depth];
        let next = segments[depth + 1];
        let here = prefix(segments, depth + 1);

        let slot = match current {
            Value::Object(map) => {
                if matches!(map.get(segment), None | Some(Value::Null)) {
                    let container = self.new_container(segment, next, &here)?;
                    map.insert(segment.to_string(), container);
                }
                map.entry(segment.to_string()).or_insert(Value::Null)
            }
            Value::Array(items) => {
                let parent = prefix(segments, depth);
                let index = as_index(segment).ok_or_else(|| {
                    PathError::cannot_traverse(
                        &parent,
                        segment,
                        format!(
                            "\"{parent}\" is an array and \"{segment}\" is not a numeric index"
                        ),
                    )
                })?;
                if items.get(index).map_or(true, Value::is_null) {
                    let container = self.new_container(segment, next, &here)?;
                    pad_to(items, index, &parent, segment)?;
                    items[index] = container;
                }
                &mut items[index]
            }
            other => {
                let parent = prefix(segments, depth);
                return Err(PathError::cannot_traverse(
                    &parent,
                    segment,
                    format!(
                        "value at \"{parent}\" is not a container (found {})",
                        kind_name(Some(&*other))
                    ),
                ));
            }
        };

        if slot.is_object() || slot.is_array() {
            Ok(slot)
        } else {
            Err(PathError::cannot_traverse(
                &here,
                next,
                format!(
                    "value at \"{here}\" is not a container (found {})",
                    kind_name(Some(&*slot))
                ),
            ))
        }
    }

    fn new_container(&self, segment: &str, next: &str, here: &str) -> PathResult<Value> {
        let next_is_index = as_index(next).is_some();
        match self.inference {
            ContainerInference::ReservedItems if segment == RESERVED_LIST_SEGMENT => {
                if !next_is_index {
                    return Err(PathError::cannot_traverse(
                        here,
                        next,
                        format!(
                            "\"{here}\" is created as an array and \"{next}\" is not an index"
                        ),
                    ));
                }
                Ok(Value::Array(Vec::new()))
            }
            ContainerInference::ReservedItems => Ok(Value::Object(Map::new())),
            ContainerInference::NextSegment if next_is_index => Ok(Value::Array(Vec::new())),
            ContainerInference::NextSegment => Ok(Value::Object(Map::new())),
        }
    }
}

impl Writer for ValueWriter {
    fn write<'t>(
        &self,
        target: &'t mut Value,
        path: &str,
        value: Value,
    ) -> PathResult<&'t mut Value> {
        if !target.is_object() {
            return Err(PathError::InvalidTarget {
                message: format!(
                    "expected an object to write into, got {}",
                    kind_name(Some(&*target))
                ),
            });
        }
        if PathParser::is_root(path) {
            return Err(PathError::invalid_path(
                path,
                "writing requires a concrete destination, not the root",
            ));
        }

        let segments = self.parser.parse(path)?;
        self.assign(target, &segments, value)?;
        Ok(target)
    }
}

fn set_last(current: &mut Value, segments: &[&str], value: Value) -> PathResult<()> {
    let depth = segments.len() - 1;
    let last = segments[depth];
    match current {
        Value::Object(map) => {
            map.insert(last.to_string(), value);
            Ok(())
        }
        Value::Array(items) => {
            let parent = prefix(segments, depth);
            let index = as_index(last).ok_or_else(|| {
                PathError::cannot_traverse(
                    &parent,
                    last,
                    format!(
                        "\"{parent}\" is an array and \"{last}\" is not a numeric index"
                    ),
                )
            })?;
            pad_to(items, index, &parent, last)?;
            items[index] = value;
            Ok(())
        }
        other => {
            let parent = prefix(segments, depth);
            Err(PathError::cannot_traverse(
                &parent,
                last,
                format!(
                    "value at \"{parent}\" is not a container (found {})",
                    kind_name(Some(&*other))
                ),
            ))
        }
    }
}

/// Grow `items` with nulls so that `index` is addressable
fn pad_to(items: &mut Vec<Value>, index: usize, parent: &str, segment: &str) -> PathResult<()> {
    if index < items.len() {
        return Ok(());
    }
    let len = index
        .checked_add(1)
        .filter(|len| len - items.len() <= MAX_INDEX_GAP)
        .ok_or_else(|| {
            PathError::cannot_traverse(
                parent,
                segment,
                format!(
                    "index {index} is too far past the end of \"{parent}\" ({} items)",
                    items.len()
                ),
            )
        })?;
    items.resize(len, Value::Null);
    Ok(())
}

/// Path made of the first `len` segments, `$` for the root
fn prefix(segments: &[&str], len: usize) -> String {
    if len == 0 {
        ROOT.to_string()
    } else {
        segments[..len].join(&SEPARATOR.to_string())
    }
}
