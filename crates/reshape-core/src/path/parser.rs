//! Dot-delimited path parsing
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use super::error::{PathError, PathResult};

/// Segment separator
pub const SEPARATOR: char = '.';

/// Path that addresses the whole record when reading
pub const ROOT: &str = "$";

/// Parses dot-delimited paths into ordered segment lists.
///
/// Segments are returned verbatim; numeric segments are only interpreted as
/// array indices by the extractor and writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathParser;

impl PathParser {
    /// Create a new parser
    pub fn new() -> Self {
        Self
    }

    /// Split `path` into its segments.
    ///
    /// Rejects empty and whitespace-only paths, paths made only of
    /// separators, leading or trailing separators, and consecutive
    /// separators.
    pub fn parse<'p>(&self, path: &'p str) -> PathResult<Vec<&'p str>> {
        if path.trim().is_empty() {
            return Err(PathError::invalid_path(path, "path must not be empty"));
        }
        if path.chars().all(|c| c == SEPARATOR) {
            return Err(PathError::invalid_path(
                path,
                "path must contain at least one segment",
            ));
        }
        if path.starts_with(SEPARATOR) {
            return Err(PathError::invalid_path(
                path,
                format!("path must not start with '{SEPARATOR}'"),
            ));
        }
        if path.ends_with(SEPARATOR) {
            return Err(PathError::invalid_path(
                path,
                format!("path must not end with '{SEPARATOR}'"),
            ));
        }

        let segments: Vec<&str> = path.split(SEPARATOR).collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(PathError::invalid_path(
                path,
                format!("path contains consecutive '{SEPARATOR}' separators"),
            ));
        }

        Ok(segments)
    }

    /// Whether `path` addresses the whole record (empty or `$`)
    pub fn is_root(path: &str) -> bool {
        path.is_empty() || path == ROOT
    }
}

/// Interpret a segment as an array index
pub fn as_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}
