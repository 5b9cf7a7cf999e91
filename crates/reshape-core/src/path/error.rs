//! Error types for path operations
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use thiserror::Error;

/// Failures raised while parsing a path or walking it through a value
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    /// The path string itself is malformed, or not usable for this operation
    #[error("Invalid path \"{path}\": {message}")]
    InvalidPath { path: String, message: String },

    /// A step would have to treat a non-container value as a container
    #[error("Cannot set property \"{property}\" at \"{prefix}\": {reason}")]
    CannotTraverse {
        prefix: String,
        property: String,
        reason: String,
    },

    /// The write target is not a keyed container
    #[error("Invalid target: {message}")]
    InvalidTarget { message: String },
}

/// Result alias for path operations
pub type PathResult<T> = std::result::Result<T, PathError>;

impl PathError {
    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a traversal error for `property` below `prefix`
    pub fn cannot_traverse(
        prefix: impl Into<String>,
        property: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::CannotTraverse {
            prefix: prefix.into(),
            property: property.into(),
            reason: reason.into(),
        }
    }
}
