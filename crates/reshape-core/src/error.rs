//! Error types for the Reshape core library
//!
//! Each layer owns a focused error enum ([`PathError`], [`ValidationError`]);
//! this module ties them together into the crate-wide [`Error`] and defines
//! the per-rule wrapper every transformation failure is reported through.

use crate::path::PathError;
use crate::validator::ValidationError;
use thiserror::Error;

/// Main error type for Reshape operations
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed rule list or rule shape, raised while building an engine
    #[error("Invalid rule at index {index}: '{field}' {message}")]
    Configuration {
        index: usize,
        field: String,
        message: String,
    },

    /// A rule document could not be read or has the wrong overall shape
    #[error("Invalid mapping document: {message}")]
    Document {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// IO errors while loading rule documents
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Path parsing, extraction or writing failed
    #[error(transparent)]
    Path(#[from] PathError),

    /// A value violated its type or constraints
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A required value was still absent after defaulting
    #[error("Field \"{target}\" is required but no value was produced")]
    RequiredFieldMissing { target: String },

    /// A caller-supplied transform function failed; the message is kept intact
    #[error("{message}")]
    TransformFunction { message: String },

    /// Several source values and no transform function to combine them
    #[error("Cannot pass through {count} source values without a transform function")]
    AmbiguousPassthrough { count: usize },

    /// Any failure while applying a rule, tagged with the rule's target path
    #[error("Transformation failed at field \"{target}\": {source}")]
    Transformation {
        target: String,
        source: Box<Error>,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error for the rule at `index`
    pub fn configuration(
        index: usize,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Configuration {
            index,
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a document error without an underlying cause
    pub fn document(message: impl Into<String>) -> Self {
        Self::Document {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap a rule failure with the rule's target path
    pub fn at_field(target: impl Into<String>, source: Error) -> Self {
        Self::Transformation {
            target: target.into(),
            source: Box::new(source),
        }
    }

    /// The innermost error, looking through [`Error::Transformation`] wrappers
    pub fn root_cause(&self) -> &Error {
        match self {
            Self::Transformation { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Target path of the rule that failed, if this is a wrapped rule failure
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Transformation { target, .. } => Some(target),
            _ => None,
        }
    }

    /// Whether this error was raised while building an engine rather than transforming
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. } | Self::Document { .. } | Self::Io { .. }
        )
    }
}
