//! Error types for engine operations
//!
//! Every component reports failures through its own enum so callers can tell
//! an input problem from a configuration problem without string matching.
//! [`InjectError`] wraps them for the pipeline entry point.

use thiserror::Error;

/// A pattern definition that could not be turned into a usable [`crate::pattern::Pattern`].
///
/// Pattern errors are fail-soft: the offending pattern is skipped and scanning
/// continues with the rest of the set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern '{name}': invalid regex `{regex}`: {message}")]
    InvalidRegex {
        name: String,
        regex: String,
        message: String,
    },
    #[error("pattern '{name}': unknown action '{action}'")]
    UnknownAction { name: String, action: String },
    #[error("pattern '{name}': unknown field '{field}'")]
    UnknownField { name: String, field: String },
    #[error("pattern '{name}': capture group {group} does not exist (regex has {available})")]
    MissingGroup {
        name: String,
        group: usize,
        available: usize,
    },
    #[error("pattern '{name}' has no regex")]
    NoRegex { name: String },
    #[error("pattern '{name}': format '{format}' is not registered")]
    UnknownFormat { name: String, format: String },
}

impl PatternError {
    /// Name of the pattern that failed.
    pub fn pattern_name(&self) -> &str {
        match self {
            PatternError::InvalidRegex { name, .. }
            | PatternError::UnknownAction { name, .. }
            | PatternError::UnknownField { name, .. }
            | PatternError::MissingGroup { name, .. }
            | PatternError::NoRegex { name }
            | PatternError::UnknownFormat { name, .. } => name,
        }
    }
}

/// A step object that does not have the shape `{<action>: value, ...metadata}`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    #[error("step must be an object, found {0}")]
    NotAnObject(&'static str),
    #[error("step has no recognised action (keys: {0})")]
    NoAction(String),
    #[error("step has more than one action: {0}")]
    MultipleActions(String),
}

/// Failures while reading a test suite (the step list collaborator's output).
#[derive(Debug, Error)]
pub enum SuiteError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("expected a test suite object, a test object, or an array of steps")]
    UnrecognisedShape,
    #[error("test {test}: 'steps' must be an array")]
    StepsNotArray { test: usize },
    #[error("test {test}, step {step}: {source}")]
    Step {
        test: usize,
        step: usize,
        #[source]
        source: StepError,
    },
}

/// Failures while rendering an annotation body.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// A batch of insertions that cannot be applied safely.
///
/// Any mutation error aborts the whole batch; no operation is applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    #[error("operation {index}: offset {offset} is past the end of the document ({len} bytes)")]
    OffsetOutOfBounds {
        index: usize,
        offset: usize,
        len: usize,
    },
    #[error("operation {index}: offset {offset} is not on a character boundary")]
    NotCharBoundary { index: usize, offset: usize },
}

/// Errors surfaced by [`crate::inject`].
#[derive(Debug, Error)]
pub enum InjectError {
    #[error(transparent)]
    Suite(#[from] SuiteError),
    #[error(transparent)]
    Serialize(#[from] SerializeError),
    #[error(transparent)]
    Mutation(#[from] MutationError),
}
