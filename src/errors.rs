//! Error types for harness operations

use std::time::Duration;
use thiserror::Error;

/// Coarse classification of a failure, used by the error-kind probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The harness was called with arguments of the wrong shape
    Usage,
    /// A harness post-condition did not hold
    InvariantViolation,
    /// A generator could not produce a value
    Generator,
    /// A named method is missing or was called with bad arguments
    Method,
    /// An environment override could not be parsed
    Configuration,
    /// JSON conversion failed
    Serialization,
}

/// Errors that can occur while running property checks
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Generator description is neither a single spec nor a list of specs
    #[error("Not a valid generator list: {0}")]
    InvalidGenerators(String),

    /// Generator spec is well-formed JSON but describes an impossible generator
    #[error("Invalid generator spec: {0}")]
    InvalidSpec(String),

    /// The run loop stopped before reaching the requested count
    #[error("The expected {requested} runs were not completed ({completed} completed)")]
    IncompleteRuns {
        requested: usize,
        completed: usize,
        #[source]
        cause: Option<anyhow::Error>,
    },

    /// The configured deadline elapsed before the requested runs completed
    #[error("The expected {requested} runs were not completed within {elapsed:?} ({completed} completed)")]
    DeadlineExceeded {
        requested: usize,
        completed: usize,
        elapsed: Duration,
    },

    /// Strategy rejected value generation
    #[error("Generation error: {0}")]
    Generation(String),

    /// Method is not defined for the receiver's shape
    #[error("Unknown method `{method}` for {shape} value")]
    UnknownMethod { method: String, shape: &'static str },

    /// Method was called with arguments it cannot accept
    #[error("Invalid arguments to `{method}`: {reason}")]
    MethodArgument { method: String, reason: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl HarnessError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            HarnessError::InvalidGenerators(_) | HarnessError::InvalidSpec(_) => ErrorKind::Usage,
            HarnessError::IncompleteRuns { .. } | HarnessError::DeadlineExceeded { .. } => {
                ErrorKind::InvariantViolation
            }
            HarnessError::Generation(_) => ErrorKind::Generator,
            HarnessError::UnknownMethod { .. } | HarnessError::MethodArgument { .. } => {
                ErrorKind::Method
            }
            HarnessError::Configuration(_) => ErrorKind::Configuration,
            HarnessError::Serialization(_) => ErrorKind::Serialization,
        }
    }

    /// Number of runs that finished before a run-count failure, if this is one
    pub fn completed_runs(&self) -> Option<usize> {
        match self {
            HarnessError::IncompleteRuns { completed, .. }
            | HarnessError::DeadlineExceeded { completed, .. } => Some(*completed),
            _ => None,
        }
    }

    pub(crate) fn method_argument(method: &str, reason: impl Into<String>) -> Self {
        HarnessError::MethodArgument {
            method: method.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for harness operations
pub type HarnessResult<T> = Result<T, HarnessError>;

/// Errors that carry an explicit kind tag
///
/// The probe in [`crate::probe`] compares against this tag instead of
/// inspecting concrete error types.
pub trait Classified {
    /// The kind enumeration for this error type
    type Kind: PartialEq;

    /// The kind of this particular error
    fn kind(&self) -> Self::Kind;
}

impl Classified for HarnessError {
    type Kind = ErrorKind;

    fn kind(&self) -> ErrorKind {
        HarnessError::kind(self)
    }
}

impl Classified for std::io::Error {
    type Kind = std::io::ErrorKind;

    fn kind(&self) -> std::io::ErrorKind {
        std::io::Error::kind(self)
    }
}

impl From<serde_json::Error> for HarnessError {
    fn from(err: serde_json::Error) -> Self {
        HarnessError::Serialization(err.to_string())
    }
}

impl From<proptest::test_runner::Reason> for HarnessError {
    fn from(reason: proptest::test_runner::Reason) -> Self {
        HarnessError::Generation(reason.to_string())
    }
}
