// error.rs — Error types for the backend boundary.
//
// ErrorKind is the workspace-wide taxonomy. Every crate's error enum maps
// onto it through a `kind()` method so callers can branch on the category
// without matching every variant.

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

use crate::backend::Operation;

/// Category of a failure, independent of which component raised it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Empty or malformed input to an operation.
    Validation,
    /// The chat channel could not produce a response.
    Generation,
    /// One aggregator source rejected.
    SourceFailure,
    /// A goal add/refresh/update failed.
    Persistence,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Validation => write!(f, "validation"),
            ErrorKind::Generation => write!(f, "generation"),
            ErrorKind::SourceFailure => write!(f, "source_failure"),
            ErrorKind::Persistence => write!(f, "persistence"),
        }
    }
}

/// Errors returned by [`crate::Backend`] operations.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    /// The operation could not be served right now (injected fault, outage).
    #[error("{operation} unavailable: {reason}")]
    Unavailable { operation: Operation, reason: String },

    /// The request was rejected before doing any work.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The referenced goal is not in the collection.
    #[error("goal not found: {0}")]
    GoalNotFound(Uuid),

    /// The goal collection refused a write.
    #[error("persistence failed: {0}")]
    Persistence(String),
}

impl BackendError {
    /// Taxonomy category for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BackendError::Unavailable { .. } => ErrorKind::SourceFailure,
            BackendError::Validation(_) => ErrorKind::Validation,
            BackendError::GoalNotFound(_) | BackendError::Persistence(_) => ErrorKind::Persistence,
        }
    }

    /// Whether retrying the same call may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, BackendError::Unavailable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_taxonomy() {
        let err = BackendError::Unavailable {
            operation: Operation::Schedule,
            reason: "down".into(),
        };
        assert_eq!(err.kind(), ErrorKind::SourceFailure);
        assert!(err.is_transient());

        assert_eq!(
            BackendError::Validation("empty".into()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            BackendError::GoalNotFound(Uuid::new_v4()).kind(),
            ErrorKind::Persistence
        );
        assert!(!BackendError::Persistence("full".into()).is_transient());
    }

    #[test]
    fn error_display() {
        let err = BackendError::Unavailable {
            operation: Operation::WellnessInsight,
            reason: "injected fault".into(),
        };
        assert_eq!(
            err.to_string(),
            "fetch_wellness_insight unavailable: injected fault"
        );
        assert_eq!(ErrorKind::SourceFailure.to_string(), "source_failure");
    }
}
