// error.rs — Error types for multi-source aggregation.

use std::fmt;

use aura_backend::{BackendError, ErrorKind};
use thiserror::Error;

/// Why one source did not produce a value.
#[derive(Debug, Clone)]
pub enum FailureCause {
    /// The backend rejected the call.
    Backend(BackendError),
    /// The call did not settle within the per-source timeout.
    TimedOut { timeout_ms: u64 },
    /// The aggregation was cancelled before this source settled.
    Cancelled,
}

impl FailureCause {
    /// Whether another attempt may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            FailureCause::Backend(e) => e.is_transient(),
            FailureCause::TimedOut { .. } => true,
            FailureCause::Cancelled => false,
        }
    }
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureCause::Backend(e) => write!(f, "{}", e),
            FailureCause::TimedOut { timeout_ms } => write!(f, "timed out after {}ms", timeout_ms),
            FailureCause::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// A source that settled without a value, after `attempts` tries.
#[derive(Debug, Clone)]
pub struct SourceFailure {
    pub key: String,
    pub cause: FailureCause,
    pub attempts: u32,
}

impl fmt::Display for SourceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "source '{}' failed after {} attempt(s): {}",
            self.key, self.attempts, self.cause
        )
    }
}

/// Errors from the all-or-nothing aggregation path.
#[derive(Debug, Clone, Error)]
pub enum AggregateError {
    /// At least one source failed. Carries the first failure in declaration
    /// order; no partial result is returned.
    #[error("{0}")]
    SourceFailure(SourceFailure),

    /// A source resolved with a payload its caller did not expect.
    #[error("source '{0}' resolved with an unexpected payload")]
    UnexpectedPayload(String),

    #[error("aggregation cancelled")]
    Cancelled,
}

impl AggregateError {
    /// Taxonomy category. Cancellation is caller-initiated and has none.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            AggregateError::SourceFailure(_) | AggregateError::UnexpectedPayload(_) => {
                Some(ErrorKind::SourceFailure)
            }
            AggregateError::Cancelled => None,
        }
    }

    /// Key of the failed source, if any.
    pub fn failed_key(&self) -> Option<&str> {
        match self {
            AggregateError::SourceFailure(failure) => Some(&failure.key),
            AggregateError::UnexpectedPayload(key) => Some(key),
            AggregateError::Cancelled => None,
        }
    }
}
