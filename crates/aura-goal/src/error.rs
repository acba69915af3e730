// error.rs — Error types for the goal pipeline and its event sinks.

use aura_backend::{BackendError, ErrorKind};
use thiserror::Error;

use crate::state::PipelineState;

/// Errors from one pipeline run.
#[derive(Debug, Clone, Error)]
pub enum PipelineError {
    /// The goal title was blank. The pipeline stays Idle.
    #[error("invalid goal: {0}")]
    Validation(String),

    /// The backend could not decompose the goal.
    #[error("decomposition failed: {0}")]
    Decomposition(#[source] BackendError),

    /// Decomposition resolved with no steps.
    #[error("decomposition produced no steps")]
    EmptyDecomposition,

    /// The new goal could not be added.
    #[error("could not save goal: {0}")]
    Persistence(#[source] BackendError),

    /// The goal collection could not be re-read after the goal was added.
    /// `rolled_back` reports whether the added goal was removed again.
    #[error("could not refresh goals: {source}")]
    Refresh {
        source: BackendError,
        rolled_back: bool,
    },

    #[error("invalid transition from {from} to {to}")]
    InvalidTransition {
        from: PipelineState,
        to: PipelineState,
    },
}

impl PipelineError {
    /// Taxonomy category for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Validation(_) | PipelineError::InvalidTransition { .. } => {
                ErrorKind::Validation
            }
            PipelineError::Decomposition(e) if e.kind() == ErrorKind::Validation => {
                ErrorKind::Validation
            }
            PipelineError::Decomposition(_) | PipelineError::EmptyDecomposition => {
                ErrorKind::Generation
            }
            PipelineError::Persistence(e) if e.kind() == ErrorKind::Validation => {
                ErrorKind::Validation
            }
            PipelineError::Persistence(_) | PipelineError::Refresh { .. } => ErrorKind::Persistence,
        }
    }

    /// The state the run was in when it failed.
    pub fn failed_in(&self) -> PipelineState {
        match self {
            PipelineError::Validation(_) => PipelineState::Idle,
            PipelineError::Decomposition(_) | PipelineError::EmptyDecomposition => {
                PipelineState::Decomposing
            }
            PipelineError::Persistence(_) => PipelineState::Persisting,
            PipelineError::Refresh { .. } => PipelineState::Refreshing,
            PipelineError::InvalidTransition { from, .. } => *from,
        }
    }
}

/// Errors from delivering a pipeline event to a sink.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
