// error.rs — Error types for the streaming chat channel.

use aura_backend::ErrorKind;
use thiserror::Error;

/// Errors from opening or driving a streamed reply.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StreamError {
    /// The prompt (or user message) was blank.
    #[error("invalid prompt: {0}")]
    Validation(String),

    /// The generator could not produce (or finish) a reply.
    #[error("generation failed: {0}")]
    Generation(String),

    /// A reply is already streaming into this transcript.
    #[error("a reply is already in flight")]
    Busy,

    /// The caller abandoned the stream. Fragments already delivered stay.
    #[error("stream cancelled after {delivered} fragments")]
    Cancelled { delivered: usize },
}

impl StreamError {
    /// Taxonomy category. Cancellation is caller-initiated and has none.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            StreamError::Validation(_) | StreamError::Busy => Some(ErrorKind::Validation),
            StreamError::Generation(_) => Some(ErrorKind::Generation),
            StreamError::Cancelled { .. } => None,
        }
    }
}
