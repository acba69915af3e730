//! # aura-stream
//!
//! Incremental delivery of the chat agent's replies.
//!
//! A [`ResponseGenerator`] lazily produces the fragments of one reply; a
//! [`StreamingChannel`] drives that sequence to a caller callback, in
//! order, honoring a cancellation token at every fragment. The
//! [`ChatTranscript`] is the caller-owned message list the channel writes
//! into.

pub mod channel;
pub mod error;
pub mod generator;
pub mod transcript;

pub use channel::{StreamConfig, StreamSummary, StreamingChannel};
pub use error::StreamError;
pub use generator::{FragmentStream, ResponseGenerator, ScriptedResponder};
pub use transcript::{ChatMessage, ChatTranscript};

/// Re-exported so callers need not depend on tokio-util directly.
pub use tokio_util::sync::CancellationToken;
