// channel.rs — StreamingChannel: deliver one reply, fragment by fragment.
//
// open() polls the generator's stream and hands each fragment to the
// caller's callback before polling again, so delivery order is generation
// order. The cancellation token is raced against every poll; `biased`
// makes a cancelled token win even when a fragment is also ready.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio_stream::StreamExt;
use tokio_util::sync::CancellationToken;

use crate::error::StreamError;
use crate::generator::{FragmentStream, ResponseGenerator, ScriptedResponder};

/// Chat streaming settings (`[stream]` in `.aura/config.toml`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreamConfig {
    /// Delay before each scripted fragment.
    #[serde(default = "default_fragment_interval_ms")]
    pub fragment_interval_ms: u64,
}

fn default_fragment_interval_ms() -> u64 {
    50
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            fragment_interval_ms: default_fragment_interval_ms(),
        }
    }
}

/// What a completed stream delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamSummary {
    pub fragments: usize,
    /// Total bytes across all fragments.
    pub bytes: usize,
}

/// Drives generated replies to a delivery callback.
///
/// The channel holds no per-call state: concurrent `open` calls each get
/// their own stream from the generator.
#[derive(Clone)]
pub struct StreamingChannel {
    generator: Arc<dyn ResponseGenerator>,
}

impl StreamingChannel {
    pub fn new(generator: Arc<dyn ResponseGenerator>) -> Self {
        Self { generator }
    }

    /// A channel replying with the canned agent text.
    pub fn scripted(config: &StreamConfig) -> Self {
        let interval = Duration::from_millis(config.fragment_interval_ms);
        Self::new(Arc::new(ScriptedResponder::canned(interval)))
    }

    /// The raw fragment stream for `prompt`, for callers that want to poll it
    /// themselves.
    pub fn fragments(&self, prompt: &str) -> Result<FragmentStream, StreamError> {
        if prompt.trim().is_empty() {
            return Err(StreamError::Validation("prompt is empty".into()));
        }
        self.generator.generate(prompt)
    }

    /// Stream the reply to `prompt` into `on_fragment`.
    ///
    /// Resolves only after the last fragment has been delivered. On failure
    /// or cancellation, fragments already passed to `on_fragment` are not
    /// retracted.
    pub async fn open<F>(
        &self,
        prompt: &str,
        cancel: &CancellationToken,
        mut on_fragment: F,
    ) -> Result<StreamSummary, StreamError>
    where
        F: FnMut(&str),
    {
        let mut stream = self.fragments(prompt)?;
        let mut summary = StreamSummary {
            fragments: 0,
            bytes: 0,
        };

        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::info!(delivered = summary.fragments, "stream cancelled");
                    return Err(StreamError::Cancelled { delivered: summary.fragments });
                }
                next = stream.next() => next,
            };

            match next {
                Some(Ok(fragment)) => {
                    on_fragment(&fragment);
                    summary.fragments += 1;
                    summary.bytes += fragment.len();
                }
                Some(Err(e)) => {
                    tracing::warn!(delivered = summary.fragments, error = %e, "stream failed");
                    return Err(e);
                }
                None => break,
            }
        }

        if summary.fragments == 0 {
            return Err(StreamError::Generation("reply produced no fragments".into()));
        }
        tracing::debug!(fragments = summary.fragments, "stream complete");
        Ok(summary)
    }
}
