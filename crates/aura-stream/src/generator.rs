// generator.rs — Lazy producers of reply fragments.
//
// A generator returns a Stream rather than pushing on a timer. The stream
// is cold: nothing is produced until the channel polls it, and dropping it
// stops production. Consumers must not assume any particular cadence.

use std::pin::Pin;
use std::time::Duration;

use aura_backend::catalog;
use tokio_stream::Stream;

use crate::error::StreamError;

/// One reply, as an ordered, finite sequence of fragments.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String, StreamError>> + Send>>;

/// Produces the fragments of a reply to a prompt.
///
/// Each call returns an independent stream; implementations must not share
/// a cursor between calls.
pub trait ResponseGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<FragmentStream, StreamError>;
}

/// Replies with a fixed text, one word per fragment, at a fixed interval.
///
/// Fragments keep their trailing space (`"Of "`, `"course. "`, ...), so
/// concatenating them reproduces the text exactly.
#[derive(Debug, Clone)]
pub struct ScriptedResponder {
    reply: String,
    interval: Duration,
}

impl ScriptedResponder {
    pub fn new(reply: impl Into<String>, interval: Duration) -> Self {
        Self {
            reply: reply.into(),
            interval,
        }
    }

    /// The product's canned agent reply.
    pub fn canned(interval: Duration) -> Self {
        Self::new(catalog::CHAT_REPLY, interval)
    }

    pub fn reply(&self) -> &str {
        &self.reply
    }
}

impl ResponseGenerator for ScriptedResponder {
    fn generate(&self, _prompt: &str) -> Result<FragmentStream, StreamError> {
        if self.reply.is_empty() {
            return Err(StreamError::Generation("no scripted reply available".into()));
        }
        let fragments: Vec<String> = self
            .reply
            .split_inclusive(' ')
            .map(str::to_string)
            .collect();
        let interval = self.interval;

        Ok(Box::pin(async_stream::stream! {
            for fragment in fragments {
                if !interval.is_zero() {
                    tokio::time::sleep(interval).await;
                }
                yield Ok(fragment);
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_stream::StreamExt;

    #[tokio::test]
    async fn fragments_concatenate_to_reply() {
        let responder = ScriptedResponder::canned(Duration::ZERO);
        let fragments: Vec<String> = responder
            .generate("hi")
            .unwrap()
            .map(|f| f.unwrap())
            .collect()
            .await;

        assert_eq!(fragments.len(), 32);
        assert_eq!(fragments[0], "Of ");
        assert_eq!(fragments.concat(), catalog::CHAT_REPLY);
    }

    #[tokio::test]
    async fn separate_calls_are_independent() {
        let responder = ScriptedResponder::new("a b c", Duration::ZERO);
        let mut first = responder.generate("x").unwrap();
        let mut second = responder.generate("y").unwrap();

        assert_eq!(first.next().await.unwrap().unwrap(), "a ");
        assert_eq!(first.next().await.unwrap().unwrap(), "b ");
        assert_eq!(second.next().await.unwrap().unwrap(), "a ");
    }

    #[test]
    fn empty_reply_is_a_generation_error() {
        let responder = ScriptedResponder::new("", Duration::ZERO);
        assert!(matches!(
            responder.generate("x"),
            Err(StreamError::Generation(_))
        ));
    }
}
