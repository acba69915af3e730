// chat.rs — One chat turn, printed as the reply streams in.

use std::io::Write;

use aura_stream::{CancellationToken, ChatTranscript, StreamError, StreamingChannel};

use crate::app::{interrupt_token, App};

pub async fn execute(app: &App, prompt: &str) -> anyhow::Result<()> {
    let channel = StreamingChannel::scripted(&app.config.stream);
    let cancel = interrupt_token();
    let mut transcript = ChatTranscript::new();
    let mut stdout = std::io::stdout();
    stream_turn(&channel, &mut transcript, prompt, &cancel, &mut stdout).await
}

/// Send `prompt` and write the reply to `out` fragment by fragment.
///
/// A failed write stops the echo and is returned once the turn ends; the
/// transcript still receives the whole reply.
async fn stream_turn<W: Write>(
    channel: &StreamingChannel,
    transcript: &mut ChatTranscript,
    prompt: &str,
    cancel: &CancellationToken,
    out: &mut W,
) -> anyhow::Result<()> {
    if let Some(greeting) = transcript.last() {
        writeln!(out, "aura> {}", greeting.text)?;
    }
    writeln!(out, "you>  {}", prompt.trim())?;
    write!(out, "aura> ")?;
    out.flush()?;

    let mut write_error: Option<std::io::Error> = None;
    let result = transcript
        .send(channel, prompt, cancel, |fragment| {
            if write_error.is_some() {
                return;
            }
            if let Err(e) = out.write_all(fragment.as_bytes()).and_then(|()| out.flush()) {
                write_error = Some(e);
            }
        })
        .await;
    if let Some(e) = write_error {
        return Err(e.into());
    }
    writeln!(out)?;

    match result {
        Ok(summary) => {
            tracing::debug!(fragments = summary.fragments, bytes = summary.bytes, "reply delivered");
            Ok(())
        }
        Err(StreamError::Cancelled { delivered }) => {
            writeln!(out, "(stopped after {} fragments)", delivered)?;
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aura_backend::catalog;
    use aura_stream::StreamConfig;

    fn fast_channel() -> StreamingChannel {
        StreamingChannel::scripted(&StreamConfig {
            fragment_interval_ms: 0,
        })
    }

    /// Accepts `limit` bytes, then fails like a closed pipe.
    struct ClosingWriter {
        written: Vec<u8>,
        limit: usize,
    }

    impl Write for ClosingWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if self.written.len() >= self.limit {
                return Err(std::io::ErrorKind::BrokenPipe.into());
            }
            let n = buf.len().min(self.limit - self.written.len());
            self.written.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn reply_is_echoed_as_it_streams() {
        let channel = fast_channel();
        let mut transcript = ChatTranscript::new();
        let mut out = Vec::new();

        stream_turn(&channel, &mut transcript, "Plan my week", &CancellationToken::new(), &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            format!(
                "aura> {}\nyou>  Plan my week\naura> {}\n",
                catalog::CHAT_GREETING,
                catalog::CHAT_REPLY
            )
        );
        assert_eq!(transcript.last().unwrap().text, catalog::CHAT_REPLY);
    }

    #[tokio::test]
    async fn closed_output_mid_reply_is_an_error() {
        let channel = fast_channel();
        let mut transcript = ChatTranscript::empty();
        let header = "you>  hi\naura> ";
        let mut out = ClosingWriter {
            written: Vec::new(),
            limit: header.len() + 4,
        };

        let err = stream_turn(&channel, &mut transcript, "hi", &CancellationToken::new(), &mut out)
            .await
            .unwrap_err();

        let io = err.downcast_ref::<std::io::Error>().unwrap();
        assert_eq!(io.kind(), std::io::ErrorKind::BrokenPipe);
        assert_eq!(transcript.last().unwrap().text, catalog::CHAT_REPLY);
        assert!(transcript.in_flight().is_none());
    }

    #[tokio::test]
    async fn blank_prompt_is_rejected() {
        let channel = fast_channel();
        let mut transcript = ChatTranscript::empty();
        let mut out = Vec::new();

        let err = stream_turn(&channel, &mut transcript, "  ", &CancellationToken::new(), &mut out)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<StreamError>(),
            Some(StreamError::Validation(_))
        ));
        assert!(transcript.messages().is_empty());
    }
}
