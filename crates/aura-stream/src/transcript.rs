// transcript.rs — ChatTranscript: the chat view's own message list.
//
// The transcript, not the channel, owns the messages. The channel only
// reaches them through the append callback handed to `open`. At most one
// agent message is in flight; once finished its text is frozen.

use aura_backend::catalog;
use aura_backend::ChatRole;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::channel::{StreamSummary, StreamingChannel};
use crate::error::StreamError;

/// One message in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            text: text.into(),
        }
    }
}

/// Ordered chat history with a single in-flight slot.
#[derive(Debug, Clone)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
    in_flight: Option<Uuid>,
}

impl ChatTranscript {
    /// A transcript opening with the agent's greeting.
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::new(ChatRole::Agent, catalog::CHAT_GREETING)],
            in_flight: None,
        }
    }

    pub fn empty() -> Self {
        Self {
            messages: Vec::new(),
            in_flight: None,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Id of the agent message currently receiving fragments.
    pub fn in_flight(&self) -> Option<Uuid> {
        self.in_flight
    }

    /// Append a user message. Blank text is rejected.
    pub fn push_user(&mut self, text: &str) -> Result<Uuid, StreamError> {
        if text.trim().is_empty() {
            return Err(StreamError::Validation("message is empty".into()));
        }
        let message = ChatMessage::new(ChatRole::User, text);
        let id = message.id;
        self.messages.push(message);
        Ok(id)
    }

    /// Open an empty agent message to stream into.
    pub fn begin_agent_reply(&mut self) -> Result<Uuid, StreamError> {
        if self.in_flight.is_some() {
            return Err(StreamError::Busy);
        }
        let message = ChatMessage::new(ChatRole::Agent, "");
        let id = message.id;
        self.messages.push(message);
        self.in_flight = Some(id);
        Ok(id)
    }

    /// Append a fragment to the in-flight message. Returns `false` (and
    /// changes nothing) if `id` is not the in-flight message.
    pub fn append(&mut self, id: Uuid, fragment: &str) -> bool {
        if self.in_flight != Some(id) {
            return false;
        }
        match self.messages.iter_mut().rev().find(|m| m.id == id) {
            Some(message) => {
                message.text.push_str(fragment);
                true
            }
            None => false,
        }
    }

    /// Freeze the in-flight message.
    pub fn finish(&mut self, id: Uuid) {
        if self.in_flight == Some(id) {
            self.in_flight = None;
        }
    }

    /// Run one full chat turn: record the prompt, stream the reply into a new
    /// agent message, then freeze it.
    ///
    /// Each fragment is handed to `on_fragment` after it lands in the
    /// transcript. The agent message keeps whatever arrived even if the
    /// stream fails or is cancelled.
    pub async fn send<F>(
        &mut self,
        channel: &StreamingChannel,
        prompt: &str,
        cancel: &CancellationToken,
        mut on_fragment: F,
    ) -> Result<StreamSummary, StreamError>
    where
        F: FnMut(&str),
    {
        if self.in_flight.is_some() {
            return Err(StreamError::Busy);
        }
        self.push_user(prompt)?;
        let reply_id = self.begin_agent_reply()?;

        let result = channel
            .open(prompt, cancel, |fragment| {
                self.append(reply_id, fragment);
                on_fragment(fragment);
            })
            .await;

        self.finish(reply_id);
        result
    }
}

impl Default for ChatTranscript {
    fn default() -> Self {
        Self::new()
    }
}
