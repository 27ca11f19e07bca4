//! The visible conversation: message history plus the turn being assembled.

mod assembler;

pub use assembler::ResponseAssembler;

use tracing::debug;

use crate::models::{Message, MessageRole};
use crate::session::SessionState;
use crate::stream::StreamEvent;

/// First assistant message of every conversation.
pub const GREETING: &str = "Hello! I'm your AI tutor. I'm here to help you learn anything you're curious about. What would you like to explore today?";

/// Ordered message history with at most one open assistant message.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
    next_id: u64,
    assembler: ResponseAssembler,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    /// A conversation holding only the greeting
    pub fn new() -> Self {
        let mut conversation = Self {
            messages: Vec::new(),
            next_id: 1,
            assembler: ResponseAssembler::default(),
        };
        conversation.push(Message::assistant(0, GREETING));
        conversation
    }

    /// Push the user's topic and an empty assistant message for `session_id`.
    ///
    /// Any turn still open is closed first without appending to it.
    pub fn begin_turn(&mut self, session_id: &str, topic: &str) {
        if let Some(open) = self.assembler.session_id().map(str::to_string) {
            debug!(session_id = %open, "Superseding open turn");
            self.assembler.close(
                &open,
                &SessionState::Aborted(crate::session::AbortReason::Cancelled),
                &mut self.messages,
            );
        }

        self.push(Message::user(0, topic));
        let index = self.push(Message::streaming_assistant(0));
        self.assembler.open(session_id, index);
    }

    /// Apply a session event; returns the appended text, if any.
    pub fn apply(&mut self, session_id: &str, event: &StreamEvent) -> Option<String> {
        self.assembler.apply(session_id, event, &mut self.messages)
    }

    /// Close the turn for a finished session; returns any failure text appended.
    pub fn finish(&mut self, session_id: &str, state: &SessionState) -> Option<String> {
        self.assembler.close(session_id, state, &mut self.messages)
    }

    /// Back to just the greeting.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.assembler.reset();
        self.push(Message::assistant(0, GREETING));
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The open assistant message, if a turn is in progress
    pub fn open_message(&self) -> Option<&Message> {
        if !self.assembler.is_appending() {
            return None;
        }
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::Assistant && m.is_streaming)
    }

    pub fn is_turn_open(&self) -> bool {
        self.assembler.is_appending()
    }

    /// Session whose turn is open, if any
    pub fn turn_session_id(&self) -> Option<&str> {
        self.assembler.session_id()
    }

    fn push(&mut self, mut message: Message) -> usize {
        message.id = self.next_id;
        self.next_id += 1;
        self.messages.push(message);
        self.messages.len() - 1
    }
}
