//! Incremental assembly of the assistant's answer.

use tracing::{debug, trace};

use crate::error::{NetworkError, StreamError, TutorError};
use crate::models::Message;
use crate::session::SessionState;
use crate::stream::StreamEvent;

const CONNECTION_FAILURE_TEXT: &str =
    "I'm having trouble connecting right now. Please check your connection and try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
enum AssemblerState {
    AwaitingTurn,
    Appending {
        session_id: String,
        message_index: usize,
    },
    Closed,
}

/// State machine over the in-progress turn.
///
/// Only the session that opened the turn may append to it, and only until
/// that session ends. Anything else is discarded.
#[derive(Debug, Clone)]
pub struct ResponseAssembler {
    state: AssemblerState,
}

impl Default for ResponseAssembler {
    fn default() -> Self {
        Self {
            state: AssemblerState::AwaitingTurn,
        }
    }
}

impl ResponseAssembler {
    /// Start appending to the assistant message at `message_index`.
    pub fn open(&mut self, session_id: &str, message_index: usize) {
        self.state = AssemblerState::Appending {
            session_id: session_id.to_string(),
            message_index,
        };
    }

    /// Apply one event, returning the text that was appended.
    pub fn apply(
        &mut self,
        session_id: &str,
        event: &StreamEvent,
        messages: &mut [Message],
    ) -> Option<String> {
        let message = self.open_message(session_id, messages)?;
        let contribution = event.text_contribution()?;
        trace!(event = event.event_type(), len = contribution.len(), "Appending");
        message.append_token(&contribution);
        Some(contribution)
    }

    /// Close the turn for a finished session.
    ///
    /// A failed session gets one inline failure message; completed and
    /// aborted sessions append nothing.
    pub fn close(
        &mut self,
        session_id: &str,
        state: &SessionState,
        messages: &mut [Message],
    ) -> Option<String> {
        if !state.is_terminal() {
            return None;
        }

        let message = self.open_message(session_id, messages)?;
        let appended = match state {
            SessionState::Failed(err) => {
                let text = failure_text(err);
                message.append_token(&text);
                Some(text)
            }
            _ => None,
        };
        message.finalize();

        debug!(session_id = %session_id, state = state.as_str(), "Turn closed");
        self.state = AssemblerState::Closed;
        appended
    }

    /// Drop the current turn without touching any message.
    pub fn reset(&mut self) {
        self.state = AssemblerState::AwaitingTurn;
    }

    pub fn is_appending(&self) -> bool {
        matches!(self.state, AssemblerState::Appending { .. })
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, AssemblerState::Closed)
    }

    /// Session currently allowed to append, if any
    pub fn session_id(&self) -> Option<&str> {
        match &self.state {
            AssemblerState::Appending { session_id, .. } => Some(session_id),
            _ => None,
        }
    }

    fn open_message<'a>(
        &self,
        session_id: &str,
        messages: &'a mut [Message],
    ) -> Option<&'a mut Message> {
        match &self.state {
            AssemblerState::Appending {
                session_id: open_id,
                message_index,
            } if open_id == session_id => messages.get_mut(*message_index),
            _ => {
                trace!(session_id = %session_id, "Discarding update for a turn that is not open");
                None
            }
        }
    }
}

/// Inline text shown for a transport failure.
fn failure_text(err: &TutorError) -> String {
    match err.inner() {
        TutorError::Network(NetworkError::HttpStatus { .. }) => err.user_message(),
        TutorError::Network(_) | TutorError::Stream(StreamError::ConnectionLost { .. }) => {
            CONNECTION_FAILURE_TEXT.to_string()
        }
        other => other.user_message(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::AbortReason;

    fn text(s: &str) -> StreamEvent {
        StreamEvent::Text {
            content: s.to_string(),
        }
    }

    fn opened(session_id: &str) -> (ResponseAssembler, Vec<Message>) {
        let mut assembler = ResponseAssembler::default();
        let messages = vec![Message::user(1, "topic"), Message::streaming_assistant(2)];
        assembler.open(session_id, 1);
        (assembler, messages)
    }

    #[test]
    fn test_text_events_concatenate() {
        let (mut assembler, mut messages) = opened("s1");
        assembler.apply("s1", &text("Hi"), &mut messages);
        assembler.apply("s1", &text(" there"), &mut messages);
        assert_eq!(messages[1].content, "Hi there");
    }

    #[test]
    fn test_raw_and_error_contributions() {
        let (mut assembler, mut messages) = opened("s1");
        assembler.apply(
            "s1",
            &StreamEvent::Raw {
                content: "not json".to_string(),
            },
            &mut messages,
        );
        let appended = assembler.apply(
            "s1",
            &StreamEvent::Error {
                message: "rate limited".to_string(),
            },
            &mut messages,
        );
        assert_eq!(appended.as_deref(), Some("⚠️ rate limited"));
        assert_eq!(messages[1].content, "not json⚠️ rate limited");
    }

    #[test]
    fn test_audio_and_unit_end_append_nothing() {
        let (mut assembler, mut messages) = opened("s1");
        let audio = StreamEvent::Audio {
            url: "u".to_string(),
            unit: "Unit 1".to_string(),
            part_index: None,
        };
        assert!(assembler.apply("s1", &audio, &mut messages).is_none());
        assert!(assembler
            .apply(
                "s1",
                &StreamEvent::UnitEnd {
                    content: "Completed Unit 1".to_string()
                },
                &mut messages
            )
            .is_none());
        assert!(messages[1].content.is_empty());
    }

    #[test]
    fn test_events_from_other_sessions_discarded() {
        let (mut assembler, mut messages) = opened("s2");
        assert!(assembler.apply("s1", &text("stale"), &mut messages).is_none());
        assert!(messages[1].content.is_empty());
    }

    #[test]
    fn test_closed_turn_discards_events() {
        let (mut assembler, mut messages) = opened("s1");
        assembler.apply("s1", &text("partial"), &mut messages);
        assembler.close("s1", &SessionState::Aborted(AbortReason::Cancelled), &mut messages);

        assert!(assembler.is_closed());
        assert!(!messages[1].is_streaming);
        assert!(assembler.apply("s1", &text(" late"), &mut messages).is_none());
        assert_eq!(messages[1].content, "partial");
    }

    #[test]
    fn test_http_status_failure_text() {
        let (mut assembler, mut messages) = opened("s1");
        let failed = SessionState::Failed(
            NetworkError::HttpStatus {
                status: 500,
                message: "Internal Server Error".to_string(),
            }
            .into(),
        );
        assembler.close("s1", &failed, &mut messages);
        assert_eq!(
            messages[1].content,
            "I apologize, but I encountered an error (500). Please try again."
        );
    }

    #[test]
    fn test_connection_failure_text_keeps_partial_content() {
        let (mut assembler, mut messages) = opened("s1");
        assembler.apply("s1", &text("Photosynthesis is "), &mut messages);
        let failed = SessionState::Failed(
            StreamError::ConnectionLost {
                message: "reset".to_string(),
                records_received: 1,
            }
            .into(),
        );
        assembler.close("s1", &failed, &mut messages);
        assert_eq!(
            messages[1].content,
            format!("Photosynthesis is {}", CONNECTION_FAILURE_TEXT)
        );
    }

    #[test]
    fn test_timeout_uses_connection_text() {
        let err: TutorError = NetworkError::Timeout {
            operation: "request".to_string(),
        }
        .into();
        assert_eq!(failure_text(&err), CONNECTION_FAILURE_TEXT);
    }
}
