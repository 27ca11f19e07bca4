use std::fmt;

use crate::error::TutorError;
use crate::stream::StreamEvent;

/// Why a session stopped early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// Cancelled by the user or superseded by a new session
    Cancelled,
    /// No chunk arrived within the read deadline
    Deadline,
}

/// Lifecycle of one stream session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Active,
    Completed,
    Aborted(AbortReason),
    Failed(TutorError),
}

impl SessionState {
    /// Completed, aborted and failed sessions never change state again.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SessionState::Active)
    }

    /// Short name for logging
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Active => "active",
            SessionState::Completed => "completed",
            SessionState::Aborted(_) => "aborted",
            SessionState::Failed(_) => "failed",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Aborted(AbortReason::Deadline) => write!(f, "aborted (read deadline)"),
            SessionState::Failed(err) => write!(f, "failed: {}", err),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

/// Messages a running session sends to its owner.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionUpdate {
    /// A classified event, in record order
    Event {
        session_id: String,
        event: StreamEvent,
    },
    /// An audio item went into the session's playback queue
    AudioQueued { session_id: String, label: String },
    /// The session reached a terminal state; nothing follows for this id
    Finished {
        session_id: String,
        state: SessionState,
    },
}

impl SessionUpdate {
    pub fn session_id(&self) -> &str {
        match self {
            SessionUpdate::Event { session_id, .. }
            | SessionUpdate::AudioQueued { session_id, .. }
            | SessionUpdate::Finished { session_id, .. } => session_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkError;

    #[test]
    fn test_terminal_states() {
        assert!(!SessionState::Active.is_terminal());
        assert!(SessionState::Completed.is_terminal());
        assert!(SessionState::Aborted(AbortReason::Cancelled).is_terminal());
        assert!(SessionState::Failed(NetworkError::Cancelled.into()).is_terminal());
    }

    #[test]
    fn test_display() {
        assert_eq!(SessionState::Completed.to_string(), "completed");
        assert_eq!(
            SessionState::Aborted(AbortReason::Deadline).to_string(),
            "aborted (read deadline)"
        );
        let failed = SessionState::Failed(
            NetworkError::HttpStatus {
                status: 500,
                message: "boom".to_string(),
            }
            .into(),
        );
        assert!(failed.to_string().starts_with("failed: "));
    }
}
