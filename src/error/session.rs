//! Session lifecycle errors.
//!
//! Returned by `SessionController::start` when a session cannot be opened.
//! These fail fast: no transport is opened.

use std::fmt;

/// Session-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// The topic was empty or whitespace only.
    EmptyTopic,

    /// Another session is active and has not been cancelled.
    AlreadyActive { session_id: String },
}

impl SessionError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            SessionError::EmptyTopic => "Please enter a topic to learn about.".to_string(),
            SessionError::AlreadyActive { .. } => {
                "A response is still streaming. Press Ctrl-C to stop it first.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            SessionError::EmptyTopic => "E_SESSION_EMPTY",
            SessionError::AlreadyActive { .. } => "E_SESSION_ACTIVE",
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::EmptyTopic => write!(f, "Topic is empty"),
            SessionError::AlreadyActive { session_id } => {
                write!(f, "Session {} is still active", session_id)
            }
        }
    }
}

impl std::error::Error for SessionError {}
