//! Unified error type for the tutor client.
//!
//! `TutorError` consolidates the domain error enums so callers can categorize,
//! log and present any failure the same way.

use std::fmt;

use super::category::ErrorCategory;
use super::config::ConfigError;
use super::context::ErrorContext;
use super::network::NetworkError;
use super::playback::PlaybackError;
use super::session::SessionError;
use super::stream::StreamError;

/// Unified error type for the tutor client.
#[derive(Debug, Clone, PartialEq)]
pub enum TutorError {
    /// Network-related errors (connections, HTTP status, timeouts).
    Network(NetworkError),

    /// Errors while reading an open response body.
    Stream(StreamError),

    /// Session lifecycle errors (empty topic, session already active).
    Session(SessionError),

    /// Audio playback errors.
    Playback(PlaybackError),

    /// Configuration and CLI errors.
    Config(ConfigError),

    /// Wrapped error with additional context.
    WithContext {
        error: Box<TutorError>,
        context: ErrorContext,
    },
}

impl TutorError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            TutorError::Network(NetworkError::HttpStatus { status, .. }) if *status >= 500 => {
                ErrorCategory::Server
            }
            TutorError::Network(NetworkError::HttpStatus { .. }) => ErrorCategory::Client,
            TutorError::Network(_) => ErrorCategory::Network,
            TutorError::Stream(_) => ErrorCategory::Network,
            TutorError::Session(_) => ErrorCategory::User,
            TutorError::Playback(PlaybackError::Spawn { .. }) => ErrorCategory::System,
            TutorError::Playback(_) => ErrorCategory::Playback,
            TutorError::Config(_) => ErrorCategory::Configuration,
            TutorError::WithContext { error, .. } => error.category(),
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            TutorError::Network(err) => err.is_retryable(),
            TutorError::Stream(err) => err.is_retryable(),
            TutorError::Session(_) | TutorError::Playback(_) | TutorError::Config(_) => false,
            TutorError::WithContext { error, .. } => error.is_retryable(),
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            TutorError::Network(err) => err.user_message(),
            TutorError::Stream(err) => err.user_message(),
            TutorError::Session(err) => err.user_message(),
            TutorError::Playback(err) => format!("Audio could not be played: {}", err),
            TutorError::Config(err) => err.user_message(),
            TutorError::WithContext { error, .. } => error.user_message(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            TutorError::Network(err) => err.error_code(),
            TutorError::Stream(err) => err.error_code(),
            TutorError::Session(err) => err.error_code(),
            TutorError::Playback(err) => err.error_code(),
            TutorError::Config(err) => err.error_code(),
            TutorError::WithContext { error, .. } => error.error_code(),
        }
    }

    /// Attach context to this error.
    pub fn with_context(self, ctx: ErrorContext) -> Self {
        TutorError::WithContext {
            error: Box::new(self),
            context: ctx,
        }
    }

    /// Get the context if this error has one attached.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            TutorError::WithContext { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Get the inner error without context.
    pub fn inner(&self) -> &TutorError {
        match self {
            TutorError::WithContext { error, .. } => error.inner(),
            _ => self,
        }
    }

    /// Get the recovery hint for this error.
    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }
}

impl fmt::Display for TutorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TutorError::Network(err) => write!(f, "{}", err),
            TutorError::Stream(err) => write!(f, "{}", err),
            TutorError::Session(err) => write!(f, "{}", err),
            TutorError::Playback(err) => write!(f, "{}", err),
            TutorError::Config(err) => write!(f, "{}", err),
            TutorError::WithContext { error, context } => write!(f, "{} ({})", error, context),
        }
    }
}

impl std::error::Error for TutorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TutorError::Network(err) => Some(err),
            TutorError::Stream(err) => Some(err),
            TutorError::Session(err) => Some(err),
            TutorError::Playback(err) => Some(err),
            TutorError::Config(err) => Some(err),
            TutorError::WithContext { error, .. } => error.source(),
        }
    }
}

// ============================================================================
// From implementations for automatic error conversion
// ============================================================================

impl From<NetworkError> for TutorError {
    fn from(err: NetworkError) -> Self {
        TutorError::Network(err)
    }
}

impl From<StreamError> for TutorError {
    fn from(err: StreamError) -> Self {
        TutorError::Stream(err)
    }
}

impl From<SessionError> for TutorError {
    fn from(err: SessionError) -> Self {
        TutorError::Session(err)
    }
}

impl From<PlaybackError> for TutorError {
    fn from(err: PlaybackError) -> Self {
        TutorError::Playback(err)
    }
}

impl From<ConfigError> for TutorError {
    fn from(err: ConfigError) -> Self {
        TutorError::Config(err)
    }
}

impl From<serde_json::Error> for TutorError {
    fn from(err: serde_json::Error) -> Self {
        TutorError::Network(NetworkError::InvalidResponse {
            message: err.to_string(),
        })
    }
}
