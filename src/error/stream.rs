//! Streaming-related error types.
//!
//! Errors that occur after the response body has started arriving. Records
//! that fail to classify are never errors; they become literal text.

use std::fmt;

/// Stream-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamError {
    /// The body stream failed part-way through.
    ConnectionLost {
        message: String,
        records_received: usize,
    },

    /// Generic stream error.
    Other {
        message: String,
    },
}

impl StreamError {
    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StreamError::ConnectionLost { .. })
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            StreamError::ConnectionLost { .. } => {
                "I'm having trouble connecting right now. Please check your connection and try again."
                    .to_string()
            }
            StreamError::Other { message } => format!("Stream error: {}", message),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::ConnectionLost { .. } => "E_STREAM_LOST",
            StreamError::Other { .. } => "E_STREAM_OTHER",
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::ConnectionLost {
                message,
                records_received,
            } => write!(
                f,
                "Stream lost after {} records: {}",
                records_received, message
            ),
            StreamError::Other { message } => write!(f, "Stream error: {}", message),
        }
    }
}

impl std::error::Error for StreamError {}
