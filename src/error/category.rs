//! Error category classification for unified error handling.
//!
//! Categories drive how a failure is surfaced: whether it ends up inline in
//! the conversation, in the log only, or as a message on the prompt.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (connection refused, dropped body, timeout).
    /// Generally transient and retryable.
    Network,

    /// Backend errors (HTTP 5xx, protocol `error` records).
    /// Generally transient and retryable after delay.
    Server,

    /// Client-side errors (bugs, invalid state).
    Client,

    /// User action required (empty topic, session already running).
    User,

    /// Audio output errors. Never interrupt the text stream.
    Playback,

    /// System/OS errors (filesystem, process spawning).
    System,

    /// Configuration errors (bad config file, bad environment value).
    Configuration,
}

impl ErrorCategory {
    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::User => "user",
            ErrorCategory::Playback => "playback",
            ErrorCategory::System => "system",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check your connection and that the tutor server is running",
            ErrorCategory::Server => {
                "The server may be experiencing issues. Please try again later"
            }
            ErrorCategory::Client => "This may be a bug. Please report this issue if it persists",
            ErrorCategory::User => "Please check your input and try again",
            ErrorCategory::Playback => "Check the configured audio player or run with --no-audio",
            ErrorCategory::System => "Check file permissions and installed programs",
            ErrorCategory::Configuration => "Check your configuration file and TUTOR_* variables",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_as_str() {
        assert_eq!(ErrorCategory::Network.as_str(), "network");
        assert_eq!(ErrorCategory::Server.as_str(), "server");
        assert_eq!(ErrorCategory::Playback.as_str(), "playback");
        assert_eq!(ErrorCategory::Configuration.as_str(), "configuration");
    }

    #[test]
    fn test_category_display() {
        assert_eq!(format!("{}", ErrorCategory::Network), "network");
        assert_eq!(format!("{}", ErrorCategory::User), "user");
    }

    #[test]
    fn test_category_recovery_hint() {
        assert!(ErrorCategory::Network.recovery_hint().contains("connection"));
        assert!(ErrorCategory::Playback.recovery_hint().contains("--no-audio"));
        assert!(ErrorCategory::Server.recovery_hint().contains("try again"));
    }
}
