//! Audio playback errors.
//!
//! A playback error affects one item only: the queue logs it and moves on.

use std::fmt;

/// Failure to play a single audio item.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackError {
    /// The audio resource could not be downloaded.
    Fetch { url: String, message: String },

    /// The audio data could not be decoded.
    Decode { message: String },

    /// No usable audio output device.
    Output { message: String },

    /// The external player could not be started.
    Spawn { program: String, message: String },

    /// The external player exited unsuccessfully.
    ExitStatus { program: String, status: String },
}

impl PlaybackError {
    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            PlaybackError::Fetch { .. } => "E_PLAY_FETCH",
            PlaybackError::Decode { .. } => "E_PLAY_DECODE",
            PlaybackError::Output { .. } => "E_PLAY_OUTPUT",
            PlaybackError::Spawn { .. } => "E_PLAY_SPAWN",
            PlaybackError::ExitStatus { .. } => "E_PLAY_EXIT",
        }
    }
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackError::Fetch { url, message } => {
                write!(f, "failed to fetch audio from {}: {}", url, message)
            }
            PlaybackError::Decode { message } => write!(f, "failed to decode audio: {}", message),
            PlaybackError::Output { message } => {
                write!(f, "audio output unavailable: {}", message)
            }
            PlaybackError::Spawn { program, message } => {
                write!(f, "failed to start player '{}': {}", program, message)
            }
            PlaybackError::ExitStatus { program, status } => {
                write!(f, "player '{}' exited with {}", program, status)
            }
        }
    }
}

impl std::error::Error for PlaybackError {}
