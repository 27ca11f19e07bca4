//! Client configuration.
//!
//! Layered in increasing precedence: built-in defaults, the JSON config file,
//! `TUTOR_*` environment variables, then command-line flags.
//!
//! # Example
//!
//! ```ignore
//! use tutor::config::TutorConfig;
//!
//! let config = TutorConfig::load(None)?
//!     .with_base_url("http://tutor.local:5000")
//!     .with_audio_enabled(false);
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::error::ConfigError;
use crate::stream::TrailingRecordPolicy;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// External program used to play audio URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for PlayerCommand {
    fn default() -> Self {
        Self {
            program: "ffplay".to_string(),
            args: ["-nodisp", "-autoexit", "-loglevel", "quiet"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl PlayerCommand {
    /// Parse a whitespace-separated command line such as `mpv --no-video`.
    pub fn parse(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TutorConfig {
    /// Server base URL (default: http://localhost:5000)
    pub base_url: String,
    /// Path of the streaming endpoint (default: /)
    pub stream_path: String,
    /// Path of the text-to-speech endpoint (default: /tts)
    pub tts_path: String,
    /// Longest wait for the next chunk before the session is aborted
    pub read_timeout: Option<Duration>,
    /// What to do with an unterminated last record
    pub trailing_record: TrailingRecordPolicy,
    /// Program used to play audio
    pub player: PlayerCommand,
    /// Whether audio events are played at all
    pub audio_enabled: bool,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            stream_path: "/".to_string(),
            tts_path: "/tts".to_string(),
            read_timeout: None,
            trailing_record: TrailingRecordPolicy::Discard,
            player: PlayerCommand::default(),
            audio_enabled: true,
        }
    }
}

/// On-disk shape of the config file. Every key is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct ConfigFile {
    base_url: Option<String>,
    stream_path: Option<String>,
    tts_path: Option<String>,
    read_timeout_secs: Option<u64>,
    trailing_record: Option<TrailingRecordPolicy>,
    player: Option<PlayerCommand>,
    audio_enabled: Option<bool>,
}

impl TutorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location: `<config_dir>/tutor/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tutor").join("config.json"))
    }

    /// Defaults, then the config file (if present), then the environment.
    ///
    /// `path` overrides the default file location. A missing file is fine; an
    /// unreadable or malformed one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(Path::to_path_buf).or_else(Self::default_path);
        let mut config = Self::default();

        if let Some(path) = path.filter(|p| p.exists()) {
            config = config.merge_file(&path)?;
        }

        config.merge_env(|key| std::env::var(key).ok())
    }

    /// Overlay the values set in a JSON config file.
    pub fn merge_file(mut self, path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let file: ConfigFile = serde_json::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), "Loaded config file");

        if let Some(base_url) = file.base_url {
            self.base_url = base_url;
        }
        if let Some(stream_path) = file.stream_path {
            self.stream_path = stream_path;
        }
        if let Some(tts_path) = file.tts_path {
            self.tts_path = tts_path;
        }
        if let Some(secs) = file.read_timeout_secs {
            self.read_timeout = timeout_from_secs(secs);
        }
        if let Some(policy) = file.trailing_record {
            self.trailing_record = policy;
        }
        if let Some(player) = file.player {
            self.player = player;
        }
        if let Some(enabled) = file.audio_enabled {
            self.audio_enabled = enabled;
        }
        Ok(self)
    }

    /// Overlay `TUTOR_*` variables, looked up through `lookup`.
    pub fn merge_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup("TUTOR_BASE_URL").filter(|v| !v.trim().is_empty()) {
            self.base_url = base_url.trim().to_string();
        }
        if let Some(secs) = lookup("TUTOR_READ_TIMEOUT_SECS") {
            let parsed = secs
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "TUTOR_READ_TIMEOUT_SECS".to_string(),
                    value: secs.clone(),
                })?;
            self.read_timeout = timeout_from_secs(parsed);
        }
        if let Some(flush) = lookup("TUTOR_FLUSH_TRAILING") {
            if parse_bool("TUTOR_FLUSH_TRAILING", &flush)? {
                self.trailing_record = TrailingRecordPolicy::Flush;
            }
        }
        if let Some(player) = lookup("TUTOR_PLAYER") {
            self.player = PlayerCommand::parse(&player).ok_or(ConfigError::InvalidValue {
                key: "TUTOR_PLAYER".to_string(),
                value: player.clone(),
            })?;
        }
        if let Some(no_audio) = lookup("TUTOR_NO_AUDIO") {
            if parse_bool("TUTOR_NO_AUDIO", &no_audio)? {
                self.audio_enabled = false;
            }
        }
        Ok(self)
    }

    /// Set the server base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the streaming endpoint path.
    pub fn with_stream_path(mut self, path: impl Into<String>) -> Self {
        self.stream_path = path.into();
        self
    }

    /// Set the text-to-speech endpoint path.
    pub fn with_tts_path(mut self, path: impl Into<String>) -> Self {
        self.tts_path = path.into();
        self
    }

    /// Set the per-chunk read deadline.
    pub fn with_read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Set the trailing record policy.
    pub fn with_trailing_record(mut self, policy: TrailingRecordPolicy) -> Self {
        self.trailing_record = policy;
        self
    }

    /// Set the audio player command.
    pub fn with_player(mut self, player: PlayerCommand) -> Self {
        self.player = player;
        self
    }

    /// Enable or disable audio playback.
    pub fn with_audio_enabled(mut self, enabled: bool) -> Self {
        self.audio_enabled = enabled;
        self
    }
}

/// Zero means no deadline.
fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
