//! Configuration and command-line errors.

use std::fmt;
use std::path::PathBuf;

/// Configuration-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    Read { path: PathBuf, message: String },

    /// The config file is not valid JSON for the expected shape.
    Parse { path: PathBuf, message: String },

    /// A setting has a value that cannot be used.
    InvalidValue { key: String, value: String },

    /// A command-line flag is missing its value.
    MissingValue { flag: String },

    /// An unrecognized command-line flag.
    UnknownFlag { flag: String },
}

impl ConfigError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ConfigError::Read { path, .. } => {
                format!("Could not read config file {}.", path.display())
            }
            ConfigError::Parse { path, message } => {
                format!("Config file {} is invalid: {}", path.display(), message)
            }
            ConfigError::InvalidValue { key, value } => {
                format!("'{}' is not a valid value for {}.", value, key)
            }
            ConfigError::MissingValue { flag } => format!("{} requires a value.", flag),
            ConfigError::UnknownFlag { flag } => {
                format!("Unknown option '{}'. Run with --help for usage.", flag)
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::Read { .. } => "E_CFG_READ",
            ConfigError::Parse { .. } => "E_CFG_PARSE",
            ConfigError::InvalidValue { .. } => "E_CFG_VALUE",
            ConfigError::MissingValue { .. } => "E_CFG_MISSING",
            ConfigError::UnknownFlag { .. } => "E_CFG_FLAG",
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, message } => {
                write!(f, "Failed to read {}: {}", path.display(), message)
            }
            ConfigError::Parse { path, message } => {
                write!(f, "Failed to parse {}: {}", path.display(), message)
            }
            ConfigError::InvalidValue { key, value } => {
                write!(f, "Invalid value '{}' for {}", value, key)
            }
            ConfigError::MissingValue { flag } => write!(f, "Missing value for {}", flag),
            ConfigError::UnknownFlag { flag } => write!(f, "Unknown flag {}", flag),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_value_messages() {
        let err = ConfigError::InvalidValue {
            key: "TUTOR_READ_TIMEOUT_SECS".to_string(),
            value: "soon".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid value 'soon' for TUTOR_READ_TIMEOUT_SECS");
        assert!(err.user_message().contains("soon"));
    }

    #[test]
    fn test_unknown_flag_points_to_help() {
        let err = ConfigError::UnknownFlag {
            flag: "--loud".to_string(),
        };
        assert!(err.user_message().contains("--help"));
    }
}
