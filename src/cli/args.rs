//! Command-line argument parsing.
//!
//! Flags override the config file and environment; see
//! [`RunOptions::apply`].

use std::path::PathBuf;
use std::time::Duration;

use crate::config::TutorConfig;
use crate::error::ConfigError;
use crate::stream::TrailingRecordPolicy;

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Run the tutor (default)
    Run(RunOptions),
}

/// Options for a normal run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOptions {
    /// `--url`: server base URL
    pub url: Option<String>,
    /// `--config`: config file to use instead of the default location
    pub config_path: Option<PathBuf>,
    /// `--no-audio`
    pub no_audio: bool,
    /// `--timeout <secs>`; zero disables the deadline
    pub timeout_secs: Option<u64>,
    /// `--flush-trailing`
    pub flush_trailing: bool,
    /// `--speak`: one-shot text-to-speech, then exit
    pub speak: bool,
    /// Positional words, joined with spaces
    pub topic: Option<String>,
}

impl RunOptions {
    /// Overlay these flags on a loaded config.
    pub fn apply(&self, mut config: TutorConfig) -> TutorConfig {
        if let Some(url) = &self.url {
            config.base_url = url.clone();
        }
        if self.no_audio {
            config.audio_enabled = false;
        }
        if let Some(secs) = self.timeout_secs {
            config.read_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if self.flush_trailing {
            config.trailing_record = TrailingRecordPolicy::Flush;
        }
        config
    }
}

/// Parse command-line arguments (including the program name).
///
/// # Examples
///
/// ```
/// use tutor::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["tutor".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()).unwrap(), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ConfigError>
where
    I: Iterator<Item = String>,
{
    let mut options = RunOptions::default();
    let mut words: Vec<String> = Vec::new();
    // Skip the program name
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--no-audio" => options.no_audio = true,
            "--flush-trailing" => options.flush_trailing = true,
            "--speak" => options.speak = true,
            "--url" => options.url = Some(value_for(&arg, args.next())?),
            "--config" => options.config_path = Some(PathBuf::from(value_for(&arg, args.next())?)),
            "--timeout" => {
                let value = value_for(&arg, args.next())?;
                let secs = value.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                    key: arg.clone(),
                    value,
                })?;
                options.timeout_secs = Some(secs);
            }
            "--" => words.extend(args.by_ref()),
            flag if flag.starts_with("--") => {
                return Err(ConfigError::UnknownFlag {
                    flag: flag.to_string(),
                })
            }
            _ => words.push(arg),
        }
    }

    if !words.is_empty() {
        options.topic = Some(words.join(" "));
    }
    Ok(CliCommand::Run(options))
}

fn value_for(flag: &str, value: Option<String>) -> Result<String, ConfigError> {
    value
        .filter(|v| !v.starts_with("--"))
        .ok_or_else(|| ConfigError::MissingValue {
            flag: flag.to_string(),
        })
}
