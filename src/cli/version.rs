//! Version and usage output.

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const USAGE: &str = "\
Usage: tutor [OPTIONS] [TOPIC...]

Streams a tutoring session for TOPIC and plays its narration. Without a
topic, topics are read from standard input, one per line.

Options:
  --url <URL>         Server base URL (default http://localhost:5000)
  --config <PATH>     Config file (default <config dir>/tutor/config.json)
  --timeout <SECS>    Abort a session when no data arrives for SECS (0 = never)
  --flush-trailing    Keep an unterminated last record instead of dropping it
  --no-audio          Do not play narration
  --speak             Play the server's text-to-speech sample and exit
  -V, --version       Print version
  -h, --help          Print this help

Commands at the prompt:
  /reset              Start the conversation over
  /speak              Play the text-to-speech sample
  /quit               Exit

Ctrl-C stops the current response; with nothing streaming it exits.";

pub fn version_string() -> String {
    format!("tutor {}", VERSION)
}
