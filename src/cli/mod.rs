//! Command-line interface.
//!
//! The dispatcher is called early in main(), before any runtime work:
//!
//! ```ignore
//! use tutor::cli::{parse_args, run_cli_command, CliCommand};
//!
//! let command = parse_args(std::env::args())?;
//! if run_cli_command(&command) {
//!     return Ok(());
//! }
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, CliCommand, RunOptions};
pub use version::{version_string, USAGE, VERSION};

/// Handle commands that only print something.
///
/// Returns `true` if the command was handled and the program should exit.
pub fn run_cli_command(command: &CliCommand) -> bool {
    match command {
        CliCommand::Version => {
            println!("{}", version_string());
            true
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            true
        }
        CliCommand::Run(_) => false,
    }
}
