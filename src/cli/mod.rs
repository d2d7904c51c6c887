//! CLI module for iris.
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing
//! - Version and usage display
//!
//! # Usage
//!
//! ```ignore
//! use iris::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args());
//! if let Some(result) = run_cli_command(&command) {
//!     // Version, help or a usage error: nothing to stream
//! }
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, AskArgs, CliCommand};
pub use version::{handle_help_command, handle_version_command, USAGE, VERSION};

use color_eyre::eyre::eyre;
use color_eyre::Result;

/// Run a CLI command that does not need the backend.
///
/// # Returns
///
/// * `None` - If the command is `Ask` (the caller streams the reply)
/// * `Some(Ok(()))` - If help was printed
/// * `Some(Err(e))` - If the arguments were invalid
///
/// # Note
///
/// The `Version` command never returns as it calls `std::process::exit(0)`.
pub fn run_cli_command(command: &CliCommand) -> Option<Result<()>> {
    match command {
        CliCommand::Version => handle_version_command(),
        CliCommand::Help => {
            handle_help_command();
            Some(Ok(()))
        }
        CliCommand::Usage(problem) => Some(Err(eyre!("{}\n\n{}", problem, USAGE))),
        CliCommand::Ask(_) => None,
    }
}
