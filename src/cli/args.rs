//! Command-line argument parsing for the iris CLI.
//!
//! Everything that is not a flag is part of the message, so
//! `iris How is TCS doing?` works without quoting.

use crate::startup::IrisConfig;

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Send a message and stream the reply (default)
    Ask(AskArgs),
    /// The arguments could not be understood
    Usage(String),
}

/// Options for sending one message.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AskArgs {
    pub message: String,
    pub url: Option<String>,
    pub user: Option<String>,
    pub thread: Option<String>,
    pub verbose: bool,
}

impl AskArgs {
    /// Apply the flags on top of configuration read from the environment.
    pub fn apply(&self, mut config: IrisConfig) -> IrisConfig {
        if let Some(url) = &self.url {
            config = config.with_base_url(url.clone());
        }
        if let Some(user) = &self.user {
            config = config.with_user_identifier(user.clone());
        }
        if let Some(thread) = &self.thread {
            config = config.with_thread_id(thread.clone());
        }
        if self.verbose {
            config = config.with_log_level("debug");
        }
        config
    }
}

/// Parse command-line arguments and return the appropriate command.
///
/// # Examples
///
/// ```
/// use iris::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["iris".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut ask = AskArgs::default();
    let mut words: Vec<String> = Vec::new();
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        let slot = match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--verbose" | "-v" => {
                ask.verbose = true;
                continue;
            }
            "--url" => &mut ask.url,
            "--user" => &mut ask.user,
            "--thread" => &mut ask.thread,
            "--" => {
                words.extend(args.by_ref());
                break;
            }
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return CliCommand::Usage(format!("unknown option '{}'", flag));
            }
            _ => {
                words.push(arg);
                continue;
            }
        };
        match args.next() {
            Some(value) => *slot = Some(value),
            None => return CliCommand::Usage(format!("option '{}' needs a value", arg)),
        }
    }

    ask.message = words.join(" ");
    if ask.message.trim().is_empty() {
        return CliCommand::Usage("no message given".to_string());
    }
    CliCommand::Ask(ask)
}
