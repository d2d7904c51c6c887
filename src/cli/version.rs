//! Version and usage output for the iris CLI.

/// The current version of iris, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const USAGE: &str = "\
Usage: iris [OPTIONS] <message...>

Ask the IRIS assistant a question and stream the answer.

Options:
  --url <URL>       Backend base URL (env: IRIS_API_URL)
  --user <ID>       User identifier (env: IRIS_USER_ID)
  --thread <ID>     Thread to continue (env: IRIS_THREAD_ID, default: new thread)
  -v, --verbose     Log at debug level
  -V, --version     Print version
  -h, --help        Print this help
";

/// Handle the --version command.
///
/// Prints the version string and exits successfully.
pub fn handle_version_command() -> ! {
    println!("iris {}", VERSION);
    std::process::exit(0)
}

pub fn handle_help_command() {
    print!("{}", USAGE);
}
