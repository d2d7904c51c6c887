//! Startup concerns for the `iris` binary: configuration and logging.
//!
//! - [`config`] - [`IrisConfig`] from `IRIS_*` variables and CLI overrides
//! - [`logging`] - `tracing` subscriber setup

pub mod config;
pub mod logging;

pub use config::{IrisConfig, DEFAULT_API_URL, DEFAULT_USER_ID};
pub use logging::init_logging;
