//! Client configuration.
//!
//! Settings come from `IRIS_*` environment variables and can be overridden
//! with the builder methods (the CLI applies its flags this way).

use std::time::Duration;

use crate::error::{IrisError, IrisResult};

/// Base URL used when `IRIS_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// User identifier used when `IRIS_USER_ID` is not set.
pub const DEFAULT_USER_ID: &str = "anonymous";

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the IRIS client.
///
/// # Example
///
/// ```
/// use iris::startup::IrisConfig;
///
/// let config = IrisConfig::default()
///     .with_base_url("https://iris.example.com")
///     .with_user_identifier("u1");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IrisConfig {
    /// Backend base URL, without the endpoint path
    pub base_url: String,
    /// Identifier sent as `user_identifier`
    pub user_identifier: String,
    /// Thread to continue; a new one is started when `None`
    pub thread_id: Option<String>,
    /// Bound on establishing the connection (not on the reply)
    pub connect_timeout: Duration,
    /// Default log level when `RUST_LOG` is not set
    pub log_level: String,
}

impl Default for IrisConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            user_identifier: DEFAULT_USER_ID.to_string(),
            thread_id: None,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            log_level: "info".to_string(),
        }
    }
}

impl IrisConfig {
    /// Create a new IrisConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> IrisResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its
    /// value. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> IrisResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get("IRIS_API_URL") {
            config = config.with_base_url(url);
        }
        if let Some(user) = get("IRIS_USER_ID") {
            config.user_identifier = user;
        }
        if let Some(thread) = get("IRIS_THREAD_ID") {
            config.thread_id = Some(thread);
        }
        if let Some(secs) = get("IRIS_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| IrisError::Config {
                message: format!("IRIS_TIMEOUT_SECS must be a whole number of seconds, got '{}'", secs),
            })?;
            config.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(level) = get("IRIS_LOG") {
            config.log_level = level;
        }

        Ok(config)
    }

    /// Set the backend base URL. A trailing slash is dropped.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_user_identifier(mut self, user: impl Into<String>) -> Self {
        self.user_identifier = user.into();
        self
    }

    pub fn with_thread_id(mut self, thread_id: impl Into<String>) -> Self {
        self.thread_id = Some(thread_id.into());
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Check that the configuration can be used to reach a backend.
    pub fn validate(&self) -> IrisResult<()> {
        if self.base_url.is_empty() {
            return Err(IrisError::Config {
                message: "base URL is empty".to_string(),
            });
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(IrisError::Config {
                message: format!("base URL must start with http:// or https://, got '{}'", self.base_url),
            });
        }
        if self.user_identifier.trim().is_empty() {
            return Err(IrisError::Config {
                message: "user identifier is empty".to_string(),
            });
        }
        Ok(())
    }
}
