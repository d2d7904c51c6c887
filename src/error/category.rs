//! Error category classification.
//!
//! Categories decide which recovery hint the person at the terminal sees.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection, DNS, timeout. Generally transient.
    Network,

    /// Backend-side errors (HTTP 5xx).
    Server,

    /// Client-side errors such as frames this client cannot decode.
    Client,

    /// The caller supplied something invalid (empty message, missing id).
    User,

    /// Missing or invalid settings.
    Configuration,
}

impl ErrorCategory {
    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::User => "user",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check that the IRIS backend is reachable and try again.",
            ErrorCategory::Server => "The backend reported a problem. Try again in a moment.",
            ErrorCategory::Client => "Update the client; it received data it does not understand.",
            ErrorCategory::User => "Check the message, user and thread you supplied.",
            ErrorCategory::Configuration => {
                "Check IRIS_API_URL and the other IRIS_* environment variables."
            }
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
