//! Unified error type for the IRIS client.

use thiserror::Error;

use super::category::ErrorCategory;
use super::network::NetworkError;
use super::stream::StreamError;

/// Unified error type for the IRIS client.
///
/// Errors from the chat stream itself are delivered to the
/// [`StreamHandler`](crate::traits::StreamHandler); `IrisError` covers
/// everything around it (request construction, configuration, and the
/// pull-based [`IrisClient::events`](crate::client::IrisClient::events) API).
#[derive(Debug, Error)]
pub enum IrisError {
    /// Network-related errors (connection, HTTP status, timeouts).
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// Errors reading the event stream.
    #[error(transparent)]
    Stream(#[from] StreamError),

    /// A request field was empty.
    #[error("Invalid chat request: '{field}' must not be empty")]
    InvalidRequest { field: &'static str },

    /// Configuration could not be used.
    #[error("Invalid configuration: {message}")]
    Config { message: String },
}

impl IrisError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            IrisError::Network(NetworkError::HttpStatus { status, .. }) if *status >= 500 => {
                ErrorCategory::Server
            }
            IrisError::Network(_) => ErrorCategory::Network,
            IrisError::Stream(err) => match err {
                StreamError::ConnectionLost { .. } => ErrorCategory::Network,
                StreamError::MalformedFrame { .. } => ErrorCategory::Client,
                StreamError::Cancelled => ErrorCategory::User,
            },
            IrisError::InvalidRequest { .. } => ErrorCategory::User,
            IrisError::Config { .. } => ErrorCategory::Configuration,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            IrisError::Network(err) => err.is_retryable(),
            IrisError::Stream(err) => err.is_retryable(),
            IrisError::InvalidRequest { .. } | IrisError::Config { .. } => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            IrisError::Network(err) => err.user_message(),
            IrisError::Stream(err) => err.user_message(),
            IrisError::InvalidRequest { field } => {
                format!("Please provide a non-empty {}.", field.replace('_', " "))
            }
            IrisError::Config { message } => format!("Configuration problem: {}", message),
        }
    }

    /// What to show the person at the terminal: the friendly message, then
    /// a hint for the error's category.
    pub fn report(&self) -> String {
        format!("{}\n{}", self.user_message(), self.category().recovery_hint())
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            IrisError::Network(err) => err.error_code(),
            IrisError::Stream(err) => err.error_code(),
            IrisError::InvalidRequest { .. } => "E_REQUEST",
            IrisError::Config { .. } => "E_CONFIG",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_status_is_server_category() {
        let err: IrisError = NetworkError::HttpStatus {
            status: 502,
            message: "bad gateway".to_string(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Server);
        assert!(err.is_retryable());
        assert_eq!(err.error_code(), "E_NET_HTTP");
    }

    #[test]
    fn test_connection_failure_is_network_category() {
        let err: IrisError = NetworkError::ConnectionFailed {
            url: "http://localhost:8000".to_string(),
            message: "refused".to_string(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Network);
    }

    #[test]
    fn test_invalid_request_message() {
        let err = IrisError::InvalidRequest {
            field: "user_input",
        };
        assert_eq!(err.category(), ErrorCategory::User);
        assert!(!err.is_retryable());
        assert_eq!(err.user_message(), "Please provide a non-empty user input.");
        assert!(err.to_string().contains("user_input"));
    }

    #[test]
    fn test_stream_errors_are_transparent() {
        let err: IrisError = StreamError::ConnectionLost {
            message: "reset by peer".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Stream connection lost: reset by peer");
        assert_eq!(err.category(), ErrorCategory::Network);
    }

    #[test]
    fn test_report_adds_recovery_hint() {
        let err: IrisError = NetworkError::ConnectionFailed {
            url: "http://localhost:8000".to_string(),
            message: "refused".to_string(),
        }
        .into();
        let report = err.report();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], err.user_message());
        assert_eq!(lines[1], ErrorCategory::Network.recovery_hint());
    }

    #[test]
    fn test_config_error() {
        let err = IrisError::Config {
            message: "base URL is empty".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.error_code(), "E_CONFIG");
    }
}
