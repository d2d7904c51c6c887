//! Network-related error types.
//!
//! Errors raised while establishing the chat stream or reading its body.

use std::fmt;

use crate::traits::HttpError;

/// Network-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// Connection to the server failed.
    ConnectionFailed {
        url: String,
        message: String,
    },

    /// Request timed out.
    Timeout {
        operation: String,
    },

    /// HTTP status error (non-2xx response).
    HttpStatus {
        status: u16,
        message: String,
    },

    /// The URL could not be used to build a request.
    InvalidUrl {
        url: String,
    },

    /// Response could not be read as an event stream.
    InvalidResponse {
        message: String,
    },


    /// Generic network error.
    Other {
        message: String,
    },
}

impl NetworkError {
    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            NetworkError::ConnectionFailed { .. } => true,
            NetworkError::Timeout { .. } => true,
            NetworkError::HttpStatus { status, .. } => {
                *status >= 500 || *status == 429 || *status == 408
            }
            NetworkError::InvalidUrl { .. } => false,
            NetworkError::InvalidResponse { .. } => false,
            NetworkError::Other { .. } => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            NetworkError::ConnectionFailed { .. } => {
                "Unable to connect to the IRIS server. Please check your connection.".to_string()
            }
            NetworkError::Timeout { operation } => {
                format!("The {} timed out. The server may be slow or unreachable.", operation)
            }
            NetworkError::HttpStatus { status, .. } => match *status {
                400 => "The request was invalid. Please try again.".to_string(),
                401 | 403 => "You are not allowed to use this assistant.".to_string(),
                404 => "The chat endpoint was not found on the server.".to_string(),
                429 => "Too many requests. Please wait a moment and try again.".to_string(),
                500..=599 => "The server is experiencing issues. Please try again later.".to_string(),
                _ => format!("The server returned an error (HTTP {}).", status),
            },
            NetworkError::InvalidUrl { url } => format!("'{}' is not a usable server URL.", url),
            NetworkError::InvalidResponse { .. } => {
                "Received an invalid response from the server. Please try again.".to_string()
            }
            NetworkError::Other { message } => format!("Network error: {}", message),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed { .. } => "E_NET_CONN",
            NetworkError::Timeout { .. } => "E_NET_TIMEOUT",
            NetworkError::HttpStatus { .. } => "E_NET_HTTP",
            NetworkError::InvalidUrl { .. } => "E_NET_URL",
            NetworkError::InvalidResponse { .. } => "E_NET_INVALID",
            NetworkError::Other { .. } => "E_NET_OTHER",
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::ConnectionFailed { url, message } => {
                write!(f, "Connection failed to '{}': {}", url, message)
            }
            NetworkError::Timeout { operation } => write!(f, "{} timed out", operation),
            NetworkError::HttpStatus { status, message } => {
                write!(f, "HTTP {} error: {}", status, message)
            }
            NetworkError::InvalidUrl { url } => write!(f, "Invalid URL: {}", url),
            NetworkError::InvalidResponse { message } => {
                write!(f, "Invalid response: {}", message)
            }
            NetworkError::Other { message } => write!(f, "Network error: {}", message),
        }
    }
}

impl std::error::Error for NetworkError {}

/// Classify a transport error from the [`HttpClient`](crate::traits::HttpClient)
/// seam into a [`NetworkError`].
pub fn classify_http_error(err: &HttpError, url: &str) -> NetworkError {
    match err {
        HttpError::ConnectionFailed(message) => NetworkError::ConnectionFailed {
            url: url.to_string(),
            message: message.clone(),
        },
        HttpError::Timeout(_) => NetworkError::Timeout {
            operation: "chat stream request".to_string(),
        },
        HttpError::ServerError { status, message } => NetworkError::HttpStatus {
            status: *status,
            message: message.clone(),
        },
        HttpError::InvalidUrl(_) => NetworkError::InvalidUrl {
            url: url.to_string(),
        },
        HttpError::Io(message) => NetworkError::InvalidResponse {
            message: message.clone(),
        },
        HttpError::Other(message) => NetworkError::Other {
            message: message.clone(),
        },
    }
}
