//! Streaming-related error types.
//!
//! Errors that occur while reading the chat event stream after the
//! connection has been established.

use std::fmt;

use crate::sse::SseParseError;

/// Stream-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamError {
    /// The body stream failed part-way through.
    ConnectionLost {
        message: String,
    },

    /// An event block could not be decoded.
    MalformedFrame {
        event_type: Option<String>,
        message: String,
    },

    /// The stream was cancelled by the caller.
    Cancelled,
}

impl StreamError {
    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StreamError::ConnectionLost { .. })
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            StreamError::ConnectionLost { .. } => {
                "Connection to the server was lost before the reply finished.".to_string()
            }
            StreamError::MalformedFrame { .. } => {
                "Received invalid data from server. Please try again.".to_string()
            }
            StreamError::Cancelled => "The reply was cancelled.".to_string(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::ConnectionLost { .. } => "E_STREAM_CONN",
            StreamError::MalformedFrame { .. } => "E_STREAM_FRAME",
            StreamError::Cancelled => "E_STREAM_CANCEL",
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::ConnectionLost { message } => {
                write!(f, "Stream connection lost: {}", message)
            }
            StreamError::MalformedFrame {
                event_type: Some(event_type),
                message,
            } => write!(f, "Malformed {} event: {}", event_type, message),
            StreamError::MalformedFrame {
                event_type: None,
                message,
            } => write!(f, "Malformed event block: {}", message),
            StreamError::Cancelled => write!(f, "Stream cancelled"),
        }
    }
}

impl std::error::Error for StreamError {}

impl From<SseParseError> for StreamError {
    fn from(err: SseParseError) -> Self {
        StreamError::MalformedFrame {
            event_type: err.event_type().map(str::to_string),
            message: err.to_string(),
        }
    }
}
