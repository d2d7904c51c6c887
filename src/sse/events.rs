//! Event types for the IRIS chat stream.

use crate::models::UiComponent;

/// Represents a parsed SSE line
#[derive(Debug, Clone, PartialEq)]
pub enum SseLine {
    /// Event type declaration (e.g., "event: text_chunk")
    Event(String),
    /// Data payload (e.g., "data: {\"chunk\": \"hello\"}")
    Data(String),
    /// Empty line
    Empty,
    /// Comment line (starts with ':') or a line this client doesn't use
    Comment(String),
}

/// One decoded event from the chat stream.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// Ordered batch of UI component descriptors
    UiComponent(Vec<UiComponent>),
    /// Incremental fragment of the reply text
    TextChunk { chunk: String },
    /// The backend stored the message under this id
    MessageComplete { message_id: i64 },
    /// Backend-reported failure; does not end the stream by itself
    Error { error: String },
    /// Terminal event: nothing after it is read
    End,
}

impl StreamEvent {
    /// Wire name of the event.
    pub fn event_name(&self) -> &'static str {
        match self {
            StreamEvent::UiComponent(_) => "ui_component",
            StreamEvent::TextChunk { .. } => "text_chunk",
            StreamEvent::MessageComplete { .. } => "message_complete",
            StreamEvent::Error { .. } => "error",
            StreamEvent::End => "end",
        }
    }

    /// Only `end` stops the read loop.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::End)
    }
}

/// Why an event block could not be decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum SseParseError {
    /// Block has data but no `event:` line
    MissingEvent,
    /// Block has no `data:` line for an event that needs a payload
    MissingData { event_type: String },
    /// Data is not valid JSON, or not the shape this event carries
    InvalidJson { event_type: String, source: String },
}

impl SseParseError {
    /// The event name of the offending block, when it had one.
    pub fn event_type(&self) -> Option<&str> {
        match self {
            SseParseError::MissingEvent => None,
            SseParseError::MissingData { event_type }
            | SseParseError::InvalidJson { event_type, .. } => Some(event_type),
        }
    }
}

impl std::fmt::Display for SseParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SseParseError::MissingEvent => write!(f, "Missing event line in SSE block"),
            SseParseError::MissingData { event_type } => {
                write!(f, "Missing data for event type: {}", event_type)
            }
            SseParseError::InvalidJson { event_type, source } => {
                write!(f, "Invalid JSON for event '{}': {}", event_type, source)
            }
        }
    }
}

impl std::error::Error for SseParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(StreamEvent::UiComponent(vec![]).event_name(), "ui_component");
        assert_eq!(
            StreamEvent::TextChunk {
                chunk: String::new()
            }
            .event_name(),
            "text_chunk"
        );
        assert_eq!(
            StreamEvent::MessageComplete { message_id: 1 }.event_name(),
            "message_complete"
        );
        assert_eq!(
            StreamEvent::Error {
                error: String::new()
            }
            .event_name(),
            "error"
        );
        assert_eq!(StreamEvent::End.event_name(), "end");
    }

    #[test]
    fn test_only_end_is_terminal() {
        assert!(StreamEvent::End.is_terminal());
        assert!(!StreamEvent::Error {
            error: "boom".to_string()
        }
        .is_terminal());
    }

    #[test]
    fn test_parse_error_display() {
        assert_eq!(
            SseParseError::MissingData {
                event_type: "text_chunk".to_string()
            }
            .to_string(),
            "Missing data for event type: text_chunk"
        );
        assert_eq!(
            SseParseError::InvalidJson {
                event_type: "error".to_string(),
                source: "expected value".to_string()
            }
            .to_string(),
            "Invalid JSON for event 'error': expected value"
        );
    }
}
