//! Line and block parsing for the chat stream.

use serde::de::DeserializeOwned;

use super::events::{SseLine, SseParseError, StreamEvent};
use super::payloads::{ErrorPayload, MessageCompletePayload, TextChunkPayload, UiComponentPayload};

/// Result of parsing one complete event block.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedBlock {
    /// A known event
    Event(StreamEvent),
    /// Well-formed block with an event name this client doesn't handle
    Ignored { event_type: String },
    /// Nothing but comments or blank lines (keep-alives)
    Empty,
}

/// Parse a single SSE line into its component type
pub fn parse_sse_line(line: &str) -> SseLine {
    if line.is_empty() {
        return SseLine::Empty;
    }

    if let Some(stripped) = line.strip_prefix(':') {
        return SseLine::Comment(stripped.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("event:") {
        return SseLine::Event(rest.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("data:") {
        return SseLine::Data(rest.trim().to_string());
    }

    // Unknown line format - treat as comment
    SseLine::Comment(line.to_string())
}

/// Parse one event block (the text between two blank-line separators).
pub fn parse_event_block(block: &str) -> Result<ParsedBlock, SseParseError> {
    let mut event_type: Option<String> = None;
    let mut data_lines: Vec<String> = Vec::new();

    for line in block.split('\n') {
        match parse_sse_line(line.trim_end_matches('\r')) {
            SseLine::Event(name) => event_type = Some(name),
            SseLine::Data(data) => data_lines.push(data),
            SseLine::Empty | SseLine::Comment(_) => {}
        }
    }

    let data = if data_lines.is_empty() {
        None
    } else {
        Some(data_lines.join("\n"))
    };

    match (event_type, data) {
        (None, None) => Ok(ParsedBlock::Empty),
        (None, Some(_)) => Err(SseParseError::MissingEvent),
        (Some(event_type), data) => parse_stream_event(&event_type, data.as_deref()),
    }
}

/// Decode the payload of a named event.
///
/// `end` needs no payload and its data, if any, is not inspected.
pub fn parse_stream_event(event_type: &str, data: Option<&str>) -> Result<ParsedBlock, SseParseError> {
    let event = match event_type {
        "end" => StreamEvent::End,
        "ui_component" => {
            let payload: UiComponentPayload = decode(event_type, data)?;
            StreamEvent::UiComponent(payload.into_components())
        }
        "text_chunk" => {
            let payload: TextChunkPayload = decode(event_type, data)?;
            StreamEvent::TextChunk {
                chunk: payload.chunk,
            }
        }
        "message_complete" => {
            let payload: MessageCompletePayload = decode(event_type, data)?;
            StreamEvent::MessageComplete {
                message_id: payload.message_id,
            }
        }
        "error" => {
            let payload: ErrorPayload = decode(event_type, data)?;
            StreamEvent::Error {
                error: payload.error,
            }
        }
        // Ignore unknown events instead of erroring
        other => {
            return Ok(ParsedBlock::Ignored {
                event_type: other.to_string(),
            })
        }
    };
    Ok(ParsedBlock::Event(event))
}

fn decode<T: DeserializeOwned>(event_type: &str, data: Option<&str>) -> Result<T, SseParseError> {
    let data = data.ok_or_else(|| SseParseError::MissingData {
        event_type: event_type.to_string(),
    })?;
    serde_json::from_str(data).map_err(|e| SseParseError::InvalidJson {
        event_type: event_type.to_string(),
        source: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ComponentView;

    #[test]
    fn test_parse_empty_line() {
        assert_eq!(parse_sse_line(""), SseLine::Empty);
    }

    #[test]
    fn test_parse_comment_line() {
        assert_eq!(
            parse_sse_line(": keep-alive"),
            SseLine::Comment("keep-alive".to_string())
        );
    }

    #[test]
    fn test_parse_event_line() {
        assert_eq!(
            parse_sse_line("event: text_chunk"),
            SseLine::Event("text_chunk".to_string())
        );
        assert_eq!(
            parse_sse_line("event:end"),
            SseLine::Event("end".to_string())
        );
    }

    #[test]
    fn test_parse_data_line_is_trimmed() {
        assert_eq!(
            parse_sse_line("data:   {\"chunk\":\"a\"}  "),
            SseLine::Data("{\"chunk\":\"a\"}".to_string())
        );
    }

    #[test]
    fn test_parse_unknown_line() {
        assert_eq!(
            parse_sse_line("id: 7"),
            SseLine::Comment("id: 7".to_string())
        );
    }

    #[test]
    fn test_block_text_chunk() {
        let block = "event: text_chunk\ndata: {\"chunk\":\"TCS \"}";
        assert_eq!(
            parse_event_block(block).unwrap(),
            ParsedBlock::Event(StreamEvent::TextChunk {
                chunk: "TCS ".to_string()
            })
        );
    }

    #[test]
    fn test_block_with_crlf_lines() {
        let block = "event: message_complete\r\ndata: {\"messageId\":42}\r";
        assert_eq!(
            parse_event_block(block).unwrap(),
            ParsedBlock::Event(StreamEvent::MessageComplete { message_id: 42 })
        );
    }

    #[test]
    fn test_block_data_before_event() {
        let block = "data: {\"error\":\"rate limited\"}\nevent: error";
        assert_eq!(
            parse_event_block(block).unwrap(),
            ParsedBlock::Event(StreamEvent::Error {
                error: "rate limited".to_string()
            })
        );
    }

    #[test]
    fn test_end_without_data() {
        assert_eq!(
            parse_event_block("event: end").unwrap(),
            ParsedBlock::Event(StreamEvent::End)
        );
        assert_eq!(
            parse_event_block("event: end\ndata: {}").unwrap(),
            ParsedBlock::Event(StreamEvent::End)
        );
    }

    #[test]
    fn test_ui_component_shapes_decode_alike() {
        let list = r#"event: ui_component
data: [{"type":"pie_chart","data":[{"label":"Promoters","value":72.3}]}]"#;
        let wrapped = r#"event: ui_component
data: {"components":[{"type":"pie_chart","data":[{"label":"Promoters","value":72.3}]}]}"#;
        let single = r#"event: ui_component
data: {"type":"pie_chart","data":[{"label":"Promoters","value":72.3}]}"#;

        let expected = parse_event_block(list).unwrap();
        assert_eq!(parse_event_block(wrapped).unwrap(), expected);
        assert_eq!(parse_event_block(single).unwrap(), expected);

        match expected {
            ParsedBlock::Event(StreamEvent::UiComponent(components)) => {
                assert_eq!(components.len(), 1);
                assert!(matches!(components[0].view(), ComponentView::PieChart { .. }));
            }
            other => panic!("Expected ui_component event, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_event_is_ignored() {
        assert_eq!(
            parse_event_block("event: heartbeat\ndata: {}").unwrap(),
            ParsedBlock::Ignored {
                event_type: "heartbeat".to_string()
            }
        );
    }

    #[test]
    fn test_comment_only_block_is_empty() {
        assert_eq!(parse_event_block(": ping").unwrap(), ParsedBlock::Empty);
        assert_eq!(parse_event_block("").unwrap(), ParsedBlock::Empty);
    }

    #[test]
    fn test_invalid_json() {
        let result = parse_event_block("event: text_chunk\ndata: {not json");
        assert!(matches!(result, Err(SseParseError::InvalidJson { .. })));
    }

    #[test]
    fn test_wrong_payload_shape() {
        let result = parse_event_block("event: message_complete\ndata: {\"messageId\":\"abc\"}");
        assert!(matches!(result, Err(SseParseError::InvalidJson { .. })));
    }

    #[test]
    fn test_integral_float_message_id() {
        assert_eq!(
            parse_event_block("event: message_complete\ndata: {\"messageId\":42.0}").unwrap(),
            ParsedBlock::Event(StreamEvent::MessageComplete { message_id: 42 })
        );
        let result = parse_event_block("event: message_complete\ndata: {\"messageId\":42.5}");
        assert!(matches!(result, Err(SseParseError::InvalidJson { .. })));
    }

    #[test]
    fn test_odd_component_does_not_spoil_its_batch() {
        let block = r#"event: ui_component
data: [{"type":"stock_price_chart","data":[{"date":"2024-01-01","price":"3500.0"}]},{"type":"pie_chart","data":[{"label":"Promoters","value":72.3}]},{"type":"heatmap","cells":[[1,2]]}]"#;

        let components = match parse_event_block(block).unwrap() {
            ParsedBlock::Event(StreamEvent::UiComponent(components)) => components,
            other => panic!("Expected ui_component event, got {:?}", other),
        };
        let kinds: Vec<&str> = components.iter().map(|c| c.kind()).collect();
        assert_eq!(kinds, vec!["stock_price_chart", "pie_chart", "heatmap"]);
        assert_eq!(components[0].view(), &ComponentView::Unknown);
        assert!(matches!(components[1].view(), ComponentView::PieChart { .. }));
        assert_eq!(components[2].raw()["cells"], serde_json::json!([[1, 2]]));
    }

    #[test]
    fn test_ui_component_that_is_not_an_object() {
        let result = parse_event_block("event: ui_component\ndata: 42");
        assert!(matches!(result, Err(SseParseError::InvalidJson { .. })));
    }

    #[test]
    fn test_missing_data() {
        let result = parse_event_block("event: text_chunk");
        assert_eq!(
            result,
            Err(SseParseError::MissingData {
                event_type: "text_chunk".to_string()
            })
        );
    }

    #[test]
    fn test_missing_event() {
        let result = parse_event_block("data: {\"chunk\":\"orphan\"}");
        assert_eq!(result, Err(SseParseError::MissingEvent));
    }
}
