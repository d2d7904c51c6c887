//! Turns raw body chunks into typed events.

use tracing::{debug, warn};

use super::events::StreamEvent;
use super::framer::EventFramer;
use super::parser::{parse_event_block, ParsedBlock};
use crate::error::StreamError;

/// Counters kept while reading one stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReaderStats {
    /// Events decoded and handed out
    pub events: usize,
    /// Blocks skipped because they could not be decoded
    pub malformed_blocks: usize,
    /// Well-formed blocks with an unknown event name
    pub ignored_events: usize,
}

/// Framing and decoding state for one response body.
///
/// Feed it chunks with [`feed`](Self::feed) and pull events with
/// [`next_event`](Self::next_event) until it returns `None`, then feed the
/// next chunk. Malformed blocks and unknown events are skipped (and counted),
/// so a single bad frame never ends the stream.
#[derive(Debug, Default)]
pub struct EventReader {
    framer: EventFramer,
    stats: ReaderStats,
}

impl EventReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, chunk: &[u8]) {
        self.framer.push(chunk);
    }

    /// Next decodable event among the complete blocks buffered so far.
    pub fn next_event(&mut self) -> Option<StreamEvent> {
        while let Some(block) = self.framer.next_block() {
            match parse_event_block(&block) {
                Ok(ParsedBlock::Event(event)) => {
                    self.stats.events += 1;
                    debug!(event = event.event_name(), "Decoded stream event");
                    return Some(event);
                }
                Ok(ParsedBlock::Ignored { event_type }) => {
                    self.stats.ignored_events += 1;
                    debug!(event = %event_type, "Ignoring unknown stream event");
                }
                Ok(ParsedBlock::Empty) => {}
                Err(err) => {
                    self.stats.malformed_blocks += 1;
                    let err = StreamError::from(err);
                    warn!(code = err.error_code(), "Skipping malformed block: {}", err);
                }
            }
        }
        None
    }

    pub fn stats(&self) -> ReaderStats {
        self.stats
    }

    /// End of input: log anything that never formed a complete block.
    pub fn finish(&mut self) -> ReaderStats {
        let remainder = std::mem::take(&mut self.framer).finish();
        if !remainder.is_empty() {
            debug!(
                partial_block_len = remainder.partial_block.len(),
                undecoded_bytes = remainder.undecoded_bytes,
                "Discarding incomplete data at end of stream"
            );
        }
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(reader: &mut EventReader) -> Vec<StreamEvent> {
        std::iter::from_fn(|| reader.next_event()).collect()
    }

    #[test]
    fn test_reads_events_in_order() {
        let mut reader = EventReader::new();
        reader.feed(
            b"event: text_chunk\ndata: {\"chunk\":\"Hello\"}\n\n\
              event: text_chunk\ndata: {\"chunk\":\" world\"}\n\n",
        );
        assert_eq!(
            collect(&mut reader),
            vec![
                StreamEvent::TextChunk {
                    chunk: "Hello".to_string()
                },
                StreamEvent::TextChunk {
                    chunk: " world".to_string()
                },
            ]
        );
        assert_eq!(reader.stats().events, 2);
    }

    #[test]
    fn test_skips_malformed_and_unknown_blocks() {
        let mut reader = EventReader::new();
        reader.feed(
            b"event: text_chunk\ndata: {\"chunk\":\"a\"}\n\n\
              event: text_chunk\ndata: {oops\n\n\
              event: typing\ndata: {}\n\n\
              : keep-alive\n\n\
              event: text_chunk\ndata: {\"chunk\":\"b\"}\n\n",
        );
        let events = collect(&mut reader);
        assert_eq!(events.len(), 2);
        assert_eq!(
            reader.stats(),
            ReaderStats {
                events: 2,
                malformed_blocks: 1,
                ignored_events: 1,
            }
        );
    }

    #[test]
    fn test_waits_for_complete_block() {
        let mut reader = EventReader::new();
        reader.feed(b"event: message_complete\ndata: {\"messa");
        assert!(reader.next_event().is_none());
        reader.feed(b"geId\":7}\n\n");
        assert_eq!(
            reader.next_event(),
            Some(StreamEvent::MessageComplete { message_id: 7 })
        );
    }

    #[test]
    fn test_finish_returns_stats() {
        let mut reader = EventReader::new();
        reader.feed(b"event: end\n\nevent: text_chunk\ndata: {\"chunk\":\"late\"}");
        assert_eq!(reader.next_event(), Some(StreamEvent::End));
        assert!(reader.next_event().is_none());
        assert_eq!(reader.finish().events, 1);
    }
}
