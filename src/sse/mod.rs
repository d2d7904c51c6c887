//! SSE (Server-Sent Events) handling for the IRIS chat stream.
//!
//! The backend answers a chat request with blocks separated by a blank line:
//!
//! ```text
//! event: text_chunk
//! data: {"chunk":"TCS "}
//!
//! event: end
//! data: {}
//!
//! ```
//!
//! # Module structure
//! - `decoder` - incremental UTF-8 decoding across chunk boundaries
//! - `framer` - the parse buffer and blank-line block splitting
//! - `parser` - line and block parsing into typed events
//! - `reader` - framing + parsing with skip-and-count for bad frames
//! - `events` / `payloads` - event types and their JSON payloads

mod decoder;
mod events;
mod framer;
mod parser;
mod payloads;
mod reader;

pub use decoder::Utf8StreamDecoder;
pub use events::{SseLine, SseParseError, StreamEvent};
pub use framer::{EventFramer, FramerRemainder};
pub use parser::{parse_event_block, parse_sse_line, parse_stream_event, ParsedBlock};
pub use reader::{EventReader, ReaderStats};
