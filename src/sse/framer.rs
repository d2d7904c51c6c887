//! Splits a decoded byte stream into event blocks.

use super::decoder::Utf8StreamDecoder;

const BLOCK_SEPARATOR: &str = "\n\n";

/// Accumulates decoded text and hands out complete event blocks.
///
/// Invariant: after [`next_block`](Self::next_block) returns `None`, the
/// buffer holds no `\n\n` separator, only the start of an unfinished block.
#[derive(Debug, Default)]
pub struct EventFramer {
    decoder: Utf8StreamDecoder,
    buffer: String,
    /// Offset below which the buffer is known to hold no separator
    scan_from: usize,
}

/// Data left over when the stream ended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FramerRemainder {
    /// Text of a block that never got its terminating blank line
    pub partial_block: String,
    /// Bytes of an incomplete UTF-8 sequence
    pub undecoded_bytes: usize,
}

impl FramerRemainder {
    pub fn is_empty(&self) -> bool {
        self.partial_block.is_empty() && self.undecoded_bytes == 0
    }
}

impl EventFramer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk of raw bytes from the transport.
    pub fn push(&mut self, chunk: &[u8]) {
        let text = self.decoder.decode(chunk);
        self.buffer.push_str(&text);
    }

    /// Remove and return the next complete block, without its separator.
    pub fn next_block(&mut self) -> Option<String> {
        match self.buffer[self.scan_from..].find(BLOCK_SEPARATOR) {
            Some(offset) => {
                let end = self.scan_from + offset;
                let block = self.buffer[..end].to_string();
                self.buffer.drain(..end + BLOCK_SEPARATOR.len());
                self.scan_from = 0;
                Some(block)
            }
            None => {
                // A trailing '\n' may be the first half of the next separator
                self.scan_from = self.buffer.len().saturating_sub(1);
                while !self.buffer.is_char_boundary(self.scan_from) {
                    self.scan_from -= 1;
                }
                None
            }
        }
    }

    /// Bytes currently buffered (decoded text plus held-back bytes).
    pub fn buffered_len(&self) -> usize {
        self.buffer.len() + self.decoder.pending_len()
    }

    /// Consume the framer, returning whatever never formed a complete block.
    pub fn finish(self) -> FramerRemainder {
        FramerRemainder {
            partial_block: self.buffer,
            undecoded_bytes: self.decoder.pending_len(),
        }
    }
}
