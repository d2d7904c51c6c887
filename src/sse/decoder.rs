//! Incremental UTF-8 decoding for byte streams.

/// Decodes UTF-8 across chunk boundaries.
///
/// A multi-byte character split between two chunks is held back until the
/// rest of it arrives. Byte sequences that can never become valid UTF-8 are
/// replaced with U+FFFD.
#[derive(Debug, Default)]
pub struct Utf8StreamDecoder {
    pending: Vec<u8>,
}

impl Utf8StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `chunk`, returning every complete character available so far.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        let mut bytes = std::mem::take(&mut self.pending);
        bytes.extend_from_slice(chunk);

        let mut out = String::with_capacity(bytes.len());
        let mut rest = bytes.as_slice();
        loop {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    out.push_str(text);
                    break;
                }
                Err(err) => {
                    let (valid, after) = rest.split_at(err.valid_up_to());
                    if let Ok(text) = std::str::from_utf8(valid) {
                        out.push_str(text);
                    }
                    match err.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[len..];
                        }
                        None => {
                            // Incomplete sequence at the end: wait for more bytes
                            self.pending = after.to_vec();
                            break;
                        }
                    }
                }
            }
        }
        out
    }

    /// Number of bytes held back waiting for the rest of a character.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passthrough() {
        let mut decoder = Utf8StreamDecoder::new();
        assert_eq!(decoder.decode(b"event: end\n\n"), "event: end\n\n");
        assert_eq!(decoder.pending_len(), 0);
    }

    #[test]
    fn test_split_multibyte_character() {
        // "₹" is E2 82 B9
        let bytes = "₹100".as_bytes();
        let mut decoder = Utf8StreamDecoder::new();

        assert_eq!(decoder.decode(&bytes[..1]), "");
        assert_eq!(decoder.pending_len(), 1);
        assert_eq!(decoder.decode(&bytes[1..2]), "");
        assert_eq!(decoder.pending_len(), 2);
        assert_eq!(decoder.decode(&bytes[2..]), "₹100");
        assert_eq!(decoder.pending_len(), 0);
    }

    #[test]
    fn test_every_split_point_of_mixed_text() {
        let text = "नमस्ते TCS ₹3,700 📈 done";
        let bytes = text.as_bytes();
        for split in 0..=bytes.len() {
            let mut decoder = Utf8StreamDecoder::new();
            let mut out = decoder.decode(&bytes[..split]);
            out.push_str(&decoder.decode(&bytes[split..]));
            assert_eq!(out, text, "split at {}", split);
            assert_eq!(decoder.pending_len(), 0);
        }
    }

    #[test]
    fn test_one_byte_at_a_time() {
        let text = "📈 up 2%";
        let mut decoder = Utf8StreamDecoder::new();
        let out: String = text
            .as_bytes()
            .iter()
            .map(|b| decoder.decode(std::slice::from_ref(b)))
            .collect();
        assert_eq!(out, text);
    }

    #[test]
    fn test_invalid_bytes_are_replaced() {
        let mut decoder = Utf8StreamDecoder::new();
        assert_eq!(decoder.decode(b"a\xFFb"), "a\u{FFFD}b");
        assert_eq!(decoder.pending_len(), 0);
    }
}
