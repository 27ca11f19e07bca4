//! Incremental UTF-8 decoding of transport chunks.
//!
//! Chunks can end in the middle of a multi-byte character. The decoder keeps
//! those bytes back until the rest of the character arrives, so a split
//! character never turns into a replacement character.

use std::char::REPLACEMENT_CHARACTER;

use futures::stream::{self, Stream};
use futures_util::StreamExt;
use std::pin::Pin;

use crate::traits::{ByteStream, HttpError};

/// A lazily decoded stream of text fragments.
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String, HttpError>> + Send>>;

/// Stateful UTF-8 decoder that buffers incomplete sequences across chunks.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    /// Bytes of a character whose remaining bytes have not arrived yet
    pending: Vec<u8>,
}

impl Utf8Decoder {
    /// Create a new decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one chunk, returning every complete character seen so far.
    ///
    /// Bytes that can never form valid UTF-8 become U+FFFD; a truncated
    /// sequence at the end of the chunk is held back for the next call.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        self.pending.extend_from_slice(chunk);

        let mut out = String::with_capacity(self.pending.len());
        let mut start = 0;

        while start < self.pending.len() {
            match std::str::from_utf8(&self.pending[start..]) {
                Ok(valid) => {
                    out.push_str(valid);
                    start = self.pending.len();
                }
                Err(err) => {
                    let valid_end = start + err.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&self.pending[start..valid_end]));
                    match err.error_len() {
                        Some(invalid_len) => {
                            out.push(REPLACEMENT_CHARACTER);
                            start = valid_end + invalid_len;
                        }
                        None => {
                            // Incomplete sequence at the end: wait for more bytes
                            start = valid_end;
                            break;
                        }
                    }
                }
            }
        }

        self.pending.drain(..start);
        out
    }

    /// Flush at end of stream.
    ///
    /// A sequence that never completed becomes a single U+FFFD.
    pub fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        self.pending.clear();
        Some(REPLACEMENT_CHARACTER.to_string())
    }

    /// Number of bytes held back waiting for the rest of a character
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

/// Turn a byte stream into a stream of decoded text fragments.
///
/// Nothing is read until the returned stream is polled. A transport error is
/// passed through unchanged and ends the stream.
pub fn decode_frames(body: ByteStream) -> TextStream {
    let fragments = stream::unfold(
        (body, Utf8Decoder::new(), false),
        |(mut body, mut decoder, done)| async move {
            if done {
                return None;
            }
            match body.next().await {
                Some(Ok(chunk)) => {
                    let text = decoder.decode(&chunk);
                    Some((Ok(text), (body, decoder, false)))
                }
                Some(Err(e)) => Some((Err(e), (body, decoder, true))),
                None => decoder
                    .finish()
                    .map(|tail| (Ok(tail), (body, decoder, true))),
            }
        },
    );

    Box::pin(fragments)
}
