//! Pull-based record reader over a response body.

use futures_util::StreamExt;

use super::decoder::{decode_frames, TextStream};
use super::splitter::{RecordSplitter, TrailingRecordPolicy};
use crate::traits::{ByteStream, HttpError};

/// Records produced by one read from the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadBatch {
    /// Records completed by the latest chunk (possibly none)
    Records(Vec<String>),
    /// End of stream, with the trailing record if the policy kept it
    End(Vec<String>),
}

/// Reads a body one transport chunk at a time and yields complete records.
///
/// Each call to [`next_batch`](Self::next_batch) awaits exactly one chunk,
/// which makes it the single suspension point of a session read loop.
pub struct RecordReader {
    fragments: TextStream,
    splitter: RecordSplitter,
    records_read: usize,
    finished: bool,
}

impl RecordReader {
    pub fn new(body: ByteStream, policy: TrailingRecordPolicy) -> Self {
        Self {
            fragments: decode_frames(body),
            splitter: RecordSplitter::new(policy),
            records_read: 0,
            finished: false,
        }
    }

    /// Await the next chunk and return the records it completed.
    pub async fn next_batch(&mut self) -> Result<ReadBatch, HttpError> {
        if self.finished {
            return Ok(ReadBatch::End(Vec::new()));
        }

        match self.fragments.next().await {
            Some(Ok(fragment)) => {
                let records = self.splitter.push(&fragment);
                self.records_read += records.len();
                Ok(ReadBatch::Records(records))
            }
            Some(Err(e)) => {
                self.finished = true;
                Err(e)
            }
            None => {
                self.finished = true;
                let tail: Vec<String> = self.splitter.finish().into_iter().collect();
                self.records_read += tail.len();
                Ok(ReadBatch::End(tail))
            }
        }
    }

    /// Number of complete records handed out so far
    pub fn records_read(&self) -> usize {
        self.records_read
    }
}
