//! Streaming response pipeline.
//!
//! Bytes from the transport pass through three stages:
//!
//! 1. [`decoder`] turns chunks into UTF-8 text, holding back split characters
//! 2. [`splitter`] turns text into newline-delimited records
//! 3. [`classifier`] turns each record into a [`StreamEvent`]
//!
//! [`RecordReader`] drives the first two stages one chunk at a time for the
//! session read loop.

pub mod classifier;
pub mod decoder;
pub mod events;
mod payloads;
pub mod reader;
pub mod splitter;

pub use classifier::classify_record;
pub use decoder::{decode_frames, TextStream, Utf8Decoder};
pub use events::StreamEvent;
pub use reader::{ReadBatch, RecordReader};
pub use splitter::{RecordSplitter, TrailingRecordPolicy};
