//! Mock implementations for testing.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses
//! - [`MockPlayer`] - audio player that records what it played and when

pub mod http;
pub mod player;

pub use http::{ChunkSender, MockHttpClient, MockResponse, RecordedRequest};
pub use player::{MockPlayer, PlayRecord};
