//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP client operations (POST, streaming POST)
//! - [`AudioPlayer`] - plays one audio item to completion

pub mod http;
pub mod player;

pub use http::{ByteStream, Headers, HttpClient, HttpError, Response};
pub use player::AudioPlayer;
