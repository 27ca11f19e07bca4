//! Tutor - a terminal client for a streaming tutoring server.
//!
//! The library exposes the streaming pipeline, session control and adapters
//! for use by the binary and integration tests.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod conversation;
pub mod error;
pub mod models;
pub mod playback;
pub mod session;
pub mod stream;
pub mod traits;
