//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`CommandPlayer`] - plays audio through an external program
//! - `RodioPlayer` - in-process playback (feature `rodio`)
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockHttpClient`] - Configurable HTTP and streaming responses
//! - [`mock::MockPlayer`] - Records play order and timing

pub mod command_player;
pub mod mock;
pub mod reqwest_http;
#[cfg(feature = "rodio")]
pub mod rodio_player;

pub use command_player::CommandPlayer;
pub use mock::{MockHttpClient, MockPlayer};
pub use reqwest_http::ReqwestHttpClient;
#[cfg(feature = "rodio")]
pub use rodio_player::RodioPlayer;
