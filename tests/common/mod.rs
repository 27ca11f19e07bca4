//! Common test utilities for integration tests.
//!
//! Reusable fixtures for building streamed bodies, collecting session updates
//! and wiring an [`App`] to mocks.
//!
//! # Example
//!
//! ```ignore
//! mod common;
//! use common::*;
//!
//! let http = MockHttpConfig::new()
//!     .with_stream(STREAM_URL, &[text_record("Hi")])
//!     .build();
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use std::sync::Arc;

use tokio::sync::mpsc;
use tutor::app::{App, AppOutput};
use tutor::config::TutorConfig;
use tutor::session::SessionUpdate;

/// Stream endpoint under the default config.
pub const STREAM_URL: &str = "http://localhost:5000/";

/// `{"type":"text",...}` record, newline-terminated.
pub fn text_record(content: &str) -> String {
    format!("{}\n", serde_json::json!({"type": "text", "content": content}))
}

/// `{"type":"audio",...}` record, newline-terminated.
pub fn audio_record(url: &str, unit: &str, index: i64) -> String {
    format!(
        "{}\n",
        serde_json::json!({"type": "audio", "audio_url": url, "unit": unit, "chunk_index": index})
    )
}

/// `{"type":"error",...}` record, newline-terminated.
pub fn error_record(content: &str) -> String {
    format!("{}\n", serde_json::json!({"type": "error", "content": content}))
}

/// Build an app on mocks; the config's audio flag decides whether `player` is used.
pub fn test_app(
    config: &TutorConfig,
    http: &MockHttpClient,
    player: &MockPlayer,
) -> (App, mpsc::UnboundedReceiver<SessionUpdate>) {
    App::new(config, Arc::new(http.clone()), Arc::new(player.clone()))
}

/// Feed updates to the app until its turn finishes; returns every output.
pub async fn run_turn(
    app: &mut App,
    updates: &mut mpsc::UnboundedReceiver<SessionUpdate>,
) -> Vec<AppOutput> {
    let mut outputs = Vec::new();
    while let Some(update) = updates.recv().await {
        let step = app.handle_update(update);
        let finished = step
            .iter()
            .any(|o| matches!(o, AppOutput::TurnFinished(_)));
        outputs.extend(step);
        if finished {
            break;
        }
    }
    outputs
}

/// Concatenated text deltas.
pub fn deltas(outputs: &[AppOutput]) -> String {
    outputs
        .iter()
        .filter_map(|o| match o {
            AppOutput::Delta(text) => Some(text.as_str()),
            _ => None,
        })
        .collect()
}
