//! In-process audio player using `rodio`.
//!
//! Downloads the whole resource through the [`HttpClient`], then decodes and
//! plays it on the default output device from a blocking thread.

use async_trait::async_trait;
use bytes::Bytes;
use rodio::{Decoder, OutputStream, Sink};
use std::io::Cursor;
use std::sync::Arc;

use crate::error::PlaybackError;
use crate::playback::PlaybackItem;
use crate::traits::{AudioPlayer, Headers, HttpClient};

/// Plays audio on the default output device.
pub struct RodioPlayer {
    http: Arc<dyn HttpClient>,
}

impl RodioPlayer {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self { http }
    }

    async fn fetch(&self, url: &str) -> Result<Bytes, PlaybackError> {
        let response = self
            .http
            .get(url, &Headers::new())
            .await
            .map_err(|e| PlaybackError::Fetch {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        if !response.is_success() {
            return Err(PlaybackError::Fetch {
                url: url.to_string(),
                message: format!("status {}", response.status),
            });
        }
        Ok(response.body)
    }
}

#[async_trait]
impl AudioPlayer for RodioPlayer {
    async fn play(&self, item: &PlaybackItem) -> Result<(), PlaybackError> {
        let audio = self.fetch(&item.source_url).await?;
        tracing::debug!(label = %item.label, bytes = audio.len(), "Audio fetched");

        tokio::task::spawn_blocking(move || play_blocking(audio))
            .await
            .map_err(|e| PlaybackError::Output {
                message: e.to_string(),
            })?
    }
}

/// Blocks until the sink has drained.
fn play_blocking(audio: Bytes) -> Result<(), PlaybackError> {
    // the stream must outlive the sink
    let (_stream, handle) = OutputStream::try_default().map_err(|e| PlaybackError::Output {
        message: e.to_string(),
    })?;
    let sink = Sink::try_new(&handle).map_err(|e| PlaybackError::Output {
        message: e.to_string(),
    })?;
    let source = Decoder::new(Cursor::new(audio)).map_err(|e| PlaybackError::Decode {
        message: e.to_string(),
    })?;

    sink.append(source);
    sink.sleep_until_end();
    Ok(())
}
