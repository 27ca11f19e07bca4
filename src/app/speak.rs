//! One-shot speech outside any session.

use tracing::{info, warn};

use super::App;
use crate::error::TutorResult;
use crate::models::TtsRequest;
use crate::playback::PlaybackItem;

impl App {
    /// Ask the server for speech and play it directly.
    ///
    /// Returns the audio URL. With audio disabled the URL is only returned.
    pub async fn speak(&self, request: &TtsRequest) -> TutorResult<String> {
        let response = self.client.synthesize(request).await?;
        info!(audio_url = %response.audio_url, "Speech ready");

        if let Some(player) = &self.player {
            let item = PlaybackItem::new(response.audio_url.clone(), "speech");
            if let Err(e) = player.play(&item).await {
                warn!(error = %e, "Speech playback failed");
                return Err(e.into());
            }
        }
        Ok(response.audio_url)
    }
}
