//! Audio player trait abstraction.

use async_trait::async_trait;

use crate::error::PlaybackError;
use crate::playback::PlaybackItem;

/// Something that can play one audio resource to completion.
///
/// `play` resolves only once the item has finished (or failed). The playback
/// queue relies on that to keep items from overlapping.
#[async_trait]
pub trait AudioPlayer: Send + Sync {
    /// Play a single item and wait until it has finished.
    async fn play(&self, item: &PlaybackItem) -> Result<(), PlaybackError>;
}
