//! Strictly sequential audio playback.
//!
//! A single task owns the queue and plays one item at a time. Enqueueing
//! only sends on a channel, so callers never touch what is playing.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::item::PlaybackItem;
use crate::traits::AudioPlayer;

/// What happened to the items of one queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackSummary {
    pub played: usize,
    pub failed: usize,
    pub dropped: usize,
}

/// Handle to a running playback loop.
///
/// Dropping the queue without [`close`](Self::close) behaves like closing it:
/// the loop plays what it already has and then exits.
pub struct PlaybackQueue {
    tx: mpsc::UnboundedSender<PlaybackItem>,
    token: CancellationToken,
    handle: JoinHandle<PlaybackSummary>,
}

impl PlaybackQueue {
    /// Start the playback loop. Cancelling `token` cancels the queue.
    pub fn spawn(player: Arc<dyn AudioPlayer>, token: CancellationToken) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run_queue(player, rx, token.clone()));
        Self { tx, token, handle }
    }

    /// Append an item to the tail of the queue.
    ///
    /// Returns `false` if the queue was cancelled and the item was not taken.
    pub fn enqueue(&self, item: PlaybackItem) -> bool {
        if self.token.is_cancelled() {
            debug!(label = %item.label, "Queue cancelled, not enqueueing");
            return false;
        }
        self.tx.send(item).is_ok()
    }

    /// Let the current item finish, then drop everything still waiting.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Stop accepting items; the loop plays the rest and then exits.
    pub fn close(self) -> JoinHandle<PlaybackSummary> {
        drop(self.tx);
        self.handle
    }
}

async fn run_queue(
    player: Arc<dyn AudioPlayer>,
    mut rx: mpsc::UnboundedReceiver<PlaybackItem>,
    token: CancellationToken,
) -> PlaybackSummary {
    let mut summary = PlaybackSummary::default();

    loop {
        let item = tokio::select! {
            biased;
            _ = token.cancelled() => break,
            next = rx.recv() => match next {
                Some(item) => item,
                None => break,
            },
        };

        info!(label = %item.label, "Playing audio");
        // Not raced against cancellation: the current item always finishes
        match player.play(&item).await {
            Ok(()) => summary.played += 1,
            Err(e) => {
                warn!(label = %item.label, url = %item.source_url, error = %e, "Audio playback failed, skipping");
                summary.failed += 1;
            }
        }
    }

    rx.close();
    while let Ok(item) = rx.try_recv() {
        debug!(label = %item.label, "Dropping queued audio");
        summary.dropped += 1;
    }

    debug!(
        played = summary.played,
        failed = summary.failed,
        dropped = summary.dropped,
        "Playback queue finished"
    );
    summary
}
