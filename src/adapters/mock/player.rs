//! Mock audio player for testing.
//!
//! "Plays" an item by sleeping for a configurable time, and records when each
//! item started and finished so tests can check ordering and overlap.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

use crate::error::PlaybackError;
use crate::playback::PlaybackItem;
use crate::traits::AudioPlayer;

/// One completed call to [`MockPlayer::play`].
#[derive(Debug, Clone)]
pub struct PlayRecord {
    pub url: String,
    pub label: String,
    pub started: Instant,
    pub finished: Instant,
    pub succeeded: bool,
}

/// Mock audio player with per-URL durations and failures.
#[derive(Debug, Clone)]
pub struct MockPlayer {
    default_duration: Duration,
    durations: Arc<Mutex<HashMap<String, Duration>>>,
    failures: Arc<Mutex<HashMap<String, PlaybackError>>>,
    plays: Arc<Mutex<Vec<PlayRecord>>>,
    started: Arc<Mutex<Vec<String>>>,
    started_count: Arc<watch::Sender<usize>>,
}

impl MockPlayer {
    /// Create a player where every item takes `default_duration`.
    pub fn new(default_duration: Duration) -> Self {
        let (started_count, _) = watch::channel(0);
        Self {
            default_duration,
            durations: Arc::new(Mutex::new(HashMap::new())),
            failures: Arc::new(Mutex::new(HashMap::new())),
            plays: Arc::new(Mutex::new(Vec::new())),
            started: Arc::new(Mutex::new(Vec::new())),
            started_count: Arc::new(started_count),
        }
    }

    /// Make the item with this URL take `duration` to play.
    pub fn set_duration(&self, url: &str, duration: Duration) {
        self.durations
            .lock()
            .unwrap()
            .insert(url.to_string(), duration);
    }

    /// Make the item with this URL fail after its duration.
    pub fn set_failure(&self, url: &str, error: PlaybackError) {
        self.failures.lock().unwrap().insert(url.to_string(), error);
    }

    /// Completed plays, in completion order.
    pub fn plays(&self) -> Vec<PlayRecord> {
        self.plays.lock().unwrap().clone()
    }

    /// URLs of every item that started, in start order.
    pub fn started_urls(&self) -> Vec<String> {
        self.started.lock().unwrap().clone()
    }

    /// Wait until at least `count` items have started.
    pub async fn wait_for_started(&self, count: usize) {
        let mut rx = self.started_count.subscribe();
        let _ = rx.wait_for(|started| *started >= count).await;
    }
}

impl Default for MockPlayer {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

#[async_trait]
impl AudioPlayer for MockPlayer {
    async fn play(&self, item: &PlaybackItem) -> Result<(), PlaybackError> {
        let started = Instant::now();
        self.started.lock().unwrap().push(item.source_url.clone());
        self.started_count.send_modify(|count| *count += 1);

        let duration = self
            .durations
            .lock()
            .unwrap()
            .get(&item.source_url)
            .copied()
            .unwrap_or(self.default_duration);
        tokio::time::sleep(duration).await;

        let failure = self.failures.lock().unwrap().get(&item.source_url).cloned();
        self.plays.lock().unwrap().push(PlayRecord {
            url: item.source_url.clone(),
            label: item.label.clone(),
            started,
            finished: Instant::now(),
            succeeded: failure.is_none(),
        });

        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
