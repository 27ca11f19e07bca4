//! The per-session read loop.
//!
//! Opens the stream, pulls one chunk at a time, classifies every completed
//! record and routes it: audio into the session's playback queue, everything
//! into the owner's update channel. Cancellation is observed while waiting
//! for the stream to open, at every chunk await, and before each record is
//! dispatched.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::error::Elapsed;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::state::{AbortReason, SessionState, SessionUpdate};
use crate::client::TutorClient;
use crate::error::{ErrorContext, NetworkError, StreamError};
use crate::models::TopicRequest;
use crate::playback::{PlaybackItem, PlaybackQueue};
use crate::stream::{classify_record, ReadBatch, RecordReader, StreamEvent, TrailingRecordPolicy};
use crate::traits::AudioPlayer;

/// Everything a session task needs, moved into the task at spawn.
pub(crate) struct SessionTask {
    pub id: String,
    pub request: TopicRequest,
    pub client: TutorClient,
    pub player: Option<Arc<dyn AudioPlayer>>,
    pub read_timeout: Option<Duration>,
    pub trailing_record: TrailingRecordPolicy,
    pub token: CancellationToken,
    pub state: watch::Sender<SessionState>,
    pub updates: mpsc::UnboundedSender<SessionUpdate>,
}

impl SessionTask {
    pub(crate) async fn run(self) {
        let queue = self
            .player
            .clone()
            .map(|player| PlaybackQueue::spawn(player, self.token.child_token()));

        let outcome = match self.read_stream(queue.as_ref()).await {
            SessionState::Failed(err) => SessionState::Failed(
                err.with_context(
                    ErrorContext::new("stream topic")
                        .with_session_id(self.id.clone())
                        .with_component("session"),
                ),
            ),
            state => state,
        };

        match &outcome {
            SessionState::Failed(err) => warn!(
                session_id = %self.id,
                code = err.error_code(),
                category = %err.category(),
                retryable = err.is_retryable(),
                error = %err,
                "Session failed"
            ),
            state => info!(session_id = %self.id, state = %state, "Session finished"),
        }

        self.state.send_replace(outcome.clone());
        let _ = self.updates.send(SessionUpdate::Finished {
            session_id: self.id.clone(),
            state: outcome,
        });

        // Queued audio keeps playing after the stream ends unless the
        // session is cancelled.
        if let Some(queue) = queue {
            match queue.close().await {
                Ok(summary) => debug!(
                    session_id = %self.id,
                    played = summary.played,
                    failed = summary.failed,
                    dropped = summary.dropped,
                    "Session audio drained"
                ),
                Err(e) => warn!(session_id = %self.id, error = %e, "Playback task ended abnormally"),
            }
        }
    }

    async fn read_stream(&self, queue: Option<&PlaybackQueue>) -> SessionState {
        let opened = tokio::select! {
            biased;
            _ = self.token.cancelled() => return self.aborted(AbortReason::Cancelled),
            opened = with_deadline(self.read_timeout, self.client.stream_topic(&self.request)) => opened,
        };

        let body = match opened {
            Err(_) => return self.deadline_hit(),
            Ok(Err(e)) => {
                let url = self.client.stream_url();
                return SessionState::Failed(NetworkError::from_http(e, &url).into());
            }
            Ok(Ok(body)) => body,
        };
        debug!(session_id = %self.id, "Stream open");

        let mut reader = RecordReader::new(body, self.trailing_record);
        loop {
            let batch = tokio::select! {
                biased;
                _ = self.token.cancelled() => return self.aborted(AbortReason::Cancelled),
                batch = with_deadline(self.read_timeout, reader.next_batch()) => batch,
            };

            let (records, at_end) = match batch {
                Err(_) => return self.deadline_hit(),
                Ok(Err(e)) => {
                    return SessionState::Failed(
                        StreamError::ConnectionLost {
                            message: e.to_string(),
                            records_received: reader.records_read(),
                        }
                        .into(),
                    )
                }
                Ok(Ok(ReadBatch::Records(records))) => (records, false),
                Ok(Ok(ReadBatch::End(records))) => (records, true),
            };

            for record in records {
                if self.token.is_cancelled() {
                    return self.aborted(AbortReason::Cancelled);
                }
                self.dispatch(&record, queue);
            }

            if at_end {
                return SessionState::Completed;
            }
        }
    }

    fn dispatch(&self, record: &str, queue: Option<&PlaybackQueue>) {
        let event = classify_record(record);
        debug!(session_id = %self.id, event = event.event_type(), "Record classified");

        match &event {
            StreamEvent::Audio { url, .. } => self.enqueue_audio(&event, url, queue),
            StreamEvent::UnitEnd { content } => {
                info!(session_id = %self.id, unit = %content, "Unit finished")
            }
            StreamEvent::Error { message } => {
                warn!(session_id = %self.id, message = %message, "Server reported an error")
            }
            StreamEvent::Text { .. } | StreamEvent::Raw { .. } => {}
        }

        self.send(SessionUpdate::Event {
            session_id: self.id.clone(),
            event,
        });
    }

    fn enqueue_audio(&self, event: &StreamEvent, url: &str, queue: Option<&PlaybackQueue>) {
        let Some(item) = PlaybackItem::from_event(event) else {
            debug!(session_id = %self.id, "Audio record without a URL, skipping");
            return;
        };
        let Some(queue) = queue else {
            debug!(session_id = %self.id, url = %url, "Audio disabled, skipping");
            return;
        };

        let label = item.label.clone();
        if queue.enqueue(item) {
            self.send(SessionUpdate::AudioQueued {
                session_id: self.id.clone(),
                label,
            });
        }
    }

    fn send(&self, update: SessionUpdate) {
        if self.updates.send(update).is_err() {
            debug!(session_id = %self.id, "Session owner is gone, cancelling");
            self.token.cancel();
        }
    }

    fn aborted(&self, reason: AbortReason) -> SessionState {
        debug!(session_id = %self.id, reason = ?reason, "Read loop stopped");
        SessionState::Aborted(reason)
    }

    fn deadline_hit(&self) -> SessionState {
        info!(
            session_id = %self.id,
            timeout_secs = self.read_timeout.map(|t| t.as_secs_f64()).unwrap_or_default(),
            "No data within the read deadline, aborting"
        );
        // same teardown as a user cancel, including queued audio
        self.token.cancel();
        self.aborted(AbortReason::Deadline)
    }
}

async fn with_deadline<F: Future>(deadline: Option<Duration>, fut: F) -> Result<F::Output, Elapsed> {
    match deadline {
        Some(limit) => tokio::time::timeout(limit, fut).await,
        None => Ok(fut.await),
    }
}
