use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::handle::SessionHandle;
use super::state::{SessionState, SessionUpdate};
use super::task::SessionTask;
use crate::client::TutorClient;
use crate::config::TutorConfig;
use crate::error::SessionError;
use crate::models::TopicRequest;
use crate::stream::TrailingRecordPolicy;
use crate::traits::AudioPlayer;

/// Owns the one active stream session.
///
/// Sessions report through the update channel given to [`new`](Self::new);
/// every update carries the session id so the owner can ignore stale ones.
pub struct SessionController {
    client: TutorClient,
    player: Option<Arc<dyn AudioPlayer>>,
    read_timeout: Option<Duration>,
    trailing_record: TrailingRecordPolicy,
    updates: mpsc::UnboundedSender<SessionUpdate>,
    current: Option<SessionHandle>,
    tasks: Vec<JoinHandle<()>>,
}

impl SessionController {
    /// Create a controller without audio, no read deadline and the default
    /// trailing record policy.
    pub fn new(client: TutorClient, updates: mpsc::UnboundedSender<SessionUpdate>) -> Self {
        Self {
            client,
            player: None,
            read_timeout: None,
            trailing_record: TrailingRecordPolicy::default(),
            updates,
            current: None,
            tasks: Vec::new(),
        }
    }

    /// Apply the session-related settings of a config.
    pub fn with_config(self, config: &TutorConfig) -> Self {
        self.with_read_timeout(config.read_timeout)
            .with_trailing_record(config.trailing_record)
    }

    /// Play audio events through `player` (builder pattern).
    pub fn with_player(mut self, player: Arc<dyn AudioPlayer>) -> Self {
        self.player = Some(player);
        self
    }

    pub fn with_read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn with_trailing_record(mut self, policy: TrailingRecordPolicy) -> Self {
        self.trailing_record = policy;
        self
    }

    /// Open a new session for `request`.
    ///
    /// Fails without touching the network if the topic is blank or another
    /// session is still active and not cancelled. A finished or cancelled
    /// previous session is superseded: its token is cancelled (dropping any
    /// audio it still had queued) and the new one starts without waiting.
    pub fn start(&mut self, request: TopicRequest) -> Result<SessionHandle, SessionError> {
        if request.topic.trim().is_empty() {
            return Err(SessionError::EmptyTopic);
        }

        if let Some(previous) = &self.current {
            if !previous.state().is_terminal() && !previous.is_cancelled() {
                return Err(SessionError::AlreadyActive {
                    session_id: previous.id().to_string(),
                });
            }
            if !previous.is_cancelled() {
                debug!(session_id = %previous.id(), "Superseding finished session");
                previous.cancel();
            }
        }
        self.tasks.retain(|task| !task.is_finished());

        let id = Uuid::new_v4().to_string();
        let token = CancellationToken::new();
        let (state_tx, state_rx) = watch::channel(SessionState::Active);
        let handle = SessionHandle::new(id.clone(), token.clone(), state_rx);

        info!(session_id = %id, topic = %request.topic, "Starting session");

        let task = SessionTask {
            id,
            request,
            client: self.client.clone(),
            player: self.player.clone(),
            read_timeout: self.read_timeout,
            trailing_record: self.trailing_record,
            token,
            state: state_tx,
            updates: self.updates.clone(),
        };
        self.tasks.push(tokio::spawn(task.run()));
        self.current = Some(handle.clone());

        Ok(handle)
    }

    /// Cancel a session. Safe to call more than once or after it finished.
    pub fn cancel(&self, handle: &SessionHandle) {
        if !handle.is_cancelled() {
            info!(session_id = %handle.id(), "Cancelling session");
        }
        handle.cancel();
    }

    /// Cancel the current session if it is still active.
    ///
    /// Returns whether there was one to cancel.
    pub fn cancel_active(&self) -> bool {
        match self.active() {
            Some(handle) => {
                self.cancel(&handle);
                true
            }
            None => false,
        }
    }

    pub fn state(&self, handle: &SessionHandle) -> SessionState {
        handle.state()
    }

    /// The current session, if it is active and not cancelled
    pub fn active(&self) -> Option<SessionHandle> {
        self.current
            .as_ref()
            .filter(|h| !h.state().is_terminal() && !h.is_cancelled())
            .cloned()
    }

    /// The most recently started session, whatever its state
    pub fn current(&self) -> Option<&SessionHandle> {
        self.current.as_ref()
    }

    /// Cancel audio left over from the last session.
    pub fn stop_audio(&self) {
        if let Some(handle) = &self.current {
            handle.cancel();
        }
    }

    /// Wait for every session task, including queued audio, to finish.
    ///
    /// Cancel-safe: tasks not yet joined stay tracked if the future is dropped.
    pub async fn join(&mut self) {
        while let Some(task) = self.tasks.first_mut() {
            if let Err(e) = task.await {
                warn!(error = %e, "Session task ended abnormally");
            }
            self.tasks.remove(0);
        }
    }
}
