use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use super::state::SessionState;

/// Caller-side view of one stream session.
///
/// Cheap to clone. Every clone observes the same state and cancels the same
/// session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    id: String,
    token: CancellationToken,
    state: watch::Receiver<SessionState>,
}

impl SessionHandle {
    pub(crate) fn new(
        id: String,
        token: CancellationToken,
        state: watch::Receiver<SessionState>,
    ) -> Self {
        Self { id, token, state }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Whether cancellation has been requested (the session may still be
    /// winding down).
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Request cancellation. Observed at the read loop's next await.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Wait for the session to reach a terminal state.
    pub async fn finished(&self) -> SessionState {
        let mut rx = self.state.clone();
        let result = rx.wait_for(SessionState::is_terminal).await.map(|s| s.clone());
        match result {
            Ok(state) => state,
            Err(_) => rx.borrow().clone(),
        }
    }
}
