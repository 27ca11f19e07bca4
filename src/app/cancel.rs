//! Cancelling and resetting.

use tracing::info;

use super::App;
use crate::session::{AbortReason, SessionState};

impl App {
    /// Cancel the open turn and its session.
    ///
    /// Content already shown stays; nothing is appended for the cancel, and
    /// updates the session had not delivered yet are dropped. Returns whether
    /// a turn was open.
    pub fn cancel_active(&mut self) -> bool {
        let Some(session_id) = self.conversation.turn_session_id().map(str::to_string) else {
            return false;
        };
        if let Some(handle) = self.controller.current() {
            if handle.id() == session_id {
                self.controller.cancel(handle);
            }
        }
        self.conversation
            .finish(&session_id, &SessionState::Aborted(AbortReason::Cancelled));
        true
    }

    /// Stop any audio still queued from the last session.
    pub fn stop_audio(&self) {
        self.controller.stop_audio();
    }

    /// Cancel everything and go back to the greeting.
    pub fn reset(&mut self) {
        self.cancel_active();
        self.stop_audio();
        self.conversation.reset();
        info!("Conversation reset");
    }

    /// Cancel everything and wait for session tasks to wind down.
    pub async fn shutdown(&mut self) {
        self.cancel_active();
        self.stop_audio();
        self.controller.join().await;
    }
}
