//! Starting a turn.

use super::App;
use crate::error::SessionError;
use crate::models::TopicRequest;
use crate::session::SessionHandle;

impl App {
    /// Send a topic: open a session and start a new turn for it.
    ///
    /// Nothing is added to the conversation when the session cannot start.
    /// The previous turn must be closed first, either by handling its
    /// `Finished` update or by [`cancel_active`](App::cancel_active).
    pub fn submit(&mut self, topic: &str) -> Result<SessionHandle, SessionError> {
        if let Some(session_id) = self.conversation.turn_session_id() {
            return Err(SessionError::AlreadyActive {
                session_id: session_id.to_string(),
            });
        }
        let topic = topic.trim();
        let handle = self.controller.start(TopicRequest::new(topic))?;
        self.conversation.begin_turn(handle.id(), topic);
        Ok(handle)
    }
}
