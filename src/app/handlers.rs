//! Session update handling.

use tracing::debug;

use super::{App, AppOutput};
use crate::session::SessionUpdate;
use crate::stream::StreamEvent;

impl App {
    /// Apply one session update to the conversation.
    ///
    /// Updates from sessions whose turn is no longer open produce nothing.
    pub fn handle_update(&mut self, update: SessionUpdate) -> Vec<AppOutput> {
        match update {
            SessionUpdate::Event { session_id, event } => {
                if let Some(delta) = self.conversation.apply(&session_id, &event) {
                    return vec![AppOutput::Delta(delta)];
                }
                match event {
                    StreamEvent::UnitEnd { content } if self.is_open(&session_id) => {
                        vec![AppOutput::UnitFinished(content)]
                    }
                    _ => Vec::new(),
                }
            }
            SessionUpdate::AudioQueued { session_id, label } => {
                if self.is_open(&session_id) {
                    vec![AppOutput::AudioQueued(label)]
                } else {
                    Vec::new()
                }
            }
            SessionUpdate::Finished { session_id, state } => {
                if !self.is_open(&session_id) {
                    debug!(session_id = %session_id, "Ignoring finish of a closed turn");
                    return Vec::new();
                }
                let mut outputs = Vec::with_capacity(2);
                if let Some(text) = self.conversation.finish(&session_id, &state) {
                    outputs.push(AppOutput::Delta(text));
                }
                outputs.push(AppOutput::TurnFinished(state));
                outputs
            }
        }
    }

    fn is_open(&self, session_id: &str) -> bool {
        self.controller
            .current()
            .is_some_and(|handle| handle.id() == session_id)
            && self.conversation.is_turn_open()
    }
}
