//! What the app asks the terminal to show.

use crate::session::SessionState;

/// Output produced while handling session updates and commands.
#[derive(Debug, Clone, PartialEq)]
pub enum AppOutput {
    /// Text appended to the open assistant message
    Delta(String),
    /// An audio part was queued for playback
    AudioQueued(String),
    /// A unit of the lesson finished
    UnitFinished(String),
    /// The turn ended; the prompt can be shown again
    TurnFinished(SessionState),
}
