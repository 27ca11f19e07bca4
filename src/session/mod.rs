//! Stream sessions.
//!
//! A session is one request and its streamed response. The
//! [`SessionController`] allows one active session at a time; each session
//! runs its read loop in its own task, owns its playback queue and reports
//! back as [`SessionUpdate`]s.
//!
//! ```text
//! start ──► Active ──► Completed            end of stream
//!              │  └──► Failed               status / transport error
//!              └─────► Aborted(Cancelled)   cancel()
//!                      Aborted(Deadline)    read deadline exceeded
//! ```

mod controller;
mod handle;
mod state;
mod task;

pub use controller::SessionController;
pub use handle::SessionHandle;
pub use state::{AbortReason, SessionState, SessionUpdate};
