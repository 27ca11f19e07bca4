//! Application driver.
//!
//! [`App`] owns the conversation and the session controller. Sessions report
//! through an update channel whose receiver is handed back from
//! [`App::new`], so the caller can `select!` on it alongside terminal input
//! and signals, then feed each update to [`App::handle_update`].

mod cancel;
mod handlers;
mod messages;
mod speak;
mod stream;

pub use messages::AppOutput;

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::client::TutorClient;
use crate::config::TutorConfig;
use crate::conversation::Conversation;
use crate::session::{SessionController, SessionUpdate};
use crate::traits::{AudioPlayer, HttpClient};

/// Main application state
pub struct App {
    /// Visible conversation
    pub conversation: Conversation,
    controller: SessionController,
    client: TutorClient,
    /// Player for one-shot speech; also used by sessions when audio is on
    player: Option<Arc<dyn AudioPlayer>>,
}

impl App {
    /// Build the app and the receiver for its session updates.
    ///
    /// `player` is only used when `config.audio_enabled` is set.
    pub fn new(
        config: &TutorConfig,
        http: Arc<dyn HttpClient>,
        player: Arc<dyn AudioPlayer>,
    ) -> (Self, mpsc::UnboundedReceiver<SessionUpdate>) {
        let (updates_tx, updates_rx) = mpsc::unbounded_channel();
        let client = TutorClient::from_config(http, config);
        let player = config.audio_enabled.then_some(player);

        let mut controller = SessionController::new(client.clone(), updates_tx).with_config(config);
        if let Some(player) = &player {
            controller = controller.with_player(Arc::clone(player));
        }

        let app = Self {
            conversation: Conversation::new(),
            controller,
            client,
            player,
        };
        (app, updates_rx)
    }

    /// Whether a turn is in progress.
    ///
    /// A turn lasts until its session's `Finished` update has been handled,
    /// which can be after the session itself ended.
    pub fn is_streaming(&self) -> bool {
        self.conversation.is_turn_open()
    }

    pub fn audio_enabled(&self) -> bool {
        self.player.is_some()
    }

    /// Wait for sessions and their queued audio to finish on their own.
    pub async fn wait_idle(&mut self) {
        self.controller.join().await;
    }
}
