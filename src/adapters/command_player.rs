//! Audio player that shells out to an external program.
//!
//! The item's URL is passed as the last argument; playback is over when the
//! process exits. The default program is `ffplay`, which streams HTTP URLs
//! directly.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::config::PlayerCommand;
use crate::error::PlaybackError;
use crate::playback::PlaybackItem;
use crate::traits::AudioPlayer;

/// Plays audio by running `<program> <args...> <url>` to completion.
#[derive(Debug, Clone)]
pub struct CommandPlayer {
    command: PlayerCommand,
}

impl CommandPlayer {
    pub fn new(command: PlayerCommand) -> Self {
        Self { command }
    }

    pub fn program(&self) -> &str {
        &self.command.program
    }
}

impl Default for CommandPlayer {
    fn default() -> Self {
        Self::new(PlayerCommand::default())
    }
}

#[async_trait]
impl AudioPlayer for CommandPlayer {
    async fn play(&self, item: &PlaybackItem) -> Result<(), PlaybackError> {
        let program = &self.command.program;
        debug!(program = %program, url = %item.source_url, "Spawning player");

        // Dropping the future (e.g. on shutdown) kills the player
        let mut child = Command::new(program)
            .args(&self.command.args)
            .arg(&item.source_url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| PlaybackError::Spawn {
                program: program.clone(),
                message: e.to_string(),
            })?;

        let status = child.wait().await.map_err(|e| PlaybackError::Output {
            message: e.to_string(),
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(PlaybackError::ExitStatus {
                program: program.clone(),
                status: status.to_string(),
            })
        }
    }
}
