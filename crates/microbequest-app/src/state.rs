//! State shared between the control API and the frame thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use microbequest_core::commands::PlayerCommand;
use microbequest_core::state::MatchSnapshot;

/// Messages accepted by the frame thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    PlayerCommand(PlayerCommand),
    /// Leave the loop after the current frame.
    Shutdown,
}

/// Handles to a started frame thread.
pub struct RunningLoop {
    pub command_tx: mpsc::Sender<GameLoopCommand>,
    pub handle: JoinHandle<()>,
}

/// Shared application state; `Send + Sync` so a host can hand it to any thread.
#[derive(Default)]
pub struct AppState {
    /// `None` until `start_simulation`, and again after `stop_simulation`.
    pub running: Mutex<Option<RunningLoop>>,
    /// Written by the frame thread once per frame.
    pub latest_snapshot: Arc<Mutex<Option<MatchSnapshot>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running.lock().map(|slot| slot.is_some()).unwrap_or(false)
    }
}
