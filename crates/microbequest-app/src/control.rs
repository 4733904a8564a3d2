//! In-process control API.
//!
//! What a UI host calls: commands go to the frame thread over its channel,
//! and snapshots are read back from the shared slot.

use std::sync::PoisonError;

use thiserror::Error;

use microbequest_core::commands::PlayerCommand;
use microbequest_core::config::GameConfig;
use microbequest_core::state::MatchSnapshot;
use microbequest_sim::engine::SimConfig;

use crate::game_loop;
use crate::state::{AppState, GameLoopCommand, RunningLoop};

#[derive(Debug, Error)]
pub enum ControlError {
    #[error("simulation already running")]
    AlreadyRunning,
    #[error("simulation not started")]
    NotStarted,
    #[error("game loop is no longer running")]
    Disconnected,
    #[error("shared state lock poisoned")]
    Poisoned,
}

impl<T> From<PoisonError<T>> for ControlError {
    fn from(_: PoisonError<T>) -> Self {
        ControlError::Poisoned
    }
}

/// Spawn the frame thread. At most one runs per `AppState`.
pub fn start_simulation(
    state: &AppState,
    sim: SimConfig,
    config: GameConfig,
) -> Result<(), ControlError> {
    let mut slot = state.running.lock()?;
    if slot.is_some() {
        return Err(ControlError::AlreadyRunning);
    }

    let seed = sim.seed;
    let (command_tx, handle) =
        game_loop::spawn_game_loop(sim, config, state.latest_snapshot.clone());
    *slot = Some(RunningLoop { command_tx, handle });

    log::info!("simulation started (seed {seed})");
    Ok(())
}

/// Queue a player command; it takes effect at the start of the next frame.
pub fn send_command(state: &AppState, command: PlayerCommand) -> Result<(), ControlError> {
    let slot = state.running.lock()?;
    let running = slot.as_ref().ok_or(ControlError::NotStarted)?;
    running
        .command_tx
        .send(GameLoopCommand::PlayerCommand(command))
        .map_err(|_| ControlError::Disconnected)
}

/// Most recently published snapshot, or `None` before the first frame.
pub fn get_snapshot(state: &AppState) -> Result<Option<MatchSnapshot>, ControlError> {
    Ok(state.latest_snapshot.lock()?.clone())
}

/// Ask the frame thread to exit and join it.
pub fn stop_simulation(state: &AppState) -> Result<(), ControlError> {
    let running = state.running.lock()?.take().ok_or(ControlError::NotStarted)?;

    // The loop may already be gone; the join below still reaps it.
    let _ = running.command_tx.send(GameLoopCommand::Shutdown);
    running.handle.join().map_err(|_| ControlError::Disconnected)?;
    log::info!("simulation stopped");
    Ok(())
}
