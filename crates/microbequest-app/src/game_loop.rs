//! Dedicated frame thread for the simulation.
//!
//! The thread owns its `SimulationEngine` outright; the outside world only
//! reaches it through the command channel and the published snapshot slot.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use microbequest_core::config::GameConfig;
use microbequest_core::enums::MatchPhase;
use microbequest_core::state::MatchSnapshot;
use microbequest_sim::engine::{SimConfig, SimulationEngine};

use crate::state::GameLoopCommand;

/// Wall-clock duration of one frame.
pub fn tick_duration(frame_ms: u64) -> Duration {
    Duration::from_millis(frame_ms.max(1))
}

/// Start the frame thread. The engine is built on that thread from `sim`
/// and `config`; the returned sender feeds it player commands.
pub fn spawn_game_loop(
    sim: SimConfig,
    config: GameConfig,
    latest_snapshot: Arc<Mutex<Option<MatchSnapshot>>>,
) -> (mpsc::Sender<GameLoopCommand>, JoinHandle<()>) {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("microbequest-game-loop".into())
        .spawn(move || {
            let frame = tick_duration(sim.frame_ms);
            let engine = SimulationEngine::with_config(sim, config);
            run_game_loop(engine, frame, cmd_rx, &latest_snapshot);
        })
        .expect("Failed to spawn game loop thread");

    (cmd_tx, handle)
}

/// Frame loop. Exits on `Shutdown` or when every sender is gone.
fn run_game_loop(
    mut engine: SimulationEngine,
    frame: Duration,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<MatchSnapshot>>,
) {
    let mut deadline = Instant::now();
    let mut last_phase = engine.phase();

    loop {
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(command)) => engine.queue_command(command),
                Ok(GameLoopCommand::Shutdown) => {
                    log::info!("game loop shutting down at tick {}", engine.time().tick);
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // Paused and menu phases still tick; the engine freezes its own clock.
        let snapshot = engine.tick();
        log_phase_change(&mut last_phase, snapshot.phase);
        match latest_snapshot.lock() {
            Ok(mut slot) => *slot = Some(snapshot),
            Err(_) => log::warn!("snapshot slot poisoned, dropping frame"),
        }

        deadline += frame;
        let now = Instant::now();
        if deadline > now {
            std::thread::sleep(deadline - now);
        } else if now - deadline > frame * 2 {
            // More than two frames late: skip ahead instead of bursting.
            deadline = now;
        }
    }
}

fn log_phase_change(last: &mut MatchPhase, current: MatchPhase) {
    if *last != current {
        log::debug!("phase {last:?} -> {current:?}");
        *last = current;
    }
}
