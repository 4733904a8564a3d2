//! Unattended match runs driven by the autopilot.
//!
//! `run_headless` steps the engine as fast as it can on the calling thread;
//! `run_realtime` goes through the game loop thread and control API exactly
//! as a UI host would, polling the published snapshot once per frame.

use std::time::Duration;

use serde::Serialize;

use microbequest_core::commands::PlayerCommand;
use microbequest_core::config::{GameConfig, LocationId};
use microbequest_core::enums::{Difficulty, MatchPhase};
use microbequest_core::state::MatchSnapshot;
use microbequest_sim::engine::{SimConfig, SimulationEngine};

use crate::autopilot;
use crate::control;
use crate::error::AppError;
use crate::state::AppState;

/// Which match to play.
#[derive(Debug, Clone)]
pub struct MatchSetup {
    pub location: LocationId,
    pub difficulty: Difficulty,
}

impl MatchSetup {
    fn commands(&self) -> [PlayerCommand; 2] {
        [
            PlayerCommand::SelectDifficulty {
                level: self.difficulty,
            },
            PlayerCommand::SelectLocation {
                location: self.location.clone(),
            },
        ]
    }
}

/// Machine-readable result of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub location: LocationId,
    pub difficulty: Difficulty,
    /// Final phase; not terminal when the tick limit was hit first.
    pub outcome: MatchPhase,
    pub ticks: u64,
    pub elapsed_ms: u64,
    pub wave: u32,
    pub total_waves: u32,
    pub score: i64,
    pub immune_health_pct: i32,
    pub balance_pct: i32,
    pub energy: u32,
    pub bad_killed: u32,
    pub good_killed: u32,
    pub reached_body: u32,
}

impl RunSummary {
    pub fn new(seed: u64, setup: &MatchSetup, snapshot: &MatchSnapshot) -> Self {
        Self {
            seed,
            location: setup.location.clone(),
            difficulty: snapshot.difficulty,
            outcome: snapshot.phase,
            ticks: snapshot.time.tick,
            elapsed_ms: snapshot.time.elapsed_ms,
            wave: snapshot.hud.current_wave,
            total_waves: snapshot.hud.total_waves,
            score: snapshot.hud.score,
            immune_health_pct: snapshot.hud.immune_health_pct,
            balance_pct: snapshot.hud.balance_pct,
            energy: snapshot.resources.energy,
            bad_killed: snapshot.hud.bad_killed,
            good_killed: snapshot.hud.good_killed,
            reached_body: snapshot.hud.reached_body,
        }
    }
}

fn check_location(config: &GameConfig, setup: &MatchSetup) -> Result<(), AppError> {
    match config.location(&setup.location) {
        Some(_) => Ok(()),
        None => Err(AppError::UnknownLocation(setup.location.clone())),
    }
}

/// Play one match on the current thread until it ends or `max_ticks` frames pass.
pub fn run_headless(
    sim: SimConfig,
    config: GameConfig,
    setup: &MatchSetup,
    max_ticks: u64,
) -> Result<(RunSummary, MatchSnapshot), AppError> {
    check_location(&config, setup)?;
    let seed = sim.seed;
    let mut engine = SimulationEngine::with_config(sim, config);
    engine.queue_commands(setup.commands());

    let mut snapshot = engine.tick();
    while !snapshot.phase.is_terminal() && snapshot.time.tick < max_ticks {
        engine.queue_commands(autopilot::decide(&snapshot));
        snapshot = engine.tick();
    }

    log::info!(
        "headless run finished: {:?} after {} ticks",
        snapshot.phase,
        snapshot.time.tick
    );
    Ok((RunSummary::new(seed, setup, &snapshot), snapshot))
}

/// Play one match through the game loop thread at the real frame rate.
pub fn run_realtime(
    sim: SimConfig,
    config: GameConfig,
    setup: &MatchSetup,
    max_ticks: u64,
) -> Result<(RunSummary, MatchSnapshot), AppError> {
    check_location(&config, setup)?;
    let seed = sim.seed;
    let frame = Duration::from_millis(sim.frame_ms.max(1));

    let state = AppState::new();
    control::start_simulation(&state, sim, config)?;
    for command in setup.commands() {
        control::send_command(&state, command)?;
    }

    let mut last_tick = None;
    let outcome = loop {
        std::thread::sleep(frame);
        let Some(snapshot) = control::get_snapshot(&state)? else {
            continue;
        };
        // Until the match has started the loop publishes the idle menu state.
        if snapshot.phase == MatchPhase::LocationSelect {
            continue;
        }
        if snapshot.phase.is_terminal() || snapshot.time.tick >= max_ticks {
            break snapshot;
        }
        if last_tick == Some(snapshot.time.tick) && snapshot.phase == MatchPhase::Playing {
            continue;
        }
        last_tick = Some(snapshot.time.tick);
        for command in autopilot::decide(&snapshot) {
            control::send_command(&state, command)?;
        }
    };

    control::stop_simulation(&state)?;
    log::info!(
        "realtime run finished: {:?} after {} ticks",
        outcome.phase,
        outcome.time.tick
    );
    Ok((RunSummary::new(seed, setup, &outcome), outcome))
}
