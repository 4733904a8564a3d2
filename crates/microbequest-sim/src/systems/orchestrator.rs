//! Wave orchestration: decides when a wave is over and how the match ends.

use hecs::World;

use microbequest_core::components::Bacterium;
use microbequest_core::config::WinCondition;

use crate::match_state::MatchState;

/// Result of evaluating the current wave after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveOutcome {
    InProgress,
    /// Wave clear with more to come; waits for the player to advance.
    Cleared,
    Victory,
    Defeat,
}

/// Count of bacteria still in play.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Census {
    /// On the playfield.
    pub living: u32,
    /// Waiting out their spawn delay.
    pub pending: u32,
}

impl Census {
    pub fn is_empty(&self) -> bool {
        self.living == 0 && self.pending == 0
    }
}

pub fn census(world: &World) -> Census {
    let mut census = Census::default();
    for (_entity, bacterium) in world.query::<&Bacterium>().iter() {
        if !bacterium.alive {
            continue;
        }
        if bacterium.spawn_delay_ms > 0 {
            census.pending += 1;
        } else {
            census.living += 1;
        }
    }
    census
}

/// Evaluate wave and match state. Depleted immune health always wins;
/// otherwise the final wave's clear is judged by the location's win condition.
pub fn evaluate(
    world: &World,
    match_state: &MatchState,
    win_condition: WinCondition,
) -> WaveOutcome {
    if match_state.is_defeated() {
        return WaveOutcome::Defeat;
    }
    if !census(world).is_empty() {
        return WaveOutcome::InProgress;
    }
    if !match_state.is_final_wave() {
        return WaveOutcome::Cleared;
    }
    if win_condition.is_met(match_state.immune_health_pct(), match_state.balance_pct()) {
        WaveOutcome::Victory
    } else {
        WaveOutcome::Defeat
    }
}
