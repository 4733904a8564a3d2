//! Match state: wave progress, body meters and score.
//!
//! Owned by `SimulationEngine` as the single source of truth for the HUD.

use microbequest_core::constants::{PCT_MAX, STARTING_BALANCE, STARTING_IMMUNE_HEALTH};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    /// 1-based wave number; 0 before the first wave starts.
    pub current_wave: u32,
    pub total_waves: u32,
    immune_health_pct: i32,
    balance_pct: i32,
    pub score: i64,
    pub bad_killed: u32,
    pub good_killed: u32,
    pub reached_body: u32,
}

impl MatchState {
    pub fn new(total_waves: u32) -> Self {
        Self {
            current_wave: 0,
            total_waves,
            immune_health_pct: STARTING_IMMUNE_HEALTH,
            balance_pct: STARTING_BALANCE,
            score: 0,
            bad_killed: 0,
            good_killed: 0,
            reached_body: 0,
        }
    }

    pub fn immune_health_pct(&self) -> i32 {
        self.immune_health_pct
    }

    pub fn balance_pct(&self) -> i32 {
        self.balance_pct
    }

    /// Apply a signed change to immune health, clamped to 0..=100.
    pub fn adjust_immune_health(&mut self, delta: i32) {
        self.immune_health_pct = clamp_pct(self.immune_health_pct.saturating_add(delta));
    }

    /// Apply a signed change to balance, clamped to 0..=100.
    pub fn adjust_balance(&mut self, delta: i32) {
        self.balance_pct = clamp_pct(self.balance_pct.saturating_add(delta));
    }

    pub fn is_defeated(&self) -> bool {
        self.immune_health_pct <= 0
    }

    pub fn is_final_wave(&self) -> bool {
        self.current_wave >= self.total_waves
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(0)
    }
}

fn clamp_pct(value: i32) -> i32 {
    value.clamp(0, PCT_MAX)
}
