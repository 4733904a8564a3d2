//! Match snapshot: the complete visible state handed to the presentation layer each tick.

use serde::{Deserialize, Serialize};

use crate::config::{AmmoType, LocationId, ToolId};
use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{Position, SimTime};

/// Complete read-only state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub time: SimTime,
    pub phase: MatchPhase,
    pub location: Option<LocationId>,
    pub difficulty: Difficulty,
    /// Bacteria currently on the playfield (pending entries excluded).
    pub bacteria: Vec<BacteriumView>,
    pub projectiles: Vec<ProjectileView>,
    pub player: PlayerView,
    pub resources: ResourceView,
    pub hud: HudView,
    pub events: Vec<GameEvent>,
}

/// A bacterium as drawn on the playfield.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacteriumView {
    pub id: u32,
    pub kind: BacteriaKind,
    pub species: Species,
    pub position: Position,
    pub size: SizeClass,
    /// Rendered radius for the size class.
    pub radius: f64,
    pub health: u32,
    pub max_health: u32,
}

/// A projectile in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: u32,
    pub tool: ToolId,
    pub behavior: ProjectileBehavior,
    pub position: Position,
    pub radius: f64,
}

/// The player's unit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Position,
    pub trigger_held: bool,
}

/// Ledger and tool availability for the HUD.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceView {
    pub energy: u32,
    pub ammo: Vec<AmmoView>,
    pub selected_tool: Option<ToolId>,
    pub tools: Vec<ToolStatusView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmmoView {
    pub ammo_type: AmmoType,
    pub count: u32,
}

/// Whether a tool could be used right now.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolStatusView {
    pub tool: ToolId,
    /// Enough energy and ammo for one trigger pull.
    pub affordable: bool,
    /// Milliseconds until the cooldown allows another shot.
    pub cooldown_remaining_ms: u64,
}

/// Match meters and counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HudView {
    pub current_wave: u32,
    pub total_waves: u32,
    pub immune_health_pct: i32,
    pub balance_pct: i32,
    pub score: i64,
    /// Bacteria on the playfield.
    pub living: u32,
    /// Bacteria still waiting out their spawn delay.
    pub pending: u32,
    pub bad_killed: u32,
    pub good_killed: u32,
    pub reached_body: u32,
}
