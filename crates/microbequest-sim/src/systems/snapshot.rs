//! Snapshot system: queries the ECS world and builds a complete MatchSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use microbequest_behavior::profiles::size_radius;
use microbequest_core::components::*;
use microbequest_core::config::{LocationId, ToolConfig};
use microbequest_core::enums::*;
use microbequest_core::events::GameEvent;
use microbequest_core::state::*;
use microbequest_core::types::{Position, SimTime};

use crate::ledger::ResourceLedger;
use crate::match_state::MatchState;
use crate::systems::fire_control::FireControl;
use crate::systems::orchestrator;

/// Build a complete MatchSnapshot from the current world and engine state.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: MatchPhase,
    location: Option<&LocationId>,
    difficulty: Difficulty,
    tools: &[ToolConfig],
    ledger: &ResourceLedger,
    match_state: &MatchState,
    fire_control: &FireControl,
    events: Vec<GameEvent>,
) -> MatchSnapshot {
    MatchSnapshot {
        time: *time,
        phase,
        location: location.cloned(),
        difficulty,
        bacteria: build_bacteria(world),
        projectiles: build_projectiles(world),
        player: build_player(world, fire_control),
        resources: build_resources(tools, ledger, fire_control, time.elapsed_ms),
        hud: build_hud(world, match_state),
        events,
    }
}

/// Bacteria on the playfield in id order. Pending entries are not drawn.
fn build_bacteria(world: &World) -> Vec<BacteriumView> {
    let mut bacteria: Vec<BacteriumView> = world
        .query::<(&Bacterium, &Position)>()
        .iter()
        .filter(|(_, (b, _))| b.is_active())
        .map(|(_, (b, pos))| BacteriumView {
            id: b.id,
            kind: b.kind,
            species: b.species,
            position: *pos,
            size: b.size,
            radius: size_radius(b.size),
            health: b.current_health,
            max_health: b.max_health,
        })
        .collect();
    bacteria.sort_by_key(|b| b.id);
    bacteria
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<ProjectileView> = world
        .query::<(&Projectile, &Position)>()
        .iter()
        .filter(|(_, (p, _))| !p.is_spent())
        .map(|(_, (p, pos))| ProjectileView {
            id: p.id,
            tool: p.tool.clone(),
            behavior: p.behavior,
            position: *pos,
            radius: p.radius,
        })
        .collect();
    projectiles.sort_by_key(|p| p.id);
    projectiles
}

fn build_player(world: &World, fire_control: &FireControl) -> PlayerView {
    let position = world
        .query::<(&PlayerUnit, &Position)>()
        .iter()
        .next()
        .map(|(_, (_, pos))| *pos)
        .unwrap_or_default();
    PlayerView {
        position,
        trigger_held: fire_control.trigger_held(),
    }
}

fn build_resources(
    tools: &[ToolConfig],
    ledger: &ResourceLedger,
    fire_control: &FireControl,
    now_ms: u64,
) -> ResourceView {
    ResourceView {
        energy: ledger.energy(),
        ammo: ledger
            .ammo_pools()
            .map(|(ammo_type, count)| AmmoView {
                ammo_type: ammo_type.clone(),
                count,
            })
            .collect(),
        selected_tool: fire_control.selected().cloned(),
        tools: tools
            .iter()
            .map(|tool| ToolStatusView {
                tool: tool.id.clone(),
                affordable: ledger.can_afford(tool),
                cooldown_remaining_ms: fire_control.cooldown_remaining(tool, now_ms),
            })
            .collect(),
    }
}

fn build_hud(world: &World, match_state: &MatchState) -> HudView {
    let census = orchestrator::census(world);
    HudView {
        current_wave: match_state.current_wave,
        total_waves: match_state.total_waves,
        immune_health_pct: match_state.immune_health_pct(),
        balance_pct: match_state.balance_pct(),
        score: match_state.score,
        living: census.living,
        pending: census.pending,
        bad_killed: match_state.bad_killed,
        good_killed: match_state.good_killed,
        reached_body: match_state.reached_body,
    }
}
