//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the player unit, bacteria and projectiles with
//! appropriate component bundles.

use hecs::World;

use microbequest_behavior::profiles::get_profile;
use microbequest_core::components::*;
use microbequest_core::config::ToolConfig;
use microbequest_core::constants::*;
use microbequest_core::enums::*;
use microbequest_core::types::{Position, Velocity};

/// Spawn the player's unit at its starting position.
pub fn spawn_player(world: &mut World) -> hecs::Entity {
    world.spawn((PlayerUnit, Position::new(PLAYER_START_X, PLAYER_Y)))
}

/// Spawn a bacterium of `species` at full health.
/// It stays in the Entering phase until `spawn_delay_ms` has elapsed.
pub fn spawn_bacterium(
    world: &mut World,
    id: u32,
    species: Species,
    position: Position,
    spawn_delay_ms: u64,
) -> hecs::Entity {
    let profile = get_profile(species);

    world.spawn((
        Bacterium {
            id,
            kind: profile.kind,
            species,
            speed: profile.speed,
            size: profile.size,
            max_health: profile.max_health,
            current_health: profile.max_health,
            spawn_delay_ms,
            alive: true,
            reached_end: false,
            phase: BacteriumPhase::Entering,
            points: profile.points,
        },
        position,
    ))
}

/// Spawn one projectile fired by `tool` from `origin`.
pub fn spawn_projectile(
    world: &mut World,
    id: u32,
    tool: &ToolConfig,
    origin: Position,
    velocity: Velocity,
) -> hecs::Entity {
    world.spawn((
        Projectile {
            id,
            tool: tool.id.clone(),
            effect: tool.effect,
            behavior: tool.behavior,
            area_effect: tool.area_effect,
            radius: tool.projectile_radius,
            speed: tool.projectile_speed,
            resolved: false,
            out_of_bounds: false,
        },
        origin,
        velocity,
    ))
}
