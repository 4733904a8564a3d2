//! Cleanup system: removes dead bacteria and spent projectiles.

use hecs::{Entity, World};

use microbequest_core::components::{Bacterium, Projectile};

/// Despawn bacteria that were killed or reached the body, and projectiles
/// that hit something or left the playfield.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, bacterium) in world.query_mut::<&Bacterium>() {
        if !bacterium.alive {
            despawn_buffer.push(entity);
        }
    }

    for (entity, projectile) in world.query_mut::<&Projectile>() {
        if projectile.is_spent() {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
