//! Projectile motion system: per-frame integration plus homing re-targeting.
//!
//! Updates Position from Velocity each frame: position += velocity.
//! Armed homing projectiles first steer toward the nearest active bad bacterium.

use hecs::World;

use microbequest_core::components::{Bacterium, Projectile};
use microbequest_core::constants::HOMING_ARM_Y;
use microbequest_core::enums::{BacteriaKind, ProjectileBehavior};
use microbequest_core::types::{Position, Velocity};

use crate::guidance;

/// Advance every projectile by one frame and flag the ones leaving the playfield.
pub fn run(world: &mut World, bounds_margin: f64) {
    let targets = homing_targets(world);

    for (_entity, (projectile, pos, vel)) in
        world.query_mut::<(&mut Projectile, &mut Position, &mut Velocity)>()
    {
        if projectile.is_spent() {
            continue;
        }

        if projectile.behavior == ProjectileBehavior::Homing && pos.y <= HOMING_ARM_Y {
            if let Some(target) = guidance::nearest_target(pos, &targets) {
                if let Some(steered) = guidance::steer_toward(pos, &target, projectile.speed) {
                    *vel = steered;
                }
            }
        }

        pos.x += vel.x;
        pos.y += vel.y;

        if guidance::out_of_bounds(pos, bounds_margin) {
            projectile.out_of_bounds = true;
        }
    }
}

/// Positions of active bad bacteria, in id order.
fn homing_targets(world: &World) -> Vec<Position> {
    let mut targets: Vec<(u32, Position)> = world
        .query::<(&Bacterium, &Position)>()
        .iter()
        .filter(|(_, (b, _))| b.kind == BacteriaKind::Bad && b.is_active())
        .map(|(_, (b, pos))| (b.id, *pos))
        .collect();
    targets.sort_by_key(|&(id, _)| id);
    targets.into_iter().map(|(_, pos)| pos).collect()
}
