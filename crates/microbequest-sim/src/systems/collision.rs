//! Collision resolution: projectile/bacterium proximity and effect application.
//!
//! Runs after movement so every check in a frame sees the same positions.
//! Each projectile resolves at most once; the first active bacterium within
//! the hit radius (in id order) is the one struck.

use hecs::{Entity, World};

use microbequest_core::components::{Bacterium, Projectile};
use microbequest_core::config::ToolEffect;
use microbequest_core::constants::{AREA_EFFECT_RADIUS, HIT_RADIUS, KILL_ENERGY_REWARD};
use microbequest_core::enums::{BacteriaKind, BacteriumPhase};
use microbequest_core::events::GameEvent;
use microbequest_core::types::Position;

use crate::ledger::ResourceLedger;
use crate::match_state::MatchState;

/// Outcome of applying an effect to one bacterium.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectOutcome {
    /// The effect has no delta for this kind.
    Unaffected,
    /// Health changed (possibly by zero after clamping) and it survived.
    Changed { health: u32 },
    /// Health reached zero on this hit.
    Killed,
}

/// `current + delta`, clamped to `0..=max`.
pub fn apply_health_delta(current: u32, max: u32, delta: i32) -> u32 {
    (i64::from(current) + i64::from(delta)).clamp(0, i64::from(max)) as u32
}

/// Apply the kind-appropriate delta of `effect` to a bacterium.
pub fn apply_effect(bacterium: &mut Bacterium, effect: &ToolEffect) -> EffectOutcome {
    let delta = match bacterium.kind {
        BacteriaKind::Bad => effect.bad_delta,
        BacteriaKind::Good => effect.good_delta,
    };
    if delta == 0 || !bacterium.alive {
        return EffectOutcome::Unaffected;
    }

    bacterium.current_health =
        apply_health_delta(bacterium.current_health, bacterium.max_health, delta);

    if bacterium.current_health == 0 {
        bacterium.alive = false;
        bacterium.phase = BacteriumPhase::Killed;
        EffectOutcome::Killed
    } else {
        EffectOutcome::Changed {
            health: bacterium.current_health,
        }
    }
}

/// Resolve all projectile hits for this frame.
pub fn run(
    world: &mut World,
    match_state: &mut MatchState,
    ledger: &mut ResourceLedger,
    events: &mut Vec<GameEvent>,
) {
    let mut projectiles: Vec<(u32, Entity, Position, ToolEffect, bool)> = world
        .query::<(&Projectile, &Position)>()
        .iter()
        .filter(|(_, (p, _))| !p.is_spent())
        .map(|(e, (p, pos))| (p.id, e, *pos, p.effect, p.area_effect))
        .collect();
    projectiles.sort_by_key(|p| p.0);

    let mut targets: Vec<(u32, Entity, Position)> = world
        .query::<(&Bacterium, &Position)>()
        .iter()
        .filter(|(_, (b, _))| b.is_active())
        .map(|(e, (b, pos))| (b.id, e, *pos))
        .collect();
    targets.sort_by_key(|t| t.0);

    for (_id, projectile_entity, impact, effect, area_effect) in projectiles {
        let Some(&(_, struck, _)) = targets.iter().find(|(_, e, pos)| {
            is_active(world, *e) && pos.distance_to(&impact) < HIT_RADIUS
        }) else {
            continue;
        };

        let affected: Vec<Entity> = if area_effect {
            targets
                .iter()
                .filter(|(_, e, pos)| {
                    is_active(world, *e) && pos.distance_to(&impact) <= AREA_EFFECT_RADIUS
                })
                .map(|&(_, e, _)| e)
                .collect()
        } else {
            vec![struck]
        };

        for entity in affected {
            if let Ok(mut bacterium) = world.get::<&mut Bacterium>(entity) {
                resolve_effect(&mut bacterium, &effect, match_state, ledger, events);
            }
        }

        match_state.adjust_immune_health(effect.immune_health_delta);
        match_state.adjust_balance(effect.balance_delta);

        if let Ok(mut projectile) = world.get::<&mut Projectile>(projectile_entity) {
            projectile.resolved = true;
        }
    }
}

fn is_active(world: &World, entity: Entity) -> bool {
    world
        .get::<&Bacterium>(entity)
        .map(|b| b.is_active())
        .unwrap_or(false)
}

/// Apply the effect to one bacterium and settle score, rewards and events.
fn resolve_effect(
    bacterium: &mut Bacterium,
    effect: &ToolEffect,
    match_state: &mut MatchState,
    ledger: &mut ResourceLedger,
    events: &mut Vec<GameEvent>,
) {
    match apply_effect(bacterium, effect) {
        EffectOutcome::Unaffected => {}
        EffectOutcome::Changed { health } => events.push(GameEvent::BacteriumHit {
            id: bacterium.id,
            kind: bacterium.kind,
            health,
        }),
        EffectOutcome::Killed => {
            let points = match bacterium.kind {
                BacteriaKind::Bad => {
                    match_state.bad_killed += 1;
                    ledger.earn(KILL_ENERGY_REWARD);
                    bacterium.points
                }
                BacteriaKind::Good => {
                    match_state.good_killed += 1;
                    -bacterium.points
                }
            };
            match_state.score += points;
            events.push(GameEvent::BacteriumKilled {
                id: bacterium.id,
                kind: bacterium.kind,
                species: bacterium.species,
                points,
            });
        }
    }
}
