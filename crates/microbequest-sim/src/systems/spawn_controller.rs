//! Spawn controller: builds each wave of bacteria with staggered entry
//! and replenishes ammunition as the wave starts.

use std::collections::HashSet;

use hecs::World;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use microbequest_core::config::{DifficultyConfig, LocationConfig, ToolConfig};
use microbequest_core::constants::*;
use microbequest_core::enums::{BacteriaKind, Species};
use microbequest_core::events::GameEvent;
use microbequest_core::types::Position;

use crate::ledger::ResourceLedger;

/// One planned bacterium of a wave.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BacteriumSpec {
    pub species: Species,
    pub lane_y: f64,
    pub spawn_delay_ms: u64,
}

/// Number of bacteria in wave `wave`.
pub fn wave_size(wave: u32) -> u32 {
    WAVE_BASE_SIZE
        .saturating_add(wave.saturating_mul(WAVE_SIZE_PER_WAVE))
        .min(WAVE_MAX_SIZE)
}

/// Species drawn for `kind` at this location, narrowed by difficulty variety.
/// Never narrower than one species when the location allows any.
pub fn species_pool<'a>(
    location: &'a LocationConfig,
    kind: BacteriaKind,
    difficulty: &DifficultyConfig,
) -> &'a [Species] {
    let all = location.species_of(kind);
    if all.is_empty() {
        return all;
    }
    let count = (all.len() as f64 * difficulty.species_variety).ceil() as usize;
    &all[..count.clamp(1, all.len())]
}

/// Plan the composition of a wave. Consumes the RNG in a fixed order
/// (kind, species, lane) per bacterium so plans are reproducible per seed.
pub fn plan_wave(
    wave: u32,
    location: &LocationConfig,
    difficulty: &DifficultyConfig,
    rng: &mut ChaCha8Rng,
) -> Vec<BacteriumSpec> {
    let size = wave_size(wave);
    let mut plan = Vec::with_capacity(size as usize);

    for index in 0..size {
        let kind = if rng.gen_bool(GOOD_SPAWN_PROBABILITY) {
            BacteriaKind::Good
        } else {
            BacteriaKind::Bad
        };
        let mut pool = species_pool(location, kind, difficulty);
        if pool.is_empty() {
            let other = match kind {
                BacteriaKind::Good => BacteriaKind::Bad,
                BacteriaKind::Bad => BacteriaKind::Good,
            };
            pool = species_pool(location, other, difficulty);
        }
        let Some(&species) = pool.choose(rng) else {
            log::warn!("location {} has no species to spawn", location.id);
            break;
        };
        let lane_y = rng.gen_range(LANE_MIN_Y..=LANE_MAX_Y);

        plan.push(BacteriumSpec {
            species,
            lane_y,
            spawn_delay_ms: u64::from(index) * SPAWN_STAGGER_MS,
        });
    }

    plan
}

/// Start wave `wave`: refill ammo, then spawn the planned bacteria.
/// Returns the number of bacteria spawned.
#[allow(clippy::too_many_arguments)]
pub fn start_wave(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    ledger: &mut ResourceLedger,
    tools: &[ToolConfig],
    location: &LocationConfig,
    difficulty: &DifficultyConfig,
    wave: u32,
    next_bacterium_id: &mut u32,
    events: &mut Vec<GameEvent>,
) -> u32 {
    refill_ammo(ledger, tools, events);

    let plan = plan_wave(wave, location, difficulty, rng);
    for spec in &plan {
        crate::world_setup::spawn_bacterium(
            world,
            *next_bacterium_id,
            spec.species,
            Position::new(SPAWN_X, spec.lane_y),
            spec.spawn_delay_ms,
        );
        *next_bacterium_id += 1;
    }

    let size = plan.len() as u32;
    log::debug!("wave {wave} at {}: {size} bacteria", location.id);
    events.push(GameEvent::WaveStarted { wave, size });
    size
}

/// Partial refill of every ammo pool, once per distinct ammo type.
fn refill_ammo(ledger: &mut ResourceLedger, tools: &[ToolConfig], events: &mut Vec<GameEvent>) {
    let mut seen = HashSet::new();
    for tool in tools {
        if !seen.insert(&tool.ammo_type) {
            continue;
        }
        let added = ledger.refill(&tool.ammo_type, tool.refill_amount, tool.ammo_cap);
        if added > 0 {
            events.push(GameEvent::AmmoRefilled {
                ammo_type: tool.ammo_type.clone(),
                amount: added,
            });
        }
    }
}
