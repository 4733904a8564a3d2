//! Crawl system: the coarse bacteria movement step.
//!
//! Counts down spawn delays, advances bacteria toward the body and turns
//! arrivals into body-meter changes. Runs once per crawl interval, not per frame.

use hecs::World;

use microbequest_behavior::fsm::{self, CrawlContext};
use microbequest_core::components::Bacterium;
use microbequest_core::constants::{BAD_ARRIVAL_BALANCE, GOOD_ARRIVAL_BALANCE};
use microbequest_core::enums::{BacteriaKind, BacteriumPhase};
use microbequest_core::events::GameEvent;
use microbequest_core::types::Position;

use crate::match_state::MatchState;

/// Run one crawl step of `step_ms` for every living bacterium.
pub fn run(
    world: &mut World,
    step_ms: u64,
    speed_multiplier: f64,
    body_damage: i32,
    match_state: &mut MatchState,
    events: &mut Vec<GameEvent>,
) {
    let mut arrivals: Vec<(u32, BacteriaKind)> = Vec::new();

    for (_entity, (bacterium, pos)) in world.query_mut::<(&mut Bacterium, &mut Position)>() {
        if !bacterium.alive {
            continue;
        }

        let update = fsm::evaluate(&CrawlContext {
            phase: bacterium.phase,
            x: pos.x,
            spawn_delay_ms: bacterium.spawn_delay_ms,
            speed: bacterium.speed,
            speed_multiplier,
            step_ms,
        });

        pos.x = update.new_x;
        bacterium.spawn_delay_ms = update.new_spawn_delay_ms;
        if !update.phase_changed {
            continue;
        }

        bacterium.phase = update.new_phase;
        if update.new_phase == BacteriumPhase::ReachedBody {
            bacterium.alive = false;
            bacterium.reached_end = true;
            arrivals.push((bacterium.id, bacterium.kind));
        }
    }

    arrivals.sort_by_key(|&(id, _)| id);
    for (id, kind) in arrivals {
        match kind {
            BacteriaKind::Bad => {
                match_state.adjust_immune_health(-body_damage);
                match_state.adjust_balance(-BAD_ARRIVAL_BALANCE);
            }
            BacteriaKind::Good => match_state.adjust_balance(GOOD_ARRIVAL_BALANCE),
        }
        match_state.reached_body += 1;
        events.push(GameEvent::ReachedBody { id, kind });
    }
}
