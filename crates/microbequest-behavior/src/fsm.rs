//! Bacterium crawl lifecycle state machine.
//!
//! Pure functions that compute the outcome of one crawl step for a single
//! bacterium: spawn-delay countdown, horizontal advance, and arrival at the body.
//! Killing is decided by collision resolution, not here.

use microbequest_core::constants::PLAYFIELD_WIDTH;
use microbequest_core::enums::{BacteriumPhase, SpeedClass};

use crate::profiles::speed_to_pixels;

/// Input to the crawl FSM for a single bacterium.
pub struct CrawlContext {
    pub phase: BacteriumPhase,
    pub x: f64,
    pub spawn_delay_ms: u64,
    pub speed: SpeedClass,
    /// Difficulty multiplier on crawl distance.
    pub speed_multiplier: f64,
    /// Length of the crawl step in milliseconds.
    pub step_ms: u64,
}

/// Output from the crawl FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrawlUpdate {
    pub new_phase: BacteriumPhase,
    pub new_x: f64,
    pub new_spawn_delay_ms: u64,
    pub phase_changed: bool,
}

/// Evaluate one crawl step.
pub fn evaluate(ctx: &CrawlContext) -> CrawlUpdate {
    let no_change = CrawlUpdate {
        new_phase: ctx.phase,
        new_x: ctx.x,
        new_spawn_delay_ms: ctx.spawn_delay_ms,
        phase_changed: false,
    };

    match ctx.phase {
        BacteriumPhase::ReachedBody | BacteriumPhase::Killed => no_change,
        BacteriumPhase::Entering if ctx.spawn_delay_ms > 0 => evaluate_entering(ctx),
        BacteriumPhase::Entering | BacteriumPhase::Crawling => evaluate_crawling(ctx),
    }
}

/// Count the entry delay down; no movement while it is pending.
fn evaluate_entering(ctx: &CrawlContext) -> CrawlUpdate {
    let remaining = ctx.spawn_delay_ms.saturating_sub(ctx.step_ms);
    CrawlUpdate {
        new_phase: if remaining == 0 {
            BacteriumPhase::Crawling
        } else {
            BacteriumPhase::Entering
        },
        new_x: ctx.x,
        new_spawn_delay_ms: remaining,
        phase_changed: remaining == 0,
    }
}

fn evaluate_crawling(ctx: &CrawlContext) -> CrawlUpdate {
    let new_x = ctx.x + speed_to_pixels(ctx.speed) * ctx.speed_multiplier;

    if new_x > PLAYFIELD_WIDTH {
        return CrawlUpdate {
            new_phase: BacteriumPhase::ReachedBody,
            new_x,
            new_spawn_delay_ms: 0,
            phase_changed: true,
        };
    }

    CrawlUpdate {
        new_phase: BacteriumPhase::Crawling,
        new_x,
        new_spawn_delay_ms: 0,
        phase_changed: ctx.phase != BacteriumPhase::Crawling,
    }
}
