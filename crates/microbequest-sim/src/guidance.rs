//! Guidance helpers for projectiles.
//!
//! Provides spread-volley headings, nearest-target selection for homing,
//! direct-pursuit steering and playfield bounds checks.

use glam::DVec2;

use microbequest_core::constants::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use microbequest_core::types::{Position, Velocity};

/// Headings (radians from straight up) of the three projectiles in a spread volley.
pub fn spread_headings(half_angle: f64) -> [f64; 3] {
    [-half_angle, 0.0, half_angle]
}

/// Closest candidate by Euclidean distance. Ties keep the earliest candidate,
/// so callers that pass candidates in id order get a stable choice.
pub fn nearest_target<'a>(
    from: &Position,
    candidates: impl IntoIterator<Item = &'a Position>,
) -> Option<Position> {
    let origin = from.as_vec();
    let mut best: Option<(f64, Position)> = None;
    for candidate in candidates {
        let dist_sq = origin.distance_squared(candidate.as_vec());
        match best {
            Some((best_sq, _)) if best_sq <= dist_sq => {}
            _ => best = Some((dist_sq, *candidate)),
        }
    }
    best.map(|(_, pos)| pos)
}

/// Pure pursuit: velocity of magnitude `speed` pointing straight at the target.
/// Returns `None` when already on top of it (no defined direction).
pub fn steer_toward(from: &Position, target: &Position, speed: f64) -> Option<Velocity> {
    let direction = (target.as_vec() - from.as_vec()).try_normalize()?;
    Some(Velocity::from(direction * speed))
}

/// Whether a position lies outside the playfield expanded by `margin` on every side.
pub fn out_of_bounds(pos: &Position, margin: f64) -> bool {
    let min = DVec2::splat(-margin);
    let max = DVec2::new(PLAYFIELD_WIDTH + margin, PLAYFIELD_HEIGHT + margin);
    let p = pos.as_vec();
    p.cmplt(min).any() || p.cmpgt(max).any()
}
