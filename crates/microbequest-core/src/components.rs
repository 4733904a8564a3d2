//! ECS components for hecs entities.
//!
//! Components are plain data structs. Game logic lives in systems, not components.
//! `Position` and `Velocity` from `types` are used as components too.

use serde::{Deserialize, Serialize};

use crate::config::{ToolEffect, ToolId};
use crate::enums::*;

/// A simulated bacterium crawling toward the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bacterium {
    /// Stable id visible to the presentation layer.
    pub id: u32,
    pub kind: BacteriaKind,
    pub species: Species,
    pub speed: SpeedClass,
    pub size: SizeClass,
    pub max_health: u32,
    /// Always within `0..=max_health`.
    pub current_health: u32,
    /// Remaining staggered entry delay; the bacterium is inert while > 0.
    pub spawn_delay_ms: u64,
    pub alive: bool,
    /// Set when the bacterium crossed the right boundary.
    pub reached_end: bool,
    pub phase: BacteriumPhase,
    /// Score awarded (bad) or deducted (good) when killed.
    pub points: i64,
}

impl Bacterium {
    /// Alive and past its spawn delay: eligible for collisions and targeting.
    pub fn is_active(&self) -> bool {
        self.alive && self.spawn_delay_ms == 0
    }
}

/// A fired projectile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    /// Tool that fired it.
    pub tool: ToolId,
    pub effect: ToolEffect,
    pub behavior: ProjectileBehavior,
    pub area_effect: bool,
    pub radius: f64,
    /// Constant flight speed (units per frame).
    pub speed: f64,
    /// Hit something this frame; resolves at most once.
    pub resolved: bool,
    /// Left the playfield bounds.
    pub out_of_bounds: bool,
}

impl Projectile {
    pub fn is_spent(&self) -> bool {
        self.resolved || self.out_of_bounds
    }
}

/// Marks the player's unit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerUnit;
