//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions that take `&mut World` (or `&World` for read-only)
//! plus exactly the engine-owned state they are allowed to touch.

pub mod cleanup;
pub mod collision;
pub mod crawl;
pub mod fire_control;
pub mod orchestrator;
pub mod projectile_motion;
pub mod snapshot;
pub mod spawn_controller;
