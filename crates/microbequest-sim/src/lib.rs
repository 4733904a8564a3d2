//! Simulation engine for MicrobeQuest.
//!
//! Owns the hecs ECS world, runs systems at a fixed frame rate,
//! and produces MatchSnapshots for the presentation layer.

pub mod engine;
pub mod guidance;
pub mod ledger;
pub mod match_state;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use microbequest_core as core;

#[cfg(test)]
mod tests;
