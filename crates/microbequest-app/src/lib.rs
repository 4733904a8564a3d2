//! MicrobeQuest headless host.
//!
//! This crate wires the simulation crates to a real-time game loop thread,
//! an in-process control API, and a scripted autopilot for unattended runs.

pub mod autopilot;
pub mod control;
pub mod error;
pub mod game_loop;
pub mod logging;
pub mod runner;
pub mod state;

pub use microbequest_core as core;
