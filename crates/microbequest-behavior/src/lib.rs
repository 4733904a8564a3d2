//! Bacterium behavior for MicrobeQuest.
//!
//! Implements per-species profiles and the crawl lifecycle state machine.
//! No ECS dependency: everything here operates on plain data.

pub mod fsm;
pub mod profiles;

pub use microbequest_core as core;
