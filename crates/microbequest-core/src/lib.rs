//! Core types and definitions for the MicrobeQuest combat simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, snapshots, events, constants and the externally
//! authored game configuration. It has no dependency on any runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
