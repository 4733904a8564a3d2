//! Events emitted by the simulation for UI feedback.

use serde::{Deserialize, Serialize};

use crate::config::{AmmoType, ToolId};
use crate::enums::*;

/// Something noteworthy that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    WaveStarted { wave: u32, size: u32 },
    /// Wave-start replenishment of an ammo pool.
    AmmoRefilled { ammo_type: AmmoType, amount: u32 },
    /// A trigger pull was accepted; `projectiles` is 3 for a spread volley.
    ShotFired { tool: ToolId, projectiles: u32 },
    /// A bacterium's health changed but it survived.
    BacteriumHit { id: u32, kind: BacteriaKind, health: u32 },
    BacteriumKilled {
        id: u32,
        kind: BacteriaKind,
        species: Species,
        points: i64,
    },
    /// A bacterium crossed into the body.
    ReachedBody { id: u32, kind: BacteriaKind },
    WaveCleared { wave: u32 },
    Victory,
    Defeat,
}
