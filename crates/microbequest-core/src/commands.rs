//! Player commands sent from the presentation layer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary. Invalid
//! commands are silent no-ops.

use serde::{Deserialize, Serialize};

use crate::config::{LocationId, ToolId};
use crate::enums::*;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Match setup ---
    /// Pick a body location and start its first wave.
    SelectLocation { location: LocationId },
    /// Pick the difficulty used by the next match.
    SelectDifficulty { level: Difficulty },

    // --- Combat ---
    /// Select a tool. Rejected when unaffordable; the previous tool stays selected.
    SelectTool { tool: ToolId },
    /// Fire the selected tool from the given point.
    Fire { x: f64, y: f64 },
    /// Hold or release the trigger; a held trigger fires from the player unit
    /// every frame the cooldown allows.
    SetTrigger { held: bool },
    /// Move the player unit to an absolute x (clamped).
    MoveTo { x: f64 },
    /// Nudge the player unit one step.
    Move { direction: Direction },

    // --- Flow control ---
    Pause,
    Resume,
    /// Start the next wave once the current one is clear.
    AdvanceWave,
    /// Rebuild the match at the same location and difficulty.
    Restart,
    /// Abandon the match and go back to location selection.
    ReturnToLocationSelect,
}
