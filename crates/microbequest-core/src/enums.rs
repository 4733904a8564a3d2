//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Whether a bacterium helps or harms the body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BacteriaKind {
    Good,
    #[default]
    Bad,
}

/// Bacterial species that can appear on the playfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Species {
    // --- Beneficial ---
    Lactobacillus,
    Bifidobacterium,
    StreptococcusThermophilus,
    BacteroidesFragilis,
    StaphylococcusEpidermidis,
    // --- Pathogenic ---
    Salmonella,
    EscherichiaColiO157,
    ClostridiumDifficile,
    StaphylococcusAureus,
    StreptococcusPyogenes,
    HelicobacterPylori,
}

impl Species {
    /// The kind this species belongs to.
    pub fn kind(self) -> BacteriaKind {
        match self {
            Species::Lactobacillus
            | Species::Bifidobacterium
            | Species::StreptococcusThermophilus
            | Species::BacteroidesFragilis
            | Species::StaphylococcusEpidermidis => BacteriaKind::Good,
            Species::Salmonella
            | Species::EscherichiaColiO157
            | Species::ClostridiumDifficile
            | Species::StaphylococcusAureus
            | Species::StreptococcusPyogenes
            | Species::HelicobacterPylori => BacteriaKind::Bad,
        }
    }
}

/// Crawl speed class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpeedClass {
    Slow,
    #[default]
    Medium,
    Fast,
}

/// Body size class (drives the rendered radius only).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeClass {
    Small,
    #[default]
    Medium,
    Large,
}

/// Bacterium lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BacteriumPhase {
    /// Waiting out its staggered spawn delay, not yet on the playfield.
    #[default]
    Entering,
    /// Crawling toward the body.
    Crawling,
    /// Crossed the right boundary.
    ReachedBody,
    /// Health reached zero.
    Killed,
}

/// Projectile flight behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileBehavior {
    /// Flies straight up.
    #[default]
    Straight,
    /// Flies straight until armed, then steers to the nearest bad bacterium.
    Homing,
    /// One trigger fans out three projectiles.
    Spread,
}

/// Difficulty preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Player movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

/// Match phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    #[default]
    LocationSelect,
    Playing,
    Paused,
    WaveClear,
    Victory,
    Defeat,
}

impl MatchPhase {
    /// Victory and Defeat end the match.
    pub fn is_terminal(self) -> bool {
        matches!(self, MatchPhase::Victory | MatchPhase::Defeat)
    }
}
