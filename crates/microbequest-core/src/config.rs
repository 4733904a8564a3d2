//! Externally authored game data: body locations, difficulty presets and tools.
//!
//! The simulation never computes any of this. A built-in catalog is available
//! through `GameConfig::default()`, and hosts may supply their own as JSON.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_SPREAD_ANGLE;
use crate::enums::{BacteriaKind, Difficulty, ProjectileBehavior, Species};
use crate::error::ConfigError;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }
    };
}

string_id!(
    /// Identifier of a tool/weapon definition.
    ToolId
);
string_id!(
    /// Identifier of an ammunition pool shared by one or more tools.
    AmmoType
);
string_id!(
    /// Identifier of a body location.
    LocationId
);

/// What a tool does on impact. All deltas are signed; zero means "no effect".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolEffect {
    /// Health change applied to bad bacteria (negative = damage).
    pub bad_delta: i32,
    /// Health change applied to good bacteria (positive = heal, negative = collateral).
    pub good_delta: i32,
    /// Change to the body's immune health meter, once per impact.
    pub immune_health_delta: i32,
    /// Change to the microbiome balance meter, once per impact.
    pub balance_delta: i32,
}

fn default_spread_angle() -> f64 {
    DEFAULT_SPREAD_ANGLE
}

fn default_projectile_radius() -> f64 {
    6.0
}

/// A tool the player can select and fire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolConfig {
    pub id: ToolId,
    pub name: String,
    /// Energy spent per trigger pull.
    pub cost: u32,
    pub ammo_type: AmmoType,
    /// Ammo in the pool when a match starts.
    pub initial_ammo: u32,
    /// Ammo added to the pool at every wave start.
    pub refill_amount: u32,
    /// Refills never push the pool above this.
    pub ammo_cap: u32,
    /// Minimum interval between two accepted shots.
    pub cooldown_ms: u64,
    /// Projectile speed in units per frame.
    pub projectile_speed: f64,
    #[serde(default = "default_projectile_radius")]
    pub projectile_radius: f64,
    #[serde(default)]
    pub behavior: ProjectileBehavior,
    /// Impact affects every bacterium within the area radius.
    #[serde(default)]
    pub area_effect: bool,
    /// Half-angle of a spread volley (radians).
    #[serde(default = "default_spread_angle")]
    pub spread_angle: f64,
    pub effect: ToolEffect,
}

impl ToolConfig {
    /// Damage dealt to bad bacteria per hit.
    pub fn damage(&self) -> u32 {
        self.effect.bad_delta.min(0).unsigned_abs()
    }
}

/// Condition checked when the final wave is cleared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WinCondition {
    /// Surviving every wave is enough.
    #[default]
    ClearAllWaves,
    /// Balance must end at or above `pct`.
    BalanceAtLeast { pct: i32 },
    /// Immune health must end at or above `pct`.
    HealthAtLeast { pct: i32 },
}

impl WinCondition {
    pub fn is_met(&self, immune_health_pct: i32, balance_pct: i32) -> bool {
        match *self {
            WinCondition::ClearAllWaves => true,
            WinCondition::BalanceAtLeast { pct } => balance_pct >= pct,
            WinCondition::HealthAtLeast { pct } => immune_health_pct >= pct,
        }
    }
}

/// A body location: which species live there and how long the fight lasts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    pub id: LocationId,
    pub name: String,
    pub good_species: Vec<Species>,
    pub bad_species: Vec<Species>,
    pub total_waves: u32,
    #[serde(default)]
    pub win_condition: WinCondition,
}

impl LocationConfig {
    /// Allowed species of the given kind.
    pub fn species_of(&self, kind: BacteriaKind) -> &[Species] {
        match kind {
            BacteriaKind::Good => &self.good_species,
            BacteriaKind::Bad => &self.bad_species,
        }
    }
}

/// Difficulty preset parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyConfig {
    pub level: Difficulty,
    /// Multiplier on crawl speed.
    pub speed_multiplier: f64,
    /// Fraction (0, 1] of each allowed species list used when spawning.
    pub species_variety: f64,
    pub starting_energy: u32,
    /// Immune health lost when a bad bacterium reaches the body.
    pub body_damage: i32,
}

impl DifficultyConfig {
    /// Built-in preset for a level.
    pub fn preset(level: Difficulty) -> Self {
        match level {
            Difficulty::Easy => DifficultyConfig {
                level,
                speed_multiplier: 0.75,
                species_variety: 0.5,
                starting_energy: 150,
                body_damage: 5,
            },
            Difficulty::Normal => DifficultyConfig {
                level,
                speed_multiplier: 1.0,
                species_variety: 0.75,
                starting_energy: 100,
                body_damage: 10,
            },
            Difficulty::Hard => DifficultyConfig {
                level,
                speed_multiplier: 1.35,
                species_variety: 1.0,
                starting_energy: 80,
                body_damage: 15,
            },
        }
    }
}

/// The complete externally authored catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub locations: Vec<LocationConfig>,
    #[serde(default)]
    pub difficulties: Vec<DifficultyConfig>,
    pub tools: Vec<ToolConfig>,
}

impl GameConfig {
    /// Parse and validate a catalog from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a catalog from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!(
            "loaded config from {}: {} locations, {} tools",
            path.display(),
            config.locations.len(),
            config.tools.len()
        );
        Ok(config)
    }

    /// Reject catalogs the simulation cannot run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tools.is_empty() {
            return Err(ConfigError::invalid("at least one tool is required"));
        }
        if self.locations.is_empty() {
            return Err(ConfigError::invalid("at least one location is required"));
        }

        let mut tool_ids = HashSet::new();
        for tool in &self.tools {
            if !tool_ids.insert(&tool.id) {
                return Err(ConfigError::invalid(format!("duplicate tool id `{}`", tool.id)));
            }
            if !(tool.projectile_speed > 0.0) {
                return Err(ConfigError::invalid(format!(
                    "tool `{}` has a non-positive projectile speed",
                    tool.id
                )));
            }
            if tool.ammo_cap == 0 {
                return Err(ConfigError::invalid(format!(
                    "tool `{}` has an ammo cap of 0",
                    tool.id
                )));
            }
            if tool.initial_ammo > tool.ammo_cap {
                return Err(ConfigError::invalid(format!(
                    "tool `{}` starts with more ammo than its cap",
                    tool.id
                )));
            }
        }

        let mut location_ids = HashSet::new();
        for location in &self.locations {
            if !location_ids.insert(&location.id) {
                return Err(ConfigError::invalid(format!(
                    "duplicate location id `{}`",
                    location.id
                )));
            }
            if location.total_waves == 0 {
                return Err(ConfigError::invalid(format!(
                    "location `{}` has no waves",
                    location.id
                )));
            }
            if location.good_species.is_empty() && location.bad_species.is_empty() {
                return Err(ConfigError::invalid(format!(
                    "location `{}` allows no species",
                    location.id
                )));
            }
            for kind in [BacteriaKind::Good, BacteriaKind::Bad] {
                if let Some(species) = location.species_of(kind).iter().find(|s| s.kind() != kind) {
                    return Err(ConfigError::invalid(format!(
                        "location `{}` lists {species:?} as {kind:?}",
                        location.id
                    )));
                }
            }
        }

        for difficulty in &self.difficulties {
            if !(difficulty.speed_multiplier > 0.0) {
                return Err(ConfigError::invalid(format!(
                    "difficulty {:?} has a non-positive speed multiplier",
                    difficulty.level
                )));
            }
            if !(difficulty.species_variety > 0.0 && difficulty.species_variety <= 1.0) {
                return Err(ConfigError::invalid(format!(
                    "difficulty {:?} species variety must be in (0, 1]",
                    difficulty.level
                )));
            }
        }

        Ok(())
    }

    pub fn tool(&self, id: &ToolId) -> Option<&ToolConfig> {
        self.tools.iter().find(|t| &t.id == id)
    }

    pub fn location(&self, id: &LocationId) -> Option<&LocationConfig> {
        self.locations.iter().find(|l| &l.id == id)
    }

    /// Difficulty parameters for a level, falling back to the built-in preset.
    pub fn difficulty(&self, level: Difficulty) -> DifficultyConfig {
        match self.difficulties.iter().find(|d| d.level == level) {
            Some(d) => *d,
            None => {
                if !self.difficulties.is_empty() {
                    log::warn!("no {level:?} difficulty in config, using built-in preset");
                }
                DifficultyConfig::preset(level)
            }
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            locations: default_locations(),
            difficulties: vec![
                DifficultyConfig::preset(Difficulty::Easy),
                DifficultyConfig::preset(Difficulty::Normal),
                DifficultyConfig::preset(Difficulty::Hard),
            ],
            tools: default_tools(),
        }
    }
}

fn default_locations() -> Vec<LocationConfig> {
    vec![
        LocationConfig {
            id: "mouth".into(),
            name: "Mouth".into(),
            good_species: vec![Species::StreptococcusThermophilus, Species::Lactobacillus],
            bad_species: vec![Species::StreptococcusPyogenes, Species::StaphylococcusAureus],
            total_waves: 3,
            win_condition: WinCondition::ClearAllWaves,
        },
        LocationConfig {
            id: "stomach".into(),
            name: "Stomach".into(),
            good_species: vec![Species::Lactobacillus],
            bad_species: vec![Species::HelicobacterPylori, Species::Salmonella],
            total_waves: 4,
            win_condition: WinCondition::HealthAtLeast { pct: 30 },
        },
        LocationConfig {
            id: "gut".into(),
            name: "Gut".into(),
            good_species: vec![
                Species::Bifidobacterium,
                Species::BacteroidesFragilis,
                Species::Lactobacillus,
            ],
            bad_species: vec![
                Species::Salmonella,
                Species::EscherichiaColiO157,
                Species::ClostridiumDifficile,
            ],
            total_waves: 5,
            win_condition: WinCondition::BalanceAtLeast { pct: 50 },
        },
        LocationConfig {
            id: "skin".into(),
            name: "Skin".into(),
            good_species: vec![Species::StaphylococcusEpidermidis],
            bad_species: vec![Species::StaphylococcusAureus, Species::StreptococcusPyogenes],
            total_waves: 3,
            win_condition: WinCondition::ClearAllWaves,
        },
    ]
}

fn default_tools() -> Vec<ToolConfig> {
    vec![
        ToolConfig {
            id: "antibiotic".into(),
            name: "Antibiotic".into(),
            cost: 5,
            ammo_type: "antibiotic".into(),
            initial_ammo: 20,
            refill_amount: 10,
            ammo_cap: 30,
            cooldown_ms: 300,
            projectile_speed: 12.0,
            projectile_radius: 6.0,
            behavior: ProjectileBehavior::Straight,
            area_effect: false,
            spread_angle: DEFAULT_SPREAD_ANGLE,
            effect: ToolEffect {
                bad_delta: -40,
                good_delta: -10,
                immune_health_delta: 0,
                balance_delta: -2,
            },
        },
        ToolConfig {
            id: "probiotic".into(),
            name: "Probiotic".into(),
            cost: 3,
            ammo_type: "probiotic".into(),
            initial_ammo: 15,
            refill_amount: 8,
            ammo_cap: 25,
            cooldown_ms: 400,
            projectile_speed: 10.0,
            projectile_radius: 6.0,
            behavior: ProjectileBehavior::Straight,
            area_effect: false,
            spread_angle: DEFAULT_SPREAD_ANGLE,
            effect: ToolEffect {
                bad_delta: 0,
                good_delta: 30,
                immune_health_delta: 0,
                balance_delta: 5,
            },
        },
        ToolConfig {
            id: "phage".into(),
            name: "Bacteriophage".into(),
            cost: 8,
            ammo_type: "phage".into(),
            initial_ammo: 8,
            refill_amount: 4,
            ammo_cap: 12,
            cooldown_ms: 600,
            projectile_speed: 10.0,
            projectile_radius: 5.0,
            behavior: ProjectileBehavior::Homing,
            area_effect: false,
            spread_angle: DEFAULT_SPREAD_ANGLE,
            effect: ToolEffect {
                bad_delta: -60,
                ..ToolEffect::default()
            },
        },
        ToolConfig {
            id: "antibodies".into(),
            name: "Antibodies".into(),
            cost: 6,
            ammo_type: "antibodies".into(),
            initial_ammo: 10,
            refill_amount: 5,
            ammo_cap: 15,
            cooldown_ms: 500,
            projectile_speed: 11.0,
            projectile_radius: 5.0,
            behavior: ProjectileBehavior::Spread,
            area_effect: false,
            spread_angle: DEFAULT_SPREAD_ANGLE,
            effect: ToolEffect {
                bad_delta: -25,
                good_delta: 0,
                immune_health_delta: 1,
                balance_delta: 0,
            },
        },
        ToolConfig {
            id: "broad-spectrum".into(),
            name: "Broad-Spectrum Antibiotic".into(),
            cost: 12,
            ammo_type: "broad-spectrum".into(),
            initial_ammo: 4,
            refill_amount: 2,
            ammo_cap: 6,
            cooldown_ms: 1000,
            projectile_speed: 9.0,
            projectile_radius: 10.0,
            behavior: ProjectileBehavior::Straight,
            area_effect: true,
            spread_angle: DEFAULT_SPREAD_ANGLE,
            effect: ToolEffect {
                bad_delta: -35,
                good_delta: -20,
                immune_health_delta: 0,
                balance_delta: -5,
            },
        },
    ]
}
