//! Species-specific profiles.
//!
//! Consolidates per-species parameters used by spawning and the crawl FSM.

use microbequest_core::enums::{BacteriaKind, SizeClass, SpeedClass, Species};

/// Fixed parameters of a species.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeciesProfile {
    pub kind: BacteriaKind,
    pub speed: SpeedClass,
    pub size: SizeClass,
    pub max_health: u32,
    /// Score magnitude when killed.
    pub points: i64,
}

/// Get the profile for a given species.
pub fn get_profile(species: Species) -> SpeciesProfile {
    use SizeClass as Sz;
    use SpeedClass as Sp;

    let (speed, size, max_health, points) = match species {
        Species::Lactobacillus => (Sp::Slow, Sz::Small, 60, 10),
        Species::Bifidobacterium => (Sp::Slow, Sz::Medium, 70, 10),
        Species::StreptococcusThermophilus => (Sp::Medium, Sz::Small, 50, 10),
        Species::BacteroidesFragilis => (Sp::Medium, Sz::Large, 90, 15),
        Species::StaphylococcusEpidermidis => (Sp::Medium, Sz::Small, 50, 10),
        Species::Salmonella => (Sp::Fast, Sz::Medium, 80, 20),
        Species::EscherichiaColiO157 => (Sp::Medium, Sz::Medium, 100, 25),
        Species::ClostridiumDifficile => (Sp::Slow, Sz::Large, 140, 30),
        Species::StaphylococcusAureus => (Sp::Medium, Sz::Medium, 90, 20),
        Species::StreptococcusPyogenes => (Sp::Fast, Sz::Small, 60, 15),
        Species::HelicobacterPylori => (Sp::Medium, Sz::Small, 70, 20),
    };

    SpeciesProfile {
        kind: species.kind(),
        speed,
        size,
        max_health,
        points,
    }
}

/// Distance covered per crawl step at 1x speed.
pub fn speed_to_pixels(speed: SpeedClass) -> f64 {
    match speed {
        SpeedClass::Slow => 2.0,
        SpeedClass::Medium => 4.0,
        SpeedClass::Fast => 6.0,
    }
}

/// Rendered radius for a size class.
pub fn size_radius(size: SizeClass) -> f64 {
    match size {
        SizeClass::Small => 12.0,
        SizeClass::Medium => 18.0,
        SizeClass::Large => 24.0,
    }
}
