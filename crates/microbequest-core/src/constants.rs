//! Simulation constants and tuning parameters.

// --- Timing ---

/// Duration of one simulation frame in milliseconds (~60 Hz).
pub const FRAME_MS: u64 = 16;

/// Interval of the coarse bacteria crawl step in milliseconds.
pub const CRAWL_INTERVAL_MS: u64 = 100;

// --- Playfield ---

/// Playfield width. Crossing it means the bacterium reached the body.
pub const PLAYFIELD_WIDTH: f64 = 800.0;

/// Playfield height.
pub const PLAYFIELD_HEIGHT: f64 = 600.0;

/// Margin beyond the playfield at which projectiles are removed.
pub const PROJECTILE_BOUNDS_MARGIN: f64 = 50.0;

// --- Player unit ---

/// Fixed vertical position of the player unit.
pub const PLAYER_Y: f64 = 550.0;

/// Starting horizontal position of the player unit.
pub const PLAYER_START_X: f64 = 400.0;

/// Leftmost reachable player position.
pub const PLAYER_MIN_X: f64 = 20.0;

/// Rightmost reachable player position.
pub const PLAYER_MAX_X: f64 = 780.0;

/// Distance covered by a single `Move` command.
pub const PLAYER_STEP: f64 = 20.0;

// --- Waves ---

/// Bacteria in wave 0 before the per-wave increment.
pub const WAVE_BASE_SIZE: u32 = 5;

/// Additional bacteria per wave number.
pub const WAVE_SIZE_PER_WAVE: u32 = 2;

/// Upper bound on the size of any wave.
pub const WAVE_MAX_SIZE: u32 = 15;

/// Probability that a spawned bacterium is of the Good kind.
pub const GOOD_SPAWN_PROBABILITY: f64 = 0.3;

/// Delay between consecutive bacteria of one wave (ms).
pub const SPAWN_STAGGER_MS: u64 = 1000;

/// Horizontal entry point of new bacteria.
pub const SPAWN_X: f64 = 0.0;

/// Lane band in which bacteria crawl.
pub const LANE_MIN_Y: f64 = 60.0;
pub const LANE_MAX_Y: f64 = 400.0;

// --- Combat ---

/// Projectile-bacterium distance below which a hit registers.
pub const HIT_RADIUS: f64 = 25.0;

/// Radius around the impact point affected by area-effect tools.
pub const AREA_EFFECT_RADIUS: f64 = 50.0;

/// Homing projectiles start steering once at or above this line.
pub const HOMING_ARM_Y: f64 = 450.0;

/// Default half-angle of a spread volley (radians).
pub const DEFAULT_SPREAD_ANGLE: f64 = 0.25;

/// Energy granted for each bad bacterium killed.
pub const KILL_ENERGY_REWARD: u32 = 2;

// --- Body meters ---

/// Upper bound of the percentage meters.
pub const PCT_MAX: i32 = 100;

/// Immune health at the start of a match.
pub const STARTING_IMMUNE_HEALTH: i32 = 100;

/// Microbiome balance at the start of a match.
pub const STARTING_BALANCE: i32 = 50;

/// Balance gained when a good bacterium reaches the body.
pub const GOOD_ARRIVAL_BALANCE: i32 = 5;

/// Balance lost when a bad bacterium reaches the body.
pub const BAD_ARRIVAL_BALANCE: i32 = 5;
