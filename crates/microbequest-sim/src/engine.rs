//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `MatchSnapshot`s. Completely headless and
//! driven by a virtual clock, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use microbequest_core::commands::PlayerCommand;
use microbequest_core::config::{DifficultyConfig, GameConfig, LocationConfig, LocationId, ToolId};
use microbequest_core::constants::*;
use microbequest_core::enums::{Difficulty, Direction, MatchPhase};
use microbequest_core::events::GameEvent;
use microbequest_core::state::MatchSnapshot;
use microbequest_core::types::{Position, SimTime};

use crate::ledger::ResourceLedger;
use crate::match_state::MatchState;
use crate::systems;
use crate::systems::fire_control::FireControl;
use crate::systems::orchestrator::WaveOutcome;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Virtual milliseconds per tick.
    pub frame_ms: u64,
    /// Virtual milliseconds between bacteria crawl steps.
    pub crawl_interval_ms: u64,
    /// Distance past the playfield edge at which projectiles are discarded.
    pub bounds_margin: f64,
}

impl SimConfig {
    /// Copy with every duration at least 1 ms, so the virtual clock always moves.
    pub fn normalized(self) -> Self {
        Self {
            frame_ms: self.frame_ms.max(1),
            crawl_interval_ms: self.crawl_interval_ms.max(1),
            ..self
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            frame_ms: FRAME_MS,
            crawl_interval_ms: CRAWL_INTERVAL_MS,
            bounds_margin: PROJECTILE_BOUNDS_MARGIN,
        }
    }
}

/// The simulation engine. Owns the ECS world and all match state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: MatchPhase,
    sim: SimConfig,
    config: GameConfig,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<GameEvent>,

    location: Option<LocationConfig>,
    difficulty: DifficultyConfig,
    ledger: ResourceLedger,
    match_state: MatchState,
    fire_control: FireControl,
    player: Option<Entity>,
    crawl_accumulator_ms: u64,
    next_bacterium_id: u32,
    next_projectile_id: u32,
}

impl SimulationEngine {
    /// Create a new simulation engine with the built-in game catalog.
    pub fn new(sim: SimConfig) -> Self {
        Self::with_config(sim, GameConfig::default())
    }

    /// Create a new simulation engine with an externally authored catalog.
    /// The catalog is expected to have passed `GameConfig::validate`.
    /// Zero frame or crawl lengths are raised to 1 ms.
    pub fn with_config(sim: SimConfig, config: GameConfig) -> Self {
        let sim = sim.normalized();
        let difficulty = config.difficulty(Difficulty::default());
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: MatchPhase::default(),
            rng: ChaCha8Rng::seed_from_u64(sim.seed),
            sim,
            config,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            location: None,
            difficulty,
            ledger: ResourceLedger::default(),
            match_state: MatchState::default(),
            fire_control: FireControl::new(),
            player: None,
            crawl_accumulator_ms: 0,
            next_bacterium_id: 0,
            next_projectile_id: 0,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one frame and return the resulting snapshot.
    /// Outside `Playing` only commands are processed; the clock stands still.
    pub fn tick(&mut self) -> MatchSnapshot {
        self.process_commands();

        if self.phase == MatchPhase::Playing {
            self.run_systems();
            self.time.advance(self.sim.frame_ms);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.location.as_ref().map(|l| &l.id),
            self.difficulty.level,
            &self.config.tools,
            &self.ledger,
            &self.match_state,
            &self.fire_control,
            events,
        )
    }

    /// Get the current match phase.
    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn sim_config(&self) -> &SimConfig {
        &self.sim
    }

    pub fn ledger(&self) -> &ResourceLedger {
        &self.ledger
    }

    pub fn match_state(&self) -> &MatchState {
        &self.match_state
    }

    /// The location of the current (or last) match.
    pub fn location(&self) -> Option<&LocationConfig> {
        self.location.as_ref()
    }

    pub fn difficulty(&self) -> &DifficultyConfig {
        &self.difficulty
    }

    pub fn selected_tool(&self) -> Option<&ToolId> {
        self.fire_control.selected()
    }

    /// Current position of the player's unit, if a match is set up.
    pub fn player_position(&self) -> Option<Position> {
        let entity = self.player?;
        self.world.get::<&Position>(entity).ok().map(|pos| *pos)
    }

    /// Spawn a bacterium directly, bypassing the wave planner (for testing).
    #[cfg(test)]
    pub fn spawn_test_bacterium(
        &mut self,
        species: microbequest_core::enums::Species,
        position: Position,
        spawn_delay_ms: u64,
    ) -> u32 {
        let id = self.next_bacterium_id;
        world_setup::spawn_bacterium(&mut self.world, id, species, position, spawn_delay_ms);
        self.next_bacterium_id += 1;
        id
    }

    /// Spawn a projectile of `tool` directly, bypassing ledger and cooldown (for testing).
    #[cfg(test)]
    pub fn spawn_test_projectile(&mut self, tool: &str, position: Position) -> u32 {
        let tool = self
            .config
            .tool(&ToolId::from(tool))
            .cloned()
            .expect("unknown test tool");
        let id = self.next_projectile_id;
        for velocity in systems::fire_control::launch_velocities(&tool) {
            world_setup::spawn_projectile(
                &mut self.world,
                self.next_projectile_id,
                &tool,
                position,
                velocity,
            );
            self.next_projectile_id += 1;
        }
        id
    }

    /// Remove every bacterium from the world (for testing).
    #[cfg(test)]
    pub fn clear_bacteria(&mut self) {
        let entities: Vec<Entity> = self
            .world
            .query::<&microbequest_core::components::Bacterium>()
            .iter()
            .map(|(e, _)| e)
            .collect();
        for entity in entities {
            let _ = self.world.despawn(entity);
        }
    }

    #[cfg(test)]
    pub fn ledger_mut(&mut self) -> &mut ResourceLedger {
        &mut self.ledger
    }

    #[cfg(test)]
    pub fn match_state_mut(&mut self) -> &mut MatchState {
        &mut self.match_state
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command. Invalid commands are silent no-ops.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::SelectLocation { location } => {
                if self.phase != MatchPhase::LocationSelect {
                    log::debug!("ignoring location select during {:?}", self.phase);
                    return;
                }
                self.start_match(&location);
            }
            PlayerCommand::SelectDifficulty { level } => {
                if matches!(self.phase, MatchPhase::LocationSelect) || self.phase.is_terminal() {
                    self.difficulty = self.config.difficulty(level);
                } else {
                    log::debug!("ignoring difficulty change during {:?}", self.phase);
                }
            }
            PlayerCommand::SelectTool { tool } => {
                if !matches!(self.phase, MatchPhase::Playing | MatchPhase::WaveClear) {
                    return;
                }
                if let Err(rejected) = self.fire_control.select(&tool, &self.config, &self.ledger) {
                    log::debug!("tool selection rejected: {rejected}");
                }
            }
            PlayerCommand::Fire { x, y } => {
                if self.phase == MatchPhase::Playing {
                    self.pull_trigger(Position::new(x, y));
                }
            }
            PlayerCommand::SetTrigger { held } => {
                if self.location.is_some() && !self.phase.is_terminal() {
                    self.fire_control.set_trigger(held);
                }
            }
            PlayerCommand::MoveTo { x } => {
                if self.phase == MatchPhase::Playing {
                    self.move_player(|_| x);
                }
            }
            PlayerCommand::Move { direction } => {
                if self.phase == MatchPhase::Playing {
                    let step = match direction {
                        Direction::Left => -PLAYER_STEP,
                        Direction::Right => PLAYER_STEP,
                    };
                    self.move_player(|current| current + step);
                }
            }
            PlayerCommand::Pause => {
                if self.phase == MatchPhase::Playing {
                    self.phase = MatchPhase::Paused;
                    log::info!("paused at tick {}", self.time.tick);
                }
            }
            PlayerCommand::Resume => {
                if self.phase == MatchPhase::Paused {
                    self.phase = MatchPhase::Playing;
                    log::info!("resumed at tick {}", self.time.tick);
                }
            }
            PlayerCommand::AdvanceWave => {
                if self.phase == MatchPhase::WaveClear {
                    self.start_next_wave();
                    self.phase = MatchPhase::Playing;
                } else {
                    log::debug!("wave advance rejected during {:?}", self.phase);
                }
            }
            PlayerCommand::Restart => match self.location.as_ref().map(|l| l.id.clone()) {
                Some(location) => {
                    self.phase = MatchPhase::LocationSelect;
                    self.start_match(&location);
                }
                None => log::debug!("nothing to restart"),
            },
            PlayerCommand::ReturnToLocationSelect => {
                self.world.clear();
                self.player = None;
                self.location = None;
                self.ledger = ResourceLedger::default();
                self.match_state = MatchState::default();
                self.fire_control.reset();
                self.time = SimTime::default();
                self.crawl_accumulator_ms = 0;
                self.phase = MatchPhase::LocationSelect;
                log::info!("returned to location select");
            }
        }
    }

    /// Build a fresh match at `location` and start its first wave.
    fn start_match(&mut self, location: &LocationId) {
        let Some(location) = self.config.location(location).cloned() else {
            log::debug!("unknown location '{location}'");
            return;
        };

        self.world.clear();
        self.despawn_buffer.clear();
        self.time = SimTime::default();
        self.crawl_accumulator_ms = 0;
        self.next_bacterium_id = 0;
        self.next_projectile_id = 0;
        self.ledger.reset(&self.config.tools, self.difficulty.starting_energy);
        self.match_state = MatchState::new(location.total_waves);
        self.fire_control.reset();
        if let Some(first) = self.config.tools.first() {
            let _ = self.fire_control.select(&first.id, &self.config, &self.ledger);
        }
        self.player = Some(world_setup::spawn_player(&mut self.world));

        log::info!(
            "match started at {} ({:?}, {} waves)",
            location.name,
            self.difficulty.level,
            location.total_waves
        );
        self.location = Some(location);
        self.start_next_wave();
        self.phase = MatchPhase::Playing;
    }

    fn start_next_wave(&mut self) {
        let Some(location) = self.location.as_ref() else {
            return;
        };
        self.match_state.current_wave += 1;
        systems::spawn_controller::start_wave(
            &mut self.world,
            &mut self.rng,
            &mut self.ledger,
            &self.config.tools,
            location,
            &self.difficulty,
            self.match_state.current_wave,
            &mut self.next_bacterium_id,
            &mut self.events,
        );
    }

    fn pull_trigger(&mut self, origin: Position) {
        let result = self.fire_control.fire(
            &mut self.world,
            &self.config,
            &mut self.ledger,
            origin,
            self.time.elapsed_ms,
            &mut self.next_projectile_id,
            &mut self.events,
        );
        if let Err(rejected) = result {
            log::debug!("fire rejected: {rejected}");
        }
    }

    fn move_player(&mut self, target_x: impl FnOnce(f64) -> f64) {
        let Some(entity) = self.player else {
            return;
        };
        if let Ok(mut pos) = self.world.get::<&mut Position>(entity) {
            pos.x = target_x(pos.x).clamp(PLAYER_MIN_X, PLAYER_MAX_X);
        }
    }

    /// Switch to Defeat when immune health is depleted. Returns true if it did.
    fn check_defeat(&mut self) -> bool {
        if !self.match_state.is_defeated() {
            return false;
        }
        self.end_match(MatchPhase::Defeat, GameEvent::Defeat);
        true
    }

    fn end_match(&mut self, phase: MatchPhase, event: GameEvent) {
        self.phase = phase;
        self.events.push(event);
        log::info!(
            "match over: {:?} on wave {} (score {})",
            phase,
            self.match_state.current_wave,
            self.match_state.score
        );
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Held trigger fires from the player unit
        if self.fire_control.trigger_held() {
            if let Some(origin) = self.player_position() {
                let result = self.fire_control.fire(
                    &mut self.world,
                    &self.config,
                    &mut self.ledger,
                    origin,
                    self.time.elapsed_ms,
                    &mut self.next_projectile_id,
                    &mut self.events,
                );
                if let Err(rejected) = result {
                    log::trace!("held trigger: {rejected}");
                }
            }
        }

        // 2. Crawl steps due this frame
        self.crawl_accumulator_ms += self.sim.frame_ms;
        let interval = self.sim.crawl_interval_ms;
        while self.crawl_accumulator_ms >= interval {
            self.crawl_accumulator_ms -= interval;
            systems::crawl::run(
                &mut self.world,
                interval,
                self.difficulty.speed_multiplier,
                self.difficulty.body_damage,
                &mut self.match_state,
                &mut self.events,
            );
        }
        if self.check_defeat() {
            return;
        }

        // 3. Projectile motion (homing steers first)
        systems::projectile_motion::run(&mut self.world, self.sim.bounds_margin);

        // 4. Collision resolution
        systems::collision::run(
            &mut self.world,
            &mut self.match_state,
            &mut self.ledger,
            &mut self.events,
        );
        if self.check_defeat() {
            return;
        }

        // 5. Cleanup (dead, spent, out of bounds)
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);

        // 6. Wave orchestration
        let Some(win_condition) = self.location.as_ref().map(|l| l.win_condition) else {
            return;
        };
        let wave = self.match_state.current_wave;
        match systems::orchestrator::evaluate(&self.world, &self.match_state, win_condition) {
            WaveOutcome::InProgress => {}
            WaveOutcome::Cleared => {
                self.phase = MatchPhase::WaveClear;
                self.events.push(GameEvent::WaveCleared { wave });
                log::info!("wave {wave} cleared");
            }
            WaveOutcome::Victory => {
                self.events.push(GameEvent::WaveCleared { wave });
                self.end_match(MatchPhase::Victory, GameEvent::Victory);
            }
            WaveOutcome::Defeat => {
                self.events.push(GameEvent::WaveCleared { wave });
                self.end_match(MatchPhase::Defeat, GameEvent::Defeat);
            }
        }
    }
}
