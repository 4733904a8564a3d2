//! Tests for the simulation engine, movement, collisions, resources and wave flow.

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use microbequest_core::commands::PlayerCommand;
use microbequest_core::components::{Bacterium, Projectile};
use microbequest_core::config::{AmmoType, GameConfig, LocationId, ToolEffect, ToolId};
use microbequest_core::enums::*;
use microbequest_core::events::GameEvent;
use microbequest_core::state::MatchSnapshot;
use microbequest_core::types::{Position, Velocity};

use crate::engine::{SimConfig, SimulationEngine};
use crate::ledger::ResourceLedger;
use crate::match_state::MatchState;
use crate::systems::{collision, crawl, spawn_controller};
use crate::world_setup;

/// Far-future entry delay used to keep a wave open without anything on the field.
const PARKED_DELAY_MS: u64 = 10_000_000;

fn engine_at(location: &str) -> SimulationEngine {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::SelectLocation {
        location: location.into(),
    });
    engine.tick();
    engine
}

/// A running match with the planned wave removed and one pending bacterium
/// holding the wave open.
fn arena(location: &str) -> SimulationEngine {
    let mut engine = engine_at(location);
    engine.clear_bacteria();
    engine.spawn_test_bacterium(Species::Salmonella, Position::new(0.0, 100.0), PARKED_DELAY_MS);
    engine
}

fn view(snapshot: &MatchSnapshot, id: u32) -> Option<&microbequest_core::state::BacteriumView> {
    snapshot.bacteria.iter().find(|b| b.id == id)
}

fn clear_wave(engine: &mut SimulationEngine) -> MatchSnapshot {
    engine.clear_bacteria();
    engine.tick()
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });

    let start = PlayerCommand::SelectLocation {
        location: "gut".into(),
    };
    engine_a.queue_command(start.clone());
    engine_b.queue_command(start);

    for i in 0..600u32 {
        if i % 40 == 0 {
            let fire = PlayerCommand::Fire {
                x: 100.0 + f64::from(i % 600),
                y: 450.0,
            };
            engine_a.queue_command(fire.clone());
            engine_b.queue_command(fire);
        }
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    });

    let start = PlayerCommand::SelectLocation {
        location: "gut".into(),
    };
    engine_a.queue_command(start.clone());
    engine_b.queue_command(start);

    let mut diverged = false;
    for _ in 0..200 {
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent output");
}

#[test]
fn test_sim_config_fills_missing_fields() {
    let sim: SimConfig = serde_json::from_str(r#"{"seed": 9}"#).unwrap();
    assert_eq!(
        sim,
        SimConfig {
            seed: 9,
            ..Default::default()
        }
    );
    assert_eq!(sim.frame_ms, 16);
    assert_eq!(sim.crawl_interval_ms, 100);
}

#[test]
fn test_zero_frame_length_still_advances() {
    let sim: SimConfig =
        serde_json::from_str(r#"{"frame_ms": 0, "crawl_interval_ms": 0}"#).unwrap();
    let mut engine = SimulationEngine::new(sim);
    assert_eq!(engine.sim_config().frame_ms, 1);
    assert_eq!(engine.sim_config().crawl_interval_ms, 1);

    engine.queue_command(PlayerCommand::SelectLocation {
        location: "mouth".into(),
    });
    let first = engine.tick();
    let mut snapshot = first.clone();
    // One stagger interval at 1 ms per frame lets the second bacterium in.
    for _ in 0..1_500 {
        snapshot = engine.tick();
    }
    assert!(snapshot.time.elapsed_ms > first.time.elapsed_ms);
    assert!(snapshot.hud.pending < first.hud.pending);
}

// ---- Spawning ----

#[test]
fn test_good_fraction_over_many_waves() {
    let config = GameConfig::default();
    let location = config.location(&LocationId::from("mouth")).unwrap();
    let difficulty = config.difficulty(Difficulty::Normal);
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    let mut total = 0usize;
    let mut good = 0usize;
    for _ in 0..1000 {
        let plan = spawn_controller::plan_wave(1, location, &difficulty, &mut rng);
        assert_eq!(plan.len(), 7);
        total += plan.len();
        good += plan
            .iter()
            .filter(|spec| spec.species.kind() == BacteriaKind::Good)
            .count();
    }

    let fraction = good as f64 / total as f64;
    assert!(
        (0.25..=0.35).contains(&fraction),
        "good fraction {fraction} outside 30% +/- 5%"
    );
}

#[test]
fn test_wave_plan_staggers_and_stays_in_lanes() {
    let config = GameConfig::default();
    let location = config.location(&LocationId::from("gut")).unwrap();
    let difficulty = config.difficulty(Difficulty::Hard);
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    let plan = spawn_controller::plan_wave(3, location, &difficulty, &mut rng);
    assert_eq!(plan.len(), 11);
    for (index, spec) in plan.iter().enumerate() {
        assert_eq!(spec.spawn_delay_ms, index as u64 * 1000);
        assert!((60.0..=400.0).contains(&spec.lane_y));
        let allowed = location.species_of(spec.species.kind());
        assert!(allowed.contains(&spec.species));
    }
}

#[test]
fn test_wave_size_caps() {
    assert_eq!(spawn_controller::wave_size(0), 5);
    assert_eq!(spawn_controller::wave_size(1), 7);
    assert_eq!(spawn_controller::wave_size(5), 15);
    assert_eq!(spawn_controller::wave_size(40), 15);
}

#[test]
fn test_easy_variety_narrows_species() {
    let config = GameConfig::default();
    let location = config.location(&LocationId::from("gut")).unwrap();
    let easy = config.difficulty(Difficulty::Easy);
    let pool = spawn_controller::species_pool(location, BacteriaKind::Bad, &easy);
    assert_eq!(pool, &location.bad_species[..2]);

    let mut sparse = location.clone();
    sparse.good_species.truncate(1);
    let pool = spawn_controller::species_pool(&sparse, BacteriaKind::Good, &easy);
    assert_eq!(pool.len(), 1);
}

#[test]
fn test_match_start_refills_and_announces_wave() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::SelectLocation {
        location: "mouth".into(),
    });
    let snapshot = engine.tick();

    assert_eq!(snapshot.phase, MatchPhase::Playing);
    assert_eq!(snapshot.hud.current_wave, 1);
    assert_eq!(snapshot.hud.total_waves, 3);
    assert!(snapshot
        .events
        .contains(&GameEvent::WaveStarted { wave: 1, size: 7 }));
    assert!(snapshot.events.contains(&GameEvent::AmmoRefilled {
        ammo_type: AmmoType::from("antibiotic"),
        amount: 10,
    }));
    // Only the first bacterium has no entry delay.
    assert_eq!(snapshot.bacteria.len(), 1);
    assert_eq!(snapshot.hud.pending, 6);
    assert_eq!(snapshot.resources.selected_tool, Some(ToolId::from("antibiotic")));
}

// ---- Movement ----

#[test]
fn test_straight_projectile_moves_up_one_frame() {
    let mut engine = arena("mouth");
    let id = engine.spawn_test_projectile("antibiotic", Position::new(400.0, 350.0));
    let snapshot = engine.tick();

    let projectile = snapshot.projectiles.iter().find(|p| p.id == id).unwrap();
    assert_eq!(projectile.position, Position::new(400.0, 338.0));
}

#[test]
fn test_straight_projectile_hits_bacterium_above() {
    let mut engine = arena("mouth");
    let target = engine.spawn_test_bacterium(Species::Salmonella, Position::new(400.0, 340.0), 0);
    engine.spawn_test_projectile("antibiotic", Position::new(400.0, 350.0));
    let snapshot = engine.tick();

    let bacterium = view(&snapshot, target).unwrap();
    assert_eq!(bacterium.health, 80 - 40);
    assert!(snapshot.projectiles.is_empty(), "resolved projectile removed");
    assert!(snapshot.events.contains(&GameEvent::BacteriumHit {
        id: target,
        kind: BacteriaKind::Bad,
        health: 40,
    }));
    assert_eq!(snapshot.hud.balance_pct, 48);
}

#[test]
fn test_crawl_steps_follow_interval() {
    let mut engine = arena("mouth");
    let id = engine.spawn_test_bacterium(
        Species::ClostridiumDifficile,
        Position::new(100.0, 200.0),
        0,
    );

    // The match-start tick already banked one frame.
    let mut x_values = Vec::new();
    for _ in 0..12 {
        let snapshot = engine.tick();
        x_values.push(view(&snapshot, id).unwrap().position.x);
    }
    // Slow = 2 px per 100 ms step; 13 frames of 16 ms = 208 ms -> 2 steps.
    assert_eq!(x_values.first(), Some(&100.0));
    assert_eq!(x_values.last(), Some(&104.0));
    assert!(x_values.windows(2).all(|w| w[1] >= w[0]));
}

#[test]
fn test_spawn_delay_counts_down_before_moving() {
    let mut world = World::new();
    world_setup::spawn_bacterium(
        &mut world,
        0,
        Species::Salmonella,
        Position::new(0.0, 100.0),
        200,
    );
    let mut state = MatchState::new(1);
    let mut events = Vec::new();

    crawl::run(&mut world, 100, 1.0, 10, &mut state, &mut events);
    crawl::run(&mut world, 100, 1.0, 10, &mut state, &mut events);
    {
        let mut q = world.query::<(&Bacterium, &Position)>();
        let (_, (b, pos)) = q.iter().next().unwrap();
        assert_eq!(b.spawn_delay_ms, 0);
        assert_eq!(pos.x, 0.0);
        assert_eq!(b.phase, BacteriumPhase::Crawling);
    }

    crawl::run(&mut world, 100, 1.0, 10, &mut state, &mut events);
    let mut q = world.query::<&Position>();
    let (_, pos) = q.iter().next().unwrap();
    assert_eq!(pos.x, 6.0);
}

#[test]
fn test_crossing_right_edge_reaches_body() {
    let mut world = World::new();
    world_setup::spawn_bacterium(
        &mut world,
        4,
        Species::Salmonella,
        Position::new(798.0, 200.0),
        0,
    );
    let mut state = MatchState::new(1);
    let mut events = Vec::new();

    crawl::run(&mut world, 100, 1.0, 10, &mut state, &mut events);

    let mut q = world.query::<&Bacterium>();
    let (_, b) = q.iter().next().unwrap();
    assert!(!b.alive);
    assert!(b.reached_end);
    assert_eq!(b.phase, BacteriumPhase::ReachedBody);
    assert_eq!(state.immune_health_pct(), 90);
    assert_eq!(state.score, 0);
    assert_eq!(
        events,
        vec![GameEvent::ReachedBody {
            id: 4,
            kind: BacteriaKind::Bad
        }]
    );
}

#[test]
fn test_bad_arrival_lowers_immune_health_not_score() {
    let mut engine = arena("mouth");
    let id = engine.spawn_test_bacterium(Species::Salmonella, Position::new(798.0, 200.0), 0);

    let mut arrived = None;
    for _ in 0..10 {
        let snapshot = engine.tick();
        if snapshot.events.contains(&GameEvent::ReachedBody {
            id,
            kind: BacteriaKind::Bad,
        }) {
            arrived = Some(snapshot);
            break;
        }
    }

    let snapshot = arrived.expect("bacterium should reach the body");
    assert_eq!(snapshot.hud.immune_health_pct, 90);
    assert_eq!(snapshot.hud.balance_pct, 45);
    assert_eq!(snapshot.hud.score, 0);
    assert_eq!(snapshot.hud.reached_body, 1);
    assert!(view(&snapshot, id).is_none());
}

#[test]
fn test_good_arrival_raises_balance() {
    let mut engine = arena("mouth");
    engine.spawn_test_bacterium(Species::StreptococcusThermophilus, Position::new(799.0, 200.0), 0);

    let mut last = None;
    for _ in 0..10 {
        last = Some(engine.tick());
    }
    let snapshot = last.unwrap();
    assert_eq!(snapshot.hud.balance_pct, 55);
    assert_eq!(snapshot.hud.immune_health_pct, 100);
}

#[test]
fn test_homing_without_bad_target_flies_straight_out() {
    let mut engine = arena("mouth");
    let id = engine.spawn_test_projectile("phage", Position::new(400.0, 500.0));

    let mut left_field = false;
    for _ in 0..100 {
        let snapshot = engine.tick();
        match snapshot.projectiles.iter().find(|p| p.id == id) {
            Some(p) => assert_eq!(p.position.x, 400.0),
            None => {
                left_field = true;
                break;
            }
        }
    }
    assert!(left_field, "projectile should be removed once out of bounds");
    assert_eq!(engine.world().query::<&Projectile>().iter().count(), 0);
}

#[test]
fn test_homing_steers_toward_nearest_bad() {
    let mut engine = arena("mouth");
    engine.spawn_test_bacterium(Species::Salmonella, Position::new(200.0, 300.0), 0);
    engine.spawn_test_bacterium(Species::Salmonella, Position::new(700.0, 100.0), 0);
    // Good bacteria are never homing targets, even when closer.
    engine.spawn_test_bacterium(Species::Lactobacillus, Position::new(450.0, 300.0), 0);
    let id = engine.spawn_test_projectile("phage", Position::new(400.0, 440.0));

    let snapshot = engine.tick();
    let p = snapshot.projectiles.iter().find(|p| p.id == id).unwrap();
    assert!(p.position.x < 400.0);
    assert!(p.position.y < 440.0);
}

#[test]
fn test_homing_not_armed_below_threshold() {
    let mut engine = arena("mouth");
    engine.spawn_test_bacterium(Species::Salmonella, Position::new(100.0, 300.0), 0);
    let id = engine.spawn_test_projectile("phage", Position::new(400.0, 540.0));

    let snapshot = engine.tick();
    let p = snapshot.projectiles.iter().find(|p| p.id == id).unwrap();
    assert_eq!(p.position, Position::new(400.0, 530.0));
}

// ---- Collisions ----

#[test]
fn test_area_effect_hits_everything_in_radius() {
    let mut engine = arena("gut");
    let struck = engine.spawn_test_bacterium(Species::Salmonella, Position::new(300.0, 200.0), 0);
    let near = engine.spawn_test_bacterium(
        Species::EscherichiaColiO157,
        Position::new(340.0, 200.0),
        0,
    );
    let far = engine.spawn_test_bacterium(Species::Salmonella, Position::new(400.0, 200.0), 0);
    let good = engine.spawn_test_bacterium(Species::Lactobacillus, Position::new(300.0, 240.0), 0);
    engine.spawn_test_projectile("broad-spectrum", Position::new(300.0, 212.0));

    let snapshot = engine.tick();
    assert_eq!(view(&snapshot, struck).unwrap().health, 45);
    assert_eq!(view(&snapshot, near).unwrap().health, 65);
    assert_eq!(view(&snapshot, far).unwrap().health, 80);
    assert_eq!(view(&snapshot, good).unwrap().health, 40);
    // Meter deltas apply once per projectile, not per bacterium.
    assert_eq!(snapshot.hud.balance_pct, 45);
}

#[test]
fn test_projectile_resolves_only_once() {
    let mut engine = arena("mouth");
    let first = engine.spawn_test_bacterium(Species::Salmonella, Position::new(400.0, 330.0), 0);
    let second = engine.spawn_test_bacterium(Species::Salmonella, Position::new(405.0, 335.0), 0);
    engine.spawn_test_projectile("antibiotic", Position::new(400.0, 350.0));

    let snapshot = engine.tick();
    assert_eq!(view(&snapshot, first).unwrap().health, 40);
    assert_eq!(view(&snapshot, second).unwrap().health, 80);
}

#[test]
fn test_pending_bacteria_are_not_hit() {
    let mut engine = arena("mouth");
    let pending = engine.spawn_test_bacterium(
        Species::Salmonella,
        Position::new(400.0, 340.0),
        5_000,
    );
    let id = engine.spawn_test_projectile("antibiotic", Position::new(400.0, 350.0));

    let snapshot = engine.tick();
    assert!(snapshot.projectiles.iter().any(|p| p.id == id));
    assert!(view(&snapshot, pending).is_none());
    assert_eq!(snapshot.hud.pending, 2);
}

#[test]
fn test_bad_kill_scores_and_rewards_energy() {
    let mut engine = arena("mouth");
    let target = engine.spawn_test_bacterium(
        Species::StreptococcusPyogenes,
        Position::new(400.0, 340.0),
        0,
    );
    engine.spawn_test_projectile("phage", Position::new(400.0, 350.0));
    let energy_before = engine.ledger().energy();

    let snapshot = engine.tick();
    assert!(snapshot.events.contains(&GameEvent::BacteriumKilled {
        id: target,
        kind: BacteriaKind::Bad,
        species: Species::StreptococcusPyogenes,
        points: 15,
    }));
    assert_eq!(snapshot.hud.score, 15);
    assert_eq!(snapshot.hud.bad_killed, 1);
    assert_eq!(snapshot.resources.energy, energy_before + 2);
    assert!(view(&snapshot, target).is_none());
}

#[test]
fn test_good_kill_is_penalised() {
    let config = GameConfig::default();
    let mut harsh = config.tool(&ToolId::from("antibiotic")).cloned().unwrap();
    harsh.effect = ToolEffect {
        good_delta: -100,
        ..ToolEffect::default()
    };

    let mut world = World::new();
    world_setup::spawn_bacterium(
        &mut world,
        0,
        Species::Lactobacillus,
        Position::new(100.0, 100.0),
        0,
    );
    world_setup::spawn_projectile(
        &mut world,
        0,
        &harsh,
        Position::new(100.0, 110.0),
        Velocity::new(0.0, 0.0),
    );

    let mut state = MatchState::new(1);
    let mut ledger = ResourceLedger::new(10);
    let mut events = Vec::new();
    collision::run(&mut world, &mut state, &mut ledger, &mut events);

    assert_eq!(state.score, -10);
    assert_eq!(state.good_killed, 1);
    assert_eq!(ledger.energy(), 10);
    assert!(matches!(
        events.as_slice(),
        [GameEvent::BacteriumKilled {
            kind: BacteriaKind::Good,
            points: -10,
            ..
        }]
    ));
}

#[test]
fn test_health_delta_clamps() {
    assert_eq!(collision::apply_health_delta(50, 60, 30), 60);
    assert_eq!(collision::apply_health_delta(10, 60, -40), 0);
    assert_eq!(collision::apply_health_delta(10, 60, 0), 10);
}

#[test]
fn test_probiotic_heals_good_up_to_max() {
    let mut engine = arena("mouth");
    let good = engine.spawn_test_bacterium(Species::Lactobacillus, Position::new(400.0, 340.0), 0);
    engine.spawn_test_projectile("antibiotic", Position::new(400.0, 350.0));
    engine.tick();
    engine.spawn_test_projectile("probiotic", Position::new(400.0, 350.0));

    let snapshot = engine.tick();
    let healed = view(&snapshot, good).unwrap();
    assert_eq!(healed.health, healed.max_health);
}

// ---- Firing and resources ----

#[test]
fn test_fire_command_spends_and_launches() {
    let mut engine = engine_at("mouth");
    let energy = engine.ledger().energy();
    let ammo = engine.ledger().ammo(&AmmoType::from("antibiotic"));

    engine.queue_command(PlayerCommand::Fire { x: 400.0, y: 350.0 });
    let snapshot = engine.tick();

    assert_eq!(snapshot.resources.energy, energy - 5);
    assert_eq!(engine.ledger().ammo(&AmmoType::from("antibiotic")), ammo - 1);
    assert_eq!(snapshot.projectiles.len(), 1);
    assert_eq!(snapshot.projectiles[0].position, Position::new(400.0, 338.0));
    assert!(snapshot.events.contains(&GameEvent::ShotFired {
        tool: ToolId::from("antibiotic"),
        projectiles: 1,
    }));
}

#[test]
fn test_spread_volley_charges_once() {
    let mut engine = engine_at("mouth");
    let energy = engine.ledger().energy();
    let ammo_type = AmmoType::from("antibodies");
    let ammo = engine.ledger().ammo(&ammo_type);

    engine.queue_commands([
        PlayerCommand::SelectTool {
            tool: ToolId::from("antibodies"),
        },
        PlayerCommand::Fire { x: 400.0, y: 550.0 },
    ]);
    let snapshot = engine.tick();

    assert_eq!(snapshot.projectiles.len(), 3);
    assert_eq!(snapshot.resources.energy, energy - 6);
    assert_eq!(engine.ledger().ammo(&ammo_type), ammo - 1);
    let xs: Vec<f64> = snapshot.projectiles.iter().map(|p| p.position.x).collect();
    assert!(xs[0] < 400.0 && xs[1] == 400.0 && xs[2] > 400.0);
}

#[test]
fn test_no_energy_fires_nothing() {
    let mut config = GameConfig::default();
    for difficulty in &mut config.difficulties {
        difficulty.starting_energy = 0;
    }
    let mut engine = SimulationEngine::with_config(SimConfig::default(), config);
    engine.queue_command(PlayerCommand::SelectLocation {
        location: "mouth".into(),
    });
    engine.tick();
    let before = engine.ledger().clone();

    engine.queue_command(PlayerCommand::Fire { x: 400.0, y: 500.0 });
    let snapshot = engine.tick();

    assert_eq!(engine.ledger(), &before);
    assert!(snapshot.projectiles.is_empty());
    assert!(!snapshot
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::ShotFired { .. })));
}

#[test]
fn test_unaffordable_tool_keeps_previous_selection() {
    let mut config = GameConfig::default();
    for difficulty in &mut config.difficulties {
        difficulty.starting_energy = 7;
    }
    let mut engine = SimulationEngine::with_config(SimConfig::default(), config);
    engine.queue_command(PlayerCommand::SelectLocation {
        location: "mouth".into(),
    });
    engine.tick();
    assert_eq!(engine.selected_tool(), Some(&ToolId::from("antibiotic")));

    engine.queue_command(PlayerCommand::SelectTool {
        tool: ToolId::from("phage"),
    });
    let snapshot = engine.tick();
    assert_eq!(snapshot.resources.selected_tool, Some(ToolId::from("antibiotic")));
    let phage = snapshot
        .resources
        .tools
        .iter()
        .find(|t| t.tool == ToolId::from("phage"))
        .unwrap();
    assert!(!phage.affordable);
}

#[test]
fn test_held_trigger_respects_cooldown() {
    let mut engine = engine_at("mouth");
    engine.queue_command(PlayerCommand::SetTrigger { held: true });

    let mut shot_times = Vec::new();
    for _ in 0..80 {
        let before = engine.time().elapsed_ms;
        let snapshot = engine.tick();
        assert!(snapshot.player.trigger_held);
        if snapshot
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::ShotFired { .. }))
        {
            shot_times.push(before);
        }
    }

    assert!(shot_times.len() >= 3, "held trigger should keep firing");
    assert!(shot_times.windows(2).all(|w| w[1] - w[0] >= 300));
}

#[test]
fn test_cooldown_reported_in_snapshot() {
    let mut engine = engine_at("mouth");
    engine.queue_command(PlayerCommand::Fire { x: 400.0, y: 500.0 });
    let snapshot = engine.tick();
    let status = snapshot
        .resources
        .tools
        .iter()
        .find(|t| t.tool == ToolId::from("antibiotic"))
        .unwrap();
    assert_eq!(status.cooldown_remaining_ms, 300 - 16);
}

#[test]
fn test_player_moves_are_clamped() {
    let mut engine = engine_at("mouth");

    engine.queue_command(PlayerCommand::MoveTo { x: 5_000.0 });
    assert_eq!(engine.tick().player.position.x, 780.0);

    engine.queue_command(PlayerCommand::Move {
        direction: Direction::Left,
    });
    assert_eq!(engine.tick().player.position.x, 760.0);

    engine.queue_command(PlayerCommand::MoveTo { x: -5.0 });
    assert_eq!(engine.tick().player.position.x, 20.0);

    engine.queue_command(PlayerCommand::Move {
        direction: Direction::Left,
    });
    let snapshot = engine.tick();
    assert_eq!(snapshot.player.position.x, 20.0);
    assert_eq!(snapshot.player.position.y, 550.0);
}

// ---- Pause ----

#[test]
fn test_pause_is_idempotent() {
    let mut once = engine_at("gut");
    let mut twice = engine_at("gut");

    once.queue_command(PlayerCommand::Pause);
    twice.queue_commands([PlayerCommand::Pause, PlayerCommand::Pause]);
    for _ in 0..5 {
        let a = serde_json::to_string(&once.tick()).unwrap();
        let b = serde_json::to_string(&twice.tick()).unwrap();
        assert_eq!(a, b);
    }

    once.queue_command(PlayerCommand::Resume);
    twice.queue_command(PlayerCommand::Resume);
    for _ in 0..50 {
        let a = serde_json::to_string(&once.tick()).unwrap();
        let b = serde_json::to_string(&twice.tick()).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn test_pause_freezes_everything() {
    let mut engine = engine_at("gut");
    engine.queue_command(PlayerCommand::Fire { x: 400.0, y: 500.0 });
    engine.tick();
    engine.queue_command(PlayerCommand::Pause);
    let paused = engine.tick();
    assert_eq!(paused.phase, MatchPhase::Paused);

    engine.queue_commands([
        PlayerCommand::Fire { x: 300.0, y: 500.0 },
        PlayerCommand::MoveTo { x: 100.0 },
    ]);
    for _ in 0..20 {
        let snapshot = engine.tick();
        assert_eq!(snapshot.time, paused.time);
        assert_eq!(snapshot.projectiles.len(), paused.projectiles.len());
        assert_eq!(
            snapshot.projectiles[0].position,
            paused.projectiles[0].position
        );
        assert_eq!(snapshot.player.position, paused.player.position);
    }

    engine.queue_command(PlayerCommand::Resume);
    let resumed = engine.tick();
    assert_eq!(resumed.phase, MatchPhase::Playing);
    assert_eq!(resumed.time.tick, paused.time.tick + 1);
}

// ---- Wave flow ----

#[test]
fn test_advance_rejected_until_wave_clear() {
    let mut engine = engine_at("mouth");
    engine.queue_command(PlayerCommand::AdvanceWave);
    let snapshot = engine.tick();
    assert_eq!(snapshot.hud.current_wave, 1);
    assert_eq!(snapshot.phase, MatchPhase::Playing);

    let snapshot = clear_wave(&mut engine);
    assert_eq!(snapshot.phase, MatchPhase::WaveClear);
    assert!(snapshot.events.contains(&GameEvent::WaveCleared { wave: 1 }));

    engine.queue_command(PlayerCommand::AdvanceWave);
    let snapshot = engine.tick();
    assert_eq!(snapshot.phase, MatchPhase::Playing);
    assert_eq!(snapshot.hud.current_wave, 2);
    assert!(snapshot
        .events
        .contains(&GameEvent::WaveStarted { wave: 2, size: 9 }));
}

#[test]
fn test_wave_clear_freezes_clock() {
    let mut engine = engine_at("mouth");
    let cleared = clear_wave(&mut engine);
    let later = engine.tick();
    assert_eq!(later.time, cleared.time);
    assert_eq!(later.phase, MatchPhase::WaveClear);
}

#[test]
fn test_clearing_all_waves_is_victory() {
    let mut engine = engine_at("mouth");
    for _ in 0..2 {
        assert_eq!(clear_wave(&mut engine).phase, MatchPhase::WaveClear);
        engine.queue_command(PlayerCommand::AdvanceWave);
        engine.tick();
    }
    let snapshot = clear_wave(&mut engine);
    assert_eq!(snapshot.phase, MatchPhase::Victory);
    assert!(snapshot.events.contains(&GameEvent::WaveCleared { wave: 3 }));
    assert!(snapshot.events.contains(&GameEvent::Victory));

    engine.queue_command(PlayerCommand::AdvanceWave);
    assert_eq!(engine.tick().phase, MatchPhase::Victory);
}

#[test]
fn test_unmet_win_condition_is_defeat() {
    let mut engine = engine_at("gut");
    engine.match_state_mut().adjust_balance(-10);
    for _ in 0..4 {
        clear_wave(&mut engine);
        engine.queue_command(PlayerCommand::AdvanceWave);
        engine.tick();
    }
    let snapshot = clear_wave(&mut engine);
    assert_eq!(snapshot.hud.current_wave, 5);
    assert_eq!(snapshot.phase, MatchPhase::Defeat);
    assert!(snapshot.events.contains(&GameEvent::Defeat));
}

#[test]
fn test_depleted_immune_health_is_defeat() {
    let mut engine = arena("mouth");
    engine.match_state_mut().adjust_immune_health(-95);
    engine.spawn_test_bacterium(Species::Salmonella, Position::new(798.0, 200.0), 0);

    let mut defeat = None;
    for _ in 0..10 {
        let snapshot = engine.tick();
        if snapshot.phase == MatchPhase::Defeat {
            defeat = Some(snapshot);
            break;
        }
    }
    let snapshot = defeat.expect("match should be lost");
    assert_eq!(snapshot.hud.immune_health_pct, 0);
    assert!(snapshot.events.contains(&GameEvent::Defeat));

    let after = engine.tick();
    assert_eq!(after.time, snapshot.time);
}

// ---- Restart and navigation ----

#[test]
fn test_restart_keeps_location_and_difficulty() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_commands([
        PlayerCommand::SelectDifficulty {
            level: Difficulty::Hard,
        },
        PlayerCommand::SelectLocation {
            location: "stomach".into(),
        },
    ]);
    for _ in 0..30 {
        engine.tick();
    }

    engine.queue_command(PlayerCommand::Restart);
    let snapshot = engine.tick();
    assert_eq!(snapshot.phase, MatchPhase::Playing);
    assert_eq!(snapshot.location, Some(LocationId::from("stomach")));
    assert_eq!(snapshot.difficulty, Difficulty::Hard);
    assert_eq!(snapshot.time.tick, 1);
    assert_eq!(snapshot.hud.current_wave, 1);
    assert_eq!(snapshot.resources.energy, 80);
}

#[test]
fn test_return_to_location_select() {
    let mut engine = engine_at("skin");
    for _ in 0..20 {
        engine.tick();
    }
    engine.queue_command(PlayerCommand::ReturnToLocationSelect);
    let snapshot = engine.tick();
    assert_eq!(snapshot.phase, MatchPhase::LocationSelect);
    assert_eq!(snapshot.time.tick, 0);
    assert_eq!(snapshot.time.elapsed_ms, 0);
    assert_eq!(snapshot.location, None);
    assert!(snapshot.bacteria.is_empty());
    assert_eq!(engine.world().len(), 0);

    engine.queue_command(PlayerCommand::Restart);
    assert_eq!(engine.tick().phase, MatchPhase::LocationSelect);
}

#[test]
fn test_unknown_location_is_ignored() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::SelectLocation {
        location: "spleen".into(),
    });
    let snapshot = engine.tick();
    assert_eq!(snapshot.phase, MatchPhase::LocationSelect);
    assert_eq!(snapshot.time.tick, 0);
}

#[test]
fn test_difficulty_locked_during_match() {
    let mut engine = engine_at("mouth");
    engine.queue_command(PlayerCommand::SelectDifficulty {
        level: Difficulty::Easy,
    });
    assert_eq!(engine.tick().difficulty, Difficulty::Normal);
}

// ---- Invariants ----

#[test]
fn test_meters_and_health_stay_clamped() {
    let mut engine = SimulationEngine::new(SimConfig {
        seed: 99,
        ..Default::default()
    });
    engine.queue_commands([
        PlayerCommand::SelectDifficulty {
            level: Difficulty::Hard,
        },
        PlayerCommand::SelectLocation {
            location: "gut".into(),
        },
        PlayerCommand::SetTrigger { held: true },
    ]);

    let tools = ["antibiotic", "probiotic", "phage", "antibodies", "broad-spectrum"];
    for i in 0..4000u32 {
        if i % 50 == 0 {
            engine.queue_command(PlayerCommand::SelectTool {
                tool: ToolId::from(tools[(i / 50) as usize % tools.len()]),
            });
            engine.queue_command(PlayerCommand::MoveTo {
                x: f64::from((i * 37) % 800),
            });
        }
        let snapshot = engine.tick();
        assert!((0..=100).contains(&snapshot.hud.immune_health_pct));
        assert!((0..=100).contains(&snapshot.hud.balance_pct));
        for b in &snapshot.bacteria {
            assert!(b.health <= b.max_health);
            assert!(b.position.x <= 800.0);
        }
        match snapshot.phase {
            MatchPhase::WaveClear => engine.queue_command(PlayerCommand::AdvanceWave),
            phase if phase.is_terminal() => break,
            _ => {}
        }
    }
}
