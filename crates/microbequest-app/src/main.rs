use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use microbequest_app::error::AppError;
use microbequest_app::logging;
use microbequest_app::runner::{self, MatchSetup};
use microbequest_core::config::GameConfig;
use microbequest_core::enums::Difficulty;
use microbequest_sim::engine::SimConfig;

/// Run a MicrobeQuest match with the autopilot and print a JSON summary
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Game catalog (JSON); the built-in catalog is used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Body location to defend
    #[arg(short, long, default_value = "gut")]
    location: String,

    #[arg(short, long, value_enum, default_value_t = DifficultyArg::Normal)]
    difficulty: DifficultyArg,

    /// RNG seed; the same seed replays the same match
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Stop after this many frames even if the match is undecided
    #[arg(long, default_value_t = 100_000)]
    max_ticks: u64,

    /// Run through the game loop thread at the real frame rate
    #[arg(long)]
    realtime: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Also write the final snapshot to this file
    #[arg(long)]
    snapshot_json: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Easy,
    Normal,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Normal => Difficulty::Normal,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let config = match &args.config {
        Some(path) => GameConfig::from_path(path)?,
        None => GameConfig::default(),
    };
    let setup = MatchSetup {
        location: args.location.as_str().into(),
        difficulty: args.difficulty.into(),
    };
    let sim = SimConfig {
        seed: args.seed,
        ..Default::default()
    };

    let (summary, snapshot) = if args.realtime {
        runner::run_realtime(sim, config, &setup, args.max_ticks)?
    } else {
        runner::run_headless(sim, config, &setup, args.max_ticks)?
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);

    if let Some(path) = args.snapshot_json {
        let json = serde_json::to_string_pretty(&snapshot)?;
        std::fs::write(&path, json).map_err(|source| AppError::Output { path, source })?;
    }
    Ok(())
}
