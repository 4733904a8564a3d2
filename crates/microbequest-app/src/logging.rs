//! Logger setup for the `microbequest` binary.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Level used when `RUST_LOG` is unset. Verbose runs also show rejected commands.
pub fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install the global logger. `RUST_LOG` overrides `verbose`.
/// Repeat calls leave the first logger in place.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_level(verbose).to_string());
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_millis().format_target(verbose);
    let _ = builder.try_init();
}
