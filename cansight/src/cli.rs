//! CLI argument parsing and configuration lookup.

use std::path::{Path, PathBuf};

use clap::Parser;

use cansight_common::{DashboardConfig, FeedMode, Result, load_config};

/// Live CAN telemetry dashboard.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "cansight")]
#[command(about = "Live motor-controller telemetry charts")]
#[command(version)]
pub struct Args {
    /// Path to configuration file (JSON5 format).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Replay a recorded history file instead of the demo feed.
    #[arg(long)]
    pub replay: Option<PathBuf>,

    /// Seed for the demo simulator.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Default config location: `<config_dir>/cansight/config.json5`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cansight").join("config.json5"))
}

/// Load the configuration selected by `args`, apply CLI overrides and
/// validate the result.
///
/// An explicit `--config` must exist; the default location is only used
/// when present, otherwise built-in defaults apply.
pub fn resolve_config(args: &Args) -> Result<DashboardConfig> {
    let path = args
        .config
        .clone()
        .or_else(|| default_config_path().filter(|path| path.exists()));

    match path {
        Some(path) => resolve_config_from(&path, args),
        None => apply_overrides(DashboardConfig::default(), args),
    }
}

/// Load a config file and apply overrides.
pub fn resolve_config_from(path: &Path, args: &Args) -> Result<DashboardConfig> {
    apply_overrides(load_config(path)?, args)
}

fn apply_overrides(mut config: DashboardConfig, args: &Args) -> Result<DashboardConfig> {
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }

    if let Some(path) = &args.replay {
        config.feed.mode = FeedMode::Replay;
        config.feed.path = Some(path.clone());
    }

    if let Some(seed) = args.seed {
        config.feed.seed = Some(seed);
    }

    config.validate()?;
    Ok(config)
}
