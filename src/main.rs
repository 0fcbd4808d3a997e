//! Pandemic Sim headless entry point
//!
//! Runs the simulation without a frontend and reports population counts.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use pandemic_sim::{SimConfig, World};

/// Census logging cadence
const REPORT_EVERY: u64 = 100;

#[derive(Parser, Debug)]
#[command(
    name = "pandemic-sim",
    version,
    about = "Run a contagion simulation headless and report population counts"
)]
struct Cli {
    /// JSON configuration file; missing fields take defaults.
    config: Option<PathBuf>,

    /// Maximum number of ticks to run.
    #[arg(long, default_value_t = 1000)]
    ticks: u64,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::info!("Pandemic Sim (headless) starting...");

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SimConfig::default(),
    };
    let mut world = World::new(config).context("failed to build world")?;

    for _ in 0..cli.ticks {
        world.step();
        let census = world.census();
        if world.tick_count() % REPORT_EVERY == 0 {
            log::info!("tick {}: {}", world.tick_count(), census);
        }
        if census.infected == 0 {
            log::info!("Outbreak ended at tick {}", world.tick_count());
            break;
        }
    }

    println!("{} ticks: {}", world.tick_count(), world.census());
    Ok(())
}

fn load_config(path: &Path) -> Result<SimConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config = SimConfig::from_json(&json)
        .with_context(|| format!("invalid configuration in {}", path.display()))?;
    log::info!("Loaded configuration from {}", path.display());
    Ok(config)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Headless runs are native only
}
