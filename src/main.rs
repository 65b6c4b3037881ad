/*
 * Boid Flocking Simulation
 *
 * Entry point. Parses the command line, builds the flock and either opens
 * the interactive window or runs a fixed number of ticks headless and logs
 * a summary.
 *
 *   flocking --preset volume --seed 7
 *   flocking --preset planar --headless --ticks 1000
 *   flocking --config params.json
 */

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;

use flocking::app::{self, Scene};
use flocking::{Flock, SimulationParams, Vector};
use nannou::prelude::{Vec2, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Preset {
    /// 2-D flock wrapping around the edges of its area.
    Planar,
    /// 3-D flock released from the origin and pulled toward a target.
    Volume,
}

#[derive(Debug, Parser)]
#[command(name = "flocking", about = "Boid flocking simulation")]
struct Cli {
    /// Parameter table to start from.
    #[arg(long, value_enum, default_value_t = Preset::Planar)]
    preset: Preset,
    /// JSON file overriding the preset; missing fields fall back to defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Initial number of boids.
    #[arg(long)]
    boids: Option<usize>,
    /// RNG seed for reproducible initial velocities.
    #[arg(long)]
    seed: Option<u64>,
    /// Run without a window.
    #[arg(long)]
    headless: bool,
    /// Ticks to run in headless mode.
    #[arg(long, default_value_t = 600)]
    ticks: u64,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let params = load_params(&cli)?;
    let volumetric = cli.preset == Preset::Volume;

    if cli.headless {
        if volumetric {
            run_headless::<Vec3>(params, cli.ticks)
        } else {
            run_headless::<Vec2>(params, cli.ticks)
        }
    } else {
        let (scene, frame) = Scene::new(params, volumetric).context("failed to create flock")?;
        info!("Starting interactive simulation");
        app::run(scene, frame);
        Ok(())
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}

fn load_params(cli: &Cli) -> Result<SimulationParams> {
    let mut params = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => match cli.preset {
            Preset::Planar => SimulationParams::planar(),
            Preset::Volume => SimulationParams::volume(),
        },
    };

    if let Some(boids) = cli.boids {
        params.num_boids = boids;
    }
    if cli.seed.is_some() {
        params.rng_seed = cli.seed;
    }
    params.validate().context("invalid simulation parameters")?;
    Ok(params)
}

fn run_headless<V: Vector>(params: SimulationParams, ticks: u64) -> Result<()> {
    let mut flock = Flock::<V>::new(params)?;

    for _ in 0..ticks {
        flock.tick()?;
    }

    let centroid = flock.centroid();
    info!(
        tick = flock.tick_count(),
        boids = flock.len(),
        centroid = ?centroid,
        mean_speed = flock.mean_speed(),
        "Headless run complete",
    );
    Ok(())
}
