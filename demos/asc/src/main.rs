//! asc — one race day of a road-route solar race.
//!
//! Builds a synthetic westbound route across Kansas with three checkpoints
//! and a time-zone change, a hourly weather grid, and a seeded speed
//! profile, then aligns every tick and writes the result as CSV.
//!
//! ```text
//! asc [--config CONFIG.json] [--output-dir DIR] [--seed N]
//! ```
//!
//! The config file holds any subset of `SimConfig` fields; missing fields
//! take their defaults.  Set `RUST_LOG=debug` for per-stage logging.

mod route;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use sr_core::SimConfig;
use sr_output::{CsvWriter, SimOutputObserver};
use sr_sim::SimBuilder;

use route::{build_route, build_weather};

// ── Constants ─────────────────────────────────────────────────────────────────

/// 2022-07-09 09:00 CDT.
const RACE_START_UNIX:    i64 = 1_657_375_200;
/// Speed is redrawn once per this many seconds.
const SPEED_BLOCK_SECS:   u64 = 300;
const MIN_SPEED_KMH:      f64 = 45.0;
const MAX_SPEED_KMH:      f64 = 80.0;

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(name = "asc", version)]
#[command(about = "Align one ASC race day and write per-tick CSV output")]
struct Args {
    /// JSON file with `SimConfig` overrides
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for tick_alignment.csv and waypoint_stops.csv
    #[arg(long, default_value = "output/asc")]
    output_dir: PathBuf,

    /// Seed for the speed profile
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

// ── Configuration ─────────────────────────────────────────────────────────────

fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig { start_unix_secs: RACE_START_UNIX, ..SimConfig::default() });
    };
    let file = File::open(path).with_context(|| format!("opening config {}", path.display()))?;
    let config: SimConfig = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

/// Piecewise-constant speed profile: one random speed per block.
fn speed_profile(config: &SimConfig, rng: &mut SmallRng) -> Vec<f64> {
    let block_ticks = config.make_clock().ticks_for_secs(SPEED_BLOCK_SECS).max(1) as usize;
    let n = config.total_ticks as usize;
    let mut speeds = Vec::with_capacity(n);
    while speeds.len() < n {
        let v = rng.gen_range(MIN_SPEED_KMH..MAX_SPEED_KMH);
        let len = block_ticks.min(n - speeds.len());
        speeds.extend(std::iter::repeat_n(v, len));
    }
    speeds
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    let output_dir = args.output_dir;
    info!(
        start = config.start_unix_secs,
        ticks = config.total_ticks,
        tick_secs = config.tick_duration_secs,
        race = %config.race,
        "configuration loaded"
    );

    if let Some(n) = config.num_threads {
        rayon::ThreadPoolBuilder::new().num_threads(n).build_global()?;
    }

    // 1. Route and weather.
    let route = build_route()?;
    let hours = (config.total_ticks * config.tick_duration_secs as u64).div_ceil(3600) as i64;
    let weather = build_weather(&route, config.start_unix_secs, hours);
    info!(
        coords = route.len(),
        length_km = route.total_length_m() / 1000.0,
        checkpoints = ?route.waypoints,
        weather_locations = weather.coords.len(),
        "route built"
    );

    // 2. Speed profile.
    let mut rng = SmallRng::seed_from_u64(args.seed);
    let speeds = speed_profile(&config, &mut rng);

    // 3. Sim.
    let sim = SimBuilder::new(config, route, weather).build()?;

    // 4. Output.
    std::fs::create_dir_all(&output_dir)?;
    let writer = CsvWriter::new(&output_dir)?;
    let mut obs = SimOutputObserver::new(writer);

    // 5. Run.
    let t0 = Instant::now();
    let alignment = sim.run(&speeds, &mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        warn!(error = %e, "output error");
    }

    // 6. Summary.
    println!("Alignment complete in {:.3} s", elapsed.as_secs_f64());
    println!(
        "  distance          : {:.1} km",
        alignment.cumulative_m.last().copied().unwrap_or(0.0) / 1000.0
    );
    println!("  route finished    : {}", alignment.finished_route());
    println!("  tick_alignment.csv: {} rows", alignment.len());
    println!("  waypoint_stops.csv: {} rows", alignment.stops.len());
    println!();

    println!("{:<10} {:<8} {:<12} {:<12}", "Waypoint", "Tick", "Resume", "Local time");
    println!("{}", "-".repeat(44));
    for stop in &alignment.stops {
        println!(
            "{:<10} {:<8} {:<12} {:<12.4}",
            stop.waypoint,
            stop.tick,
            stop.resume_tick,
            alignment.local_time[stop.tick],
        );
    }

    Ok(())
}
