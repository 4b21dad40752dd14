//! Orbit CLI - headless driver for hierarchical orbital systems.
//!
//! Builds a scene, advances it tick by tick and prints what a renderer would
//! read back each frame.

mod config;
mod logger;
mod scene;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use config::SimulationConfig;
use logger::OrbitLogger;
use orbit::{OrbiterId, OrbiterKind};
use scene::Scene;
use std::path::PathBuf;
use strum::IntoEnumIterator;

/// Orbit CLI - simulate orbiters and inspect their world transforms
#[derive(Parser)]
#[command(name = "orbit")]
#[command(about = "Headless driver for hierarchical orbital systems")]
struct Cli {
    /// JSON simulation config (default: built-in demo scene)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of ticks to run, overrides the config
    #[arg(short, long)]
    ticks: Option<u32>,

    /// Time advanced per tick, overrides the config
    #[arg(long)]
    dt: Option<f64>,

    /// Log level, overrides the config
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation and print every body's placement
    Simulate {
        /// Also print the table every N ticks
        #[arg(short, long)]
        every: Option<u32>,
    },

    /// Run the simulation, then dump one body's world matrix
    Matrix {
        /// Index of the body in the scene
        index: usize,
    },

    /// List the available shape kinds
    Kinds,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(ticks) = cli.ticks {
        config.ticks = ticks;
    }
    if let Some(dt) = cli.dt {
        config.time_delta = dt;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    OrbitLogger::init(config.level_filter()?)?;

    match cli.command {
        Commands::Simulate { every } => simulate(&config, every),
        Commands::Matrix { index } => print_matrix(&config, index),
        Commands::Kinds => list_kinds(),
    }
}

fn build_scene(config: &SimulationConfig) -> Result<Scene> {
    if config.bodies.is_empty() {
        log::info!("No bodies configured, using the demo scene");
        Scene::build(&scene::demo_bodies())
    } else {
        Scene::build(&config.bodies)
    }
}

/// Run the configured ticks, printing the table at the end and optionally
/// every `every` ticks along the way.
fn simulate(config: &SimulationConfig, every: Option<u32>) -> Result<()> {
    let mut scene = build_scene(config)?;
    log::info!(
        "Simulating {} ticks of {} time units",
        config.ticks,
        config.time_delta
    );

    for tick in 1..=config.ticks {
        scene.system.tick(config.time_delta);
        if reports_before_end(tick, config.ticks, every) {
            print_placements(&scene, tick)?;
        }
    }

    print_placements(&scene, config.ticks)
}

/// Whether `tick` gets an intermediate table. The last tick is always printed
/// separately, and `every == 0` disables intermediate tables.
fn reports_before_end(tick: u32, ticks: u32, every: Option<u32>) -> bool {
    every
        .filter(|n| *n > 0)
        .is_some_and(|n| tick % n == 0 && tick != ticks)
}

fn print_placements(scene: &Scene, tick: u32) -> Result<()> {
    println!("Tick {}", tick);
    println!(
        "  {:<10} {:<9} {:<8} {:>10} {:>10} {:>10}",
        "name", "kind", "fill", "x", "y", "angle"
    );

    for placement in scene.system.placements()? {
        let name = scene.name_of(placement.id).unwrap_or("?");
        let fill = format!("#{:x}", placement.fill.into_format::<u8>());
        println!(
            "  {:<10} {:<9} {:<8} {:>10.3} {:>10.3} {:>10.3}",
            name,
            placement.kind.to_string(),
            fill,
            placement.position.x,
            placement.position.y,
            placement.rotation
        );
    }
    println!();

    Ok(())
}

fn print_matrix(config: &SimulationConfig, index: usize) -> Result<()> {
    let mut scene = build_scene(config)?;
    let (name, id) = body_at(&scene, index)?;

    for _ in 0..config.ticks {
        scene.system.tick(config.time_delta);
    }

    let world = scene.system.matrix(id)?;
    let position = world.project_h2d(0.0, 0.0)?;
    println!("{} after {} ticks", name, config.ticks);
    print!("{}", world);
    println!("position: ({:.3}, {:.3})", position.x, position.y);

    Ok(())
}

fn body_at(scene: &Scene, index: usize) -> Result<(String, OrbiterId)> {
    scene.bodies.get(index).cloned().ok_or_else(|| {
        anyhow!(
            "No body at index {}, the scene has {} bodies",
            index,
            scene.bodies.len()
        )
    })
}

fn list_kinds() -> Result<()> {
    for kind in OrbiterKind::iter() {
        println!("{}", kind);
    }
    Ok(())
}
