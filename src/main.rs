//! Stage gimmicks headless runner.
//!
//! Level gimmicks simulated on an ECS world:
//! - **bevy_ecs** for entity-component-system architecture
//! - **glam** for vector math
//! - **configparser** for gimmick defaults, **serde_json** for level layouts
//!
//! # Project Structure
//!
//! - [`components`] – ECS components (positions, colliders, gimmick state)
//! - [`events`] – Event types (overlap, timers, buttons, sequences)
//! - [`game`] – Level spawning and the per-frame schedule
//! - [`resources`] – ECS resources (time, config, level layout, overlap pairs)
//! - [`systems`] – ECS systems and observers
//!
//! # Main Loop
//!
//! 1. Load the gimmick config (defaults if the file is missing)
//! 2. Load the level layout, or use the built-in demo level
//! 3. Spawn the level, register observers and build the schedule
//! 4. Run a fixed number of frames with a fixed delta
//! 5. Log where every gimmick ended up
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --frames 900
//! ```

mod components;
mod events;
mod game;
mod resources;
mod systems;

use crate::resources::gimmickconfig::GimmickConfig;
use crate::resources::levellayout::LevelLayout;
use clap::Parser;
use std::path::PathBuf;

/// Stage gimmicks: moving platforms, collapsing floors, button sequences and push blocks.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Gimmick config INI file (default: ./gimmicks.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Level layout JSON file. Runs the demo level when omitted.
    #[arg(long, value_name = "PATH")]
    level: Option<PathBuf>,

    /// Number of frames to simulate (overrides the config).
    #[arg(long, value_name = "N")]
    frames: Option<u32>,

    /// Fixed frame delta in seconds (overrides the config).
    #[arg(long, value_name = "SECONDS")]
    delta: Option<f32>,

    /// Write the demo level layout as JSON and exit.
    #[arg(long, value_name = "PATH")]
    write_demo_level: Option<PathBuf>,

    /// Write the effective gimmick config as INI and exit.
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Early-exit: write the demo level and quit
    if let Some(path) = cli.write_demo_level {
        if let Err(e) = LevelLayout::demo().save(&path) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("Demo level written to {}", path.display());
        return;
    }

    let mut config = match cli.config {
        Some(path) => GimmickConfig::with_path(path),
        None => GimmickConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        log::warn!("{e}; using default gimmick config");
    }

    // Early-exit: write the effective config and quit
    if let Some(path) = cli.write_config {
        config.config_path = path.clone();
        if let Err(e) = config.save_to_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("Gimmick config written to {}", path.display());
        return;
    }

    let frames = cli.frames.unwrap_or(config.frames);
    let delta = cli.delta.unwrap_or(config.delta);

    let layout = match cli.level {
        Some(path) => match LevelLayout::load(&path) {
            Ok(layout) => layout,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => {
            log::info!("No level given, running the demo level");
            LevelLayout::demo()
        }
    };

    let mut world = game::setup_world(&config);
    let entities = game::spawn_level(&mut world, &layout, &config);
    game::register_observers(&mut world);
    let mut update = game::build_schedule();

    log::info!("Running {} frames at {:.4}s per frame", frames, delta);
    game::run_frames(&mut world, &mut update, frames, delta);
    game::log_summary(&world, &entities);
}
