//! Command-line argument parsing for the planet generator.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Planet generator command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "cosmos-demo", about = "Procedural planet surface generator")]
pub struct CliArgs {
    /// Seed for the randomized planet.
    #[arg(long)]
    pub seed: Option<i32>,

    /// Grid points per face edge (2..=255).
    #[arg(long)]
    pub resolution: Option<u32>,

    /// Load planet settings from a RON file instead of randomizing.
    #[arg(long)]
    pub planet: Option<PathBuf>,

    /// Orbit distance used when randomizing.
    #[arg(long)]
    pub orbit_distance: Option<f32>,

    /// Output directory.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Build faces one after another on the main thread.
    #[arg(long)]
    pub sequential: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.generation.seed = seed;
        }
        if let Some(resolution) = args.resolution {
            self.generation.resolution = resolution;
        }
        if let Some(orbit) = args.orbit_distance {
            self.generation.orbit_distance = orbit;
        }
        if let Some(ref dir) = args.output {
            self.output.directory = dir.clone();
        }
        if args.sequential {
            self.generation.parallel_faces = false;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
