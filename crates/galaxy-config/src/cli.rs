//! Command-line argument parsing for the galaxy backdrop.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Galaxy backdrop command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "galaxy", about = "Animated star field with an orbiting galaxy core")]
pub struct CliArgs {
    /// Window (or headless canvas) width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window (or headless canvas) height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Start in fullscreen.
    #[arg(long)]
    pub fullscreen: Option<bool>,

    /// Seed for the particle field's random source.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of background stars.
    #[arg(long)]
    pub stars: Option<u32>,

    /// Number of ring particles orbiting the core.
    #[arg(long)]
    pub ring_particles: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Render to PNG files instead of opening a window.
    #[arg(long)]
    pub headless: bool,

    /// Number of frames to simulate in headless mode.
    #[arg(long, default_value_t = 120)]
    pub frames: u32,

    /// Write every Nth frame in headless mode (0 writes only the last frame).
    #[arg(long, default_value_t = 0)]
    pub capture_every: u32,

    /// Output directory for headless frames (defaults to the data directory).
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(fs) = args.fullscreen {
            self.window.fullscreen = fs;
        }
        if let Some(seed) = args.seed {
            self.field.seed = Some(seed);
        }
        if let Some(stars) = args.stars {
            self.field.star_count = stars;
        }
        if let Some(rings) = args.ring_particles {
            self.field.ring_particle_count = rings;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
