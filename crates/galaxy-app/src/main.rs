//! The `galaxy` binary: an animated star field with a glowing, orbited core.
//!
//! Run with: `cargo run -p galaxy-app -- --help`

use std::process::ExitCode;

use clap::Parser;
use galaxy_app::{HeadlessError, HeadlessOptions, HeadlessRenderer, PlatformDirs, PlatformError};
use galaxy_config::{CliArgs, Config, ConfigError};
use tracing::{error, info};

/// Everything that can stop the binary.
#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("platform: {0}")]
    Platform(#[from] PlatformError),

    #[error("config: {0}")]
    Config(#[from] ConfigError),

    #[error("headless render: {0}")]
    Headless(#[from] HeadlessError),

    #[error("event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("galaxy: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs) -> Result<(), AppError> {
    let mut dirs = PlatformDirs::resolve()?;
    if let Some(config_dir) = args.config.clone() {
        dirs = dirs.with_config_dir(config_dir);
    }
    dirs.create_dirs()?;

    let mut config = Config::load_or_create(&dirs.config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    galaxy_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    config.validate()?;

    info!(
        "Galaxy backdrop: {}x{}, {} stars, {} ring particles",
        config.window.width,
        config.window.height,
        config.field.star_count,
        config.field.ring_particle_count
    );
    info!("Config directory: {}", dirs.config_dir.display());

    if args.headless {
        let output = args.output.clone().unwrap_or_else(|| dirs.frames_dir());
        let options = HeadlessOptions::new(args.frames, args.capture_every, output);
        let report = HeadlessRenderer::new(&config).run(&options)?;
        if let Some(last) = report.written.last() {
            info!("Last frame written to {}", last.display());
        }
        return Ok(());
    }

    galaxy_app::run(config, dirs, args)?;
    Ok(())
}
