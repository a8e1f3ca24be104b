//! Configuration system for the galaxy backdrop.
//!
//! Provides runtime-configurable settings that persist to disk as RON files.
//! Supports CLI overrides via clap, hot-reload detection, validation of the
//! particle field tunables, and forward/backward compatible serialization.

mod band;
mod cli;
mod color;
mod config;
mod error;

pub use band::Band;
pub use cli::CliArgs;
pub use color::Rgba;
pub use config::{APP_DIR_NAME, CONFIG_FILE_NAME, Config, DebugConfig, FieldConfig, WindowConfig};
pub use error::ConfigError;
