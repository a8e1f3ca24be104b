//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::band::Band;
use crate::color::Rgba;
use crate::error::ConfigError;

/// File name of the persisted configuration inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Directory name used under the OS configuration root.
pub const APP_DIR_NAME: &str = "galaxy-backdrop";

/// Everything persisted in `config.ron`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub field: FieldConfig,
    pub debug: DebugConfig,
}

/// The window, or the canvas size when rendering headless.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Logical width; pixels in headless mode.
    pub width: u32,
    /// Logical height; pixels in headless mode.
    pub height: u32,
    /// Borderless fullscreen on the current monitor.
    pub fullscreen: bool,
    /// Present with FIFO; otherwise the lowest-latency mode available.
    pub vsync: bool,
    pub title: String,
    /// Color shown beneath the transparent parts of the field.
    pub background: Rgba,
}

/// Every knob of the star field and the orbiting ring.
///
/// Defaults reproduce the classic backdrop: 3000 twinkling stars drifting
/// across the viewport and 500 ring particles orbiting a 30 px glowing core
/// between 40 and 110 px from the center.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
    /// Seed for the random source. `None` draws one from OS entropy.
    pub seed: Option<u64>,
    /// Number of background stars.
    pub star_count: u32,
    /// Star draw radius in pixels.
    pub star_radius: Band,
    /// Opacity band stars twinkle within.
    pub star_alpha: Band,
    /// Magnitude of the per-frame opacity change.
    pub star_alpha_speed: Band,
    /// Per-frame drift for each axis, in pixels.
    pub star_drift: Band,
    /// Number of ring particles.
    pub ring_particle_count: u32,
    /// Orbit radius band, measured from the surface center.
    pub ring_radius: Band,
    /// Per-frame angle increment in radians.
    pub ring_angular_speed: Band,
    /// Ring particle draw radius in pixels.
    pub ring_size: Band,
    /// Colors ring particles pick from.
    pub ring_palette: Vec<Rgba>,
    /// Core disc radius in pixels.
    pub core_radius: f32,
    /// Core fill and glow color.
    pub core_color: Rgba,
    /// Glow blur radius around the core in pixels.
    pub core_glow_blur: f32,
    /// Wrap ring angles into [0, 2π) after each step.
    pub normalize_angles: bool,
}

/// Diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log frames per second once a second.
    pub show_fps: bool,
    /// Level or `EnvFilter` directive, e.g. `"debug"` or `"warn,galaxy_field=trace"`.
    pub log_level: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
            title: "Galaxy Backdrop".to_string(),
            background: Rgba::BLACK,
        }
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        let core_radius = 30.0;
        Self {
            seed: None,
            star_count: 3000,
            star_radius: Band::new(0.5, 1.0),
            star_alpha: Band::new(0.3, 0.9),
            star_alpha_speed: Band::new(0.005, 0.015),
            star_drift: Band::symmetric(0.5),
            ring_particle_count: 500,
            ring_radius: Band::new(core_radius + 10.0, core_radius + 80.0),
            ring_angular_speed: Band::new(0.005, 0.015),
            ring_size: Band::new(0.8, 1.5),
            ring_palette: vec![
                Rgba::new(96, 150, 249, 0.34),
                Rgba::new(255, 100, 100, 0.35),
                Rgba::new(100, 100, 255, 0.24),
                Rgba::new(150, 255, 255, 0.28),
                Rgba::new(193, 196, 101, 1.0),
            ],
            core_radius,
            core_color: Rgba::new(255, 230, 200, 1.0),
            core_glow_blur: 15.0,
            normalize_angles: true,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            show_fps: false,
            log_level: "info".to_string(),
        }
    }
}

// --- Validation ---

impl FieldConfig {
    /// Check that every band is well formed and every scalar is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bands = [
            ("field.star_radius", self.star_radius),
            ("field.star_alpha", self.star_alpha),
            ("field.star_alpha_speed", self.star_alpha_speed),
            ("field.star_drift", self.star_drift),
            ("field.ring_radius", self.ring_radius),
            ("field.ring_angular_speed", self.ring_angular_speed),
            ("field.ring_size", self.ring_size),
        ];
        for (field, band) in bands {
            if !band.is_valid() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!(
                        "expected finite bounds with min <= max, got [{}, {}]",
                        band.min, band.max
                    ),
                });
            }
        }

        if self.star_radius.min < 0.0 || self.ring_size.min < 0.0 || self.ring_radius.min < 0.0 {
            return Err(ConfigError::Invalid {
                field: "field",
                reason: "radii and sizes must not be negative".to_string(),
            });
        }
        if !(self.core_radius.is_finite() && self.core_radius > 0.0) {
            return Err(ConfigError::Invalid {
                field: "field.core_radius",
                reason: format!("must be positive, got {}", self.core_radius),
            });
        }
        if !(self.core_glow_blur.is_finite() && self.core_glow_blur >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "field.core_glow_blur",
                reason: format!("must not be negative, got {}", self.core_glow_blur),
            });
        }
        if self.ring_particle_count > 0 && self.ring_palette.is_empty() {
            return Err(ConfigError::Invalid {
                field: "field.ring_palette",
                reason: "at least one color is required".to_string(),
            });
        }
        Ok(())
    }
}

impl Config {
    /// Validate every section that has constraints beyond its types.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.field.validate()
    }
}

// --- Persistence ---

impl Config {
    /// Default config directory: `<os config dir>/galaxy-backdrop`.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME))
    }

    /// Location of `config.ron` inside `config_dir`.
    pub fn file_path(config_dir: &Path) -> PathBuf {
        config_dir.join(CONFIG_FILE_NAME)
    }

    /// Parse a config from RON text. Missing sections and fields take their
    /// defaults, unknown ones are ignored.
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        ron::from_str(text).map_err(ConfigError::ParseError)
    }

    /// Pretty RON text for the config file.
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)
    }

    /// Read `config.ron` from `config_dir`.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let text =
            std::fs::read_to_string(Self::file_path(config_dir)).map_err(ConfigError::ReadError)?;
        Self::from_ron(&text)
    }

    /// Read `config.ron`, writing the defaults first when the file is absent.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = Self::file_path(config_dir);
        if !path.exists() {
            let config = Self::default();
            config.save(config_dir)?;
            log::info!("Wrote default config to {}", path.display());
            return Ok(config);
        }
        let config = Self::load(config_dir)?;
        log::info!("Using config {}", path.display());
        Ok(config)
    }

    /// Write `config.ron`, creating `config_dir` if needed.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;
        let text = self.to_ron()?;
        std::fs::write(Self::file_path(config_dir), text).map_err(ConfigError::WriteError)
    }

    /// Re-read `config.ron`. Yields the new config only when it differs
    /// from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let fresh = Self::load(config_dir)?;
        if fresh == *self {
            return Ok(None);
        }
        log::info!("Config file changed on disk");
        Ok(Some(fresh))
    }
}
