//! Per-user directories for config, screenshots and logs.

use std::path::{Path, PathBuf};

use galaxy_config::APP_DIR_NAME;

/// Errors that can occur while resolving or creating directories.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The OS did not provide a configuration directory.
    #[error("could not determine OS configuration directory")]
    NoConfigDir,

    /// A directory could not be created.
    #[error("failed to create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// OS-specific directory paths for the application.
///
/// Follows XDG on Linux, Known Folders on Windows and `Library` on macOS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDirs {
    /// Holds `config.ron`.
    pub config_dir: PathBuf,
    /// Screenshots and headless frames.
    pub data_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl PlatformDirs {
    /// Resolve directories without creating them. Data and cache fall back to
    /// the config directory when the OS has no dedicated location.
    pub fn resolve() -> Result<Self, PlatformError> {
        let config_dir = dirs::config_dir()
            .ok_or(PlatformError::NoConfigDir)?
            .join(APP_DIR_NAME);
        let data_dir = dirs::data_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .unwrap_or_else(|| config_dir.join("data"));
        let cache_dir = dirs::cache_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .unwrap_or_else(|| config_dir.join("cache"));
        let log_dir = config_dir.join("logs");

        Ok(Self {
            config_dir,
            data_dir,
            cache_dir,
            log_dir,
        })
    }

    /// Lay out all directories under `root`.
    pub fn with_root(root: &Path) -> Self {
        let app_dir = root.join(APP_DIR_NAME);
        Self {
            config_dir: app_dir.join("config"),
            data_dir: app_dir.join("data"),
            cache_dir: app_dir.join("cache"),
            log_dir: app_dir.join("logs"),
        }
    }

    /// Use `config_dir` for the config file, keeping the other locations.
    pub fn with_config_dir(mut self, config_dir: PathBuf) -> Self {
        self.config_dir = config_dir;
        self
    }

    /// Create every directory on disk.
    pub fn create_dirs(&self) -> Result<(), PlatformError> {
        for dir in [
            &self.config_dir,
            &self.data_dir,
            &self.cache_dir,
            &self.log_dir,
        ] {
            std::fs::create_dir_all(dir).map_err(|source| PlatformError::CreateDir {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(())
    }

    /// Default output directory for headless frames.
    pub fn frames_dir(&self) -> PathBuf {
        self.data_dir.join("frames")
    }
}
