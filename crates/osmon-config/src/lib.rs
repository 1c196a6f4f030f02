//! Configuration file handling for osmon.
//!
//! The config file lives at `<config_dir>/config.toml` and doubles as the
//! place where the chosen theme is remembered between runs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use osmon_core::Theme;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CONFIG_FILE: &str = "config.toml";

/// Upper bound for the configured pixel ratio.
pub const MAX_PIXEL_RATIO: f32 = 4.0;

/// Errors raised while reading or writing the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine a configuration directory")]
    NoConfigDir,
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// User configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Last selected page theme.
    pub theme: Theme,
    /// Device pixel ratio used for the backing buffer.
    pub pixel_ratio: f32,
    /// Layout units covered by one terminal column.
    pub cell_width: f32,
    /// Layout units covered by one terminal row.
    pub cell_height: f32,
    /// Target frames per second.
    pub frame_rate: u32,
    /// Meteor spawn timer period in milliseconds.
    pub meteor_interval_ms: u64,
    /// Fixed random seed, if set.
    pub seed: Option<u64>,
    /// Show the key help line.
    pub show_help: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            pixel_ratio: 1.0,
            cell_width: 8.0,
            cell_height: 16.0,
            frame_rate: 30,
            meteor_interval_ms: 2200,
            seed: None,
            show_help: true,
        }
    }
}

impl Config {
    /// Path of the config file in the platform config directory.
    pub fn path() -> Result<PathBuf, ConfigError> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load the config from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok(toml::from_str(&contents)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Save the config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Time between frames.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.frame_rate.clamp(1, 120)))
    }

    /// Pixel ratio clamped to `1..=MAX_PIXEL_RATIO`. Non-finite values give 1.
    pub fn device_pixel_ratio(&self) -> f32 {
        if self.pixel_ratio.is_finite() {
            self.pixel_ratio.clamp(1.0, MAX_PIXEL_RATIO)
        } else {
            1.0
        }
    }

    /// Period of the meteor spawn timer.
    pub fn meteor_interval(&self) -> Duration {
        Duration::from_millis(self.meteor_interval_ms.max(1))
    }
}

/// Directory for log output.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    project_dirs().map(|dirs| dirs.data_local_dir().to_path_buf())
}

fn project_dirs() -> Result<ProjectDirs, ConfigError> {
    ProjectDirs::from("", "", "osmon").ok_or(ConfigError::NoConfigDir)
}
