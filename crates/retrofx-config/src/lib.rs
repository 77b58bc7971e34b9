//! Configuration for the retrofx application.
//!
//! Settings are read from `config.toml` in the platform config directory.
//! A missing file is not an error; every field falls back to its default.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use retrofx_core::{AnimationSpeed, EffectKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Frame rate bounds accepted from configuration.
pub const MIN_FPS: u32 = 1;
pub const MAX_FPS: u32 = 240;

/// Glyph size bounds, in pixels.
const MIN_GLYPH_SIZE: u32 = 4;
const MAX_GLYPH_SIZE: u32 = 64;

/// Upper bound on simulated stars.
const MAX_STARS: usize = 5_000;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// User-facing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Effect started at launch.
    pub effect: EffectKind,
    /// Target frames per second.
    pub fps: u32,
    /// Animation speed multiplier.
    pub speed: AnimationSpeed,
    /// Rain glyph size in pixels.
    pub glyph_size: u32,
    /// Number of stars in the starfield.
    pub star_count: usize,
    /// Show the effect status line.
    pub show_status: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            effect: EffectKind::Matrix,
            fps: 60,
            speed: AnimationSpeed::Medium,
            glyph_size: 14,
            star_count: 200,
            show_status: true,
        }
    }
}

impl Config {
    /// Default location of the config file, if a home directory is known.
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config.normalized())
    }

    /// Clamp numeric fields into their supported ranges.
    pub fn normalized(mut self) -> Self {
        self.fps = self.fps.clamp(MIN_FPS, MAX_FPS);
        self.glyph_size = self.glyph_size.clamp(MIN_GLYPH_SIZE, MAX_GLYPH_SIZE);
        self.star_count = self.star_count.min(MAX_STARS);
        self
    }

    /// Time between frames at the configured rate.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(self.fps.clamp(MIN_FPS, MAX_FPS)))
    }
}

/// Directory for log files.
pub fn log_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_local_dir().to_path_buf())
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "retrofx")
}
