//! Runner configuration.
//!
//! Session parameters (world, weather, wind) plus settings for the headless
//! runner. Loaded from TOML; a missing or broken file falls back to defaults.

use std::fs;
use std::io;
use std::path::Path;

use landsea_gameplay::SessionConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Configuration file name.
pub const CONFIG_FILE: &str = "landsea.toml";

/// Errors from reading or writing the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read or written
    #[error("Config I/O error: {0}")]
    Io(#[from] io::Error),
    /// File is not valid TOML for this schema
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Config could not be encoded
    #[error("Config encode error: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Headless runner settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Simulation ticks per simulated second
    pub tick_rate: u32,
    /// Simulated seconds to run
    pub duration_secs: f32,
    /// Pace ticks against the wall clock
    pub realtime: bool,
    /// Log a one-line status every this many seconds; 0 disables
    pub status_interval_secs: f32,
    /// Press kick-off on the tick after a collision
    pub auto_kick: bool,
    /// Write the final snapshot here instead of stdout
    pub snapshot_path: Option<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            duration_secs: 60.0,
            realtime: false,
            status_interval_secs: 10.0,
            auto_kick: true,
            snapshot_path: None,
        }
    }
}

/// Full configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LandseaConfig {
    /// Game session parameters
    pub session: SessionConfig,
    /// Runner parameters
    pub runner: RunnerConfig,
}

impl LandseaConfig {
    /// Reads and parses a config file.
    pub fn try_load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    #[must_use]
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file {} not found, using defaults", path.display());
            return Self::default();
        }

        match Self::try_load_from(path) {
            Ok(mut config) => {
                info!("Loaded config from {}", path.display());
                config.validate();
                config
            },
            Err(e) => {
                warn!("Failed to load config file: {e}");
                Self::default()
            },
        }
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate and clamp configuration values to sensible ranges.
    pub fn validate(&mut self) {
        let world = &mut self.session.world;
        world.load_radius = world.load_radius.clamp(1, 8);
        let floor = world.min_cache_size();
        if let Some(max) = world.max_cached_chunks.as_mut() {
            *max = (*max).max(floor);
        }

        let weather = &mut self.session.weather;
        weather.min_duration = weather.min_duration.clamp(1.0, 3600.0);
        weather.max_duration = weather.max_duration.clamp(weather.min_duration, 3600.0);

        let wind = &mut self.session.wind;
        wind.base_speed = wind.base_speed.clamp(0.0, 1000.0);
        wind.base_angle = wind.base_angle.rem_euclid(360.0);

        let runner = &mut self.runner;
        runner.tick_rate = runner.tick_rate.clamp(10, 240);
        runner.duration_secs = runner.duration_secs.max(0.0);
        runner.status_interval_secs = runner.status_interval_secs.max(0.0);
    }

    /// Fixed tick length in seconds.
    #[must_use]
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.runner.tick_rate.max(1) as f32
    }

    /// Number of ticks to run.
    #[must_use]
    pub fn total_ticks(&self) -> u64 {
        (self.runner.duration_secs * self.runner.tick_rate as f32).round() as u64
    }
}
