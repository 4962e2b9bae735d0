//! Weather states and the Markov chain that moves between them.
//!
//! Weather only affects the wind: each state carries an intensity that the
//! session feeds into [`crate::wind::Wind::set_intensity`].

use serde::{Deserialize, Serialize};
use tracing::info;

/// Weather states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeatherState {
    /// Clear skies
    #[default]
    Clear,
    /// Rain and a stiffer breeze
    Rain,
    /// Storm winds
    Storm,
}

impl WeatherState {
    /// Display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Rain => "Rain",
            Self::Storm => "Storm",
        }
    }

    /// Wind speed multiplier.
    #[must_use]
    pub const fn intensity(self) -> f32 {
        match self {
            Self::Clear => 1.0,
            Self::Rain => 1.5,
            Self::Storm => 2.5,
        }
    }

    /// Whether rain is falling.
    #[must_use]
    pub const fn is_raining(self) -> bool {
        matches!(self, Self::Rain | Self::Storm)
    }

    /// Next state for a uniform roll in `[0, 1)`.
    #[must_use]
    pub fn next(self, roll: f32) -> Self {
        match self {
            Self::Clear if roll < 0.3 => Self::Rain,
            Self::Clear => Self::Clear,
            Self::Rain if roll < 0.4 => Self::Storm,
            Self::Rain if roll < 0.8 => Self::Clear,
            Self::Rain => Self::Rain,
            Self::Storm if roll < 0.5 => Self::Rain,
            Self::Storm => Self::Storm,
        }
    }
}

/// Timing for weather spells.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Shortest spell in seconds
    pub min_duration: f32,
    /// Longest spell in seconds
    pub max_duration: f32,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            min_duration: 30.0,
            max_duration: 120.0,
        }
    }
}

/// Manages weather state and transitions.
#[derive(Debug, Clone)]
pub struct WeatherSystem {
    current_state: WeatherState,
    time_remaining: f32,
    config: WeatherConfig,
    rng: fastrand::Rng,
}

impl WeatherSystem {
    /// Starts clear, with the first spell length drawn from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, WeatherConfig::default())
    }

    /// Starts clear with custom timing.
    #[must_use]
    pub fn with_config(seed: u64, config: WeatherConfig) -> Self {
        let mut system = Self {
            current_state: WeatherState::Clear,
            time_remaining: 0.0,
            config,
            rng: fastrand::Rng::with_seed(seed),
        };
        system.time_remaining = system.roll_duration();
        system
    }

    /// Current state.
    #[must_use]
    pub const fn current(&self) -> WeatherState {
        self.current_state
    }

    /// Wind multiplier for the current state.
    #[must_use]
    pub const fn intensity(&self) -> f32 {
        self.current_state.intensity()
    }

    /// Seconds left in the current spell.
    #[must_use]
    pub const fn time_remaining(&self) -> f32 {
        self.time_remaining
    }

    /// Forces a state and starts a fresh spell.
    pub fn set_weather(&mut self, state: WeatherState) {
        self.current_state = state;
        self.time_remaining = self.roll_duration();
    }

    /// Update the weather system.
    ///
    /// Returns `Some(new_state)` when a spell ended, even if the roll kept
    /// the same state.
    pub fn update(&mut self, dt: f32) -> Option<WeatherState> {
        self.time_remaining -= dt;
        if self.time_remaining > 0.0 {
            return None;
        }

        let next = self.current_state.next(self.rng.f32());
        if next != self.current_state {
            info!(
                "Weather changed: {} -> {}",
                self.current_state.display_name(),
                next.display_name()
            );
        }
        self.current_state = next;
        self.time_remaining = self.roll_duration();
        Some(next)
    }

    fn roll_duration(&mut self) -> f32 {
        let span = (self.config.max_duration - self.config.min_duration).max(0.0);
        self.config.min_duration + self.rng.f32() * span
    }
}
