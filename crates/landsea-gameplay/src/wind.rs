//! Prevailing wind with slow drift and gusts.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::boat::rotate_deg;

/// Anything that can report the wind at the current tick.
pub trait WindSource {
    /// Wind vector in pixels per second.
    fn current_wind(&self) -> Vec2;
}

/// Slow swing of the prevailing direction, in degrees.
const DRIFT_AMPLITUDE: f32 = 30.0;
const DRIFT_FREQUENCY: f32 = 0.05;
/// Short gusts layered on the drift, in degrees.
const GUST_AMPLITUDE: f32 = 5.0;
const GUST_FREQUENCY: f32 = 0.6;

/// Wind that oscillates around a base direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wind {
    base_speed: f32,
    base_angle: f32,
    intensity: f32,
    elapsed: f32,
    current: Vec2,
}

impl Default for Wind {
    fn default() -> Self {
        Self::new(100.0, 0.0)
    }
}

impl Wind {
    /// Creates a wind of `base_speed` blowing toward `base_angle` degrees
    /// (0 is east).
    #[must_use]
    pub fn new(base_speed: f32, base_angle: f32) -> Self {
        let mut wind = Self {
            base_speed,
            base_angle,
            intensity: 1.0,
            elapsed: 0.0,
            current: Vec2::ZERO,
        };
        wind.recompute();
        wind
    }

    /// Advances time and recomputes the vector.
    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt;
        self.recompute();
    }

    /// Scales the wind speed, typically from the weather.
    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity.max(0.0);
        self.recompute();
    }

    /// Current intensity multiplier.
    #[must_use]
    pub const fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Current direction in degrees.
    #[must_use]
    pub fn angle(&self) -> f32 {
        self.base_angle
            + DRIFT_AMPLITUDE * (self.elapsed * DRIFT_FREQUENCY).sin()
            + GUST_AMPLITUDE * (self.elapsed * GUST_FREQUENCY).sin()
    }

    /// Current speed.
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.base_speed * self.intensity
    }

    fn recompute(&mut self) {
        self.current = rotate_deg(Vec2::X, self.angle()) * self.speed();
    }
}

impl WindSource for Wind {
    fn current_wind(&self) -> Vec2 {
        self.current
    }
}
