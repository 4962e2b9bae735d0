//! Day/night clock.
//!
//! A full day passes in ten real minutes. Light is full between 06:00 and
//! 18:00, dim between 20:00 and 04:00, and ramps linearly at dusk and dawn.

use serde::{Deserialize, Serialize};

/// Game hours advanced per real second.
pub const HOURS_PER_SECOND: f32 = 0.04;

/// Hour of day the clock starts at.
const START_HOUR: f32 = 8.0;

const DAY_LIGHT: f32 = 1.0;
const NIGHT_LIGHT: f32 = 0.2;
const DAWN_START: f32 = 4.0;
const DAY_START: f32 = 6.0;
const DUSK_START: f32 = 18.0;
const NIGHT_START: f32 = 20.0;

/// Tracks the day count and hour of day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayClock {
    day: u32,
    /// Fractional hour in `[0, 24)`
    hour: f32,
}

impl Default for DayClock {
    fn default() -> Self {
        Self::new()
    }
}

impl DayClock {
    /// Day 1, 08:00.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            day: 1,
            hour: START_HOUR,
        }
    }

    /// A clock set to a specific day and hour.
    #[must_use]
    pub fn at(day: u32, hour: f32) -> Self {
        Self {
            day,
            hour: hour.rem_euclid(24.0),
        }
    }

    /// Advances the clock by `dt` real seconds.
    pub fn update(&mut self, dt: f32) {
        self.hour += dt * HOURS_PER_SECOND;
        while self.hour >= 24.0 {
            self.hour -= 24.0;
            self.day += 1;
        }
    }

    /// Current day, starting at 1.
    #[must_use]
    pub const fn day(&self) -> u32 {
        self.day
    }

    /// Fractional hour of day.
    #[must_use]
    pub const fn hour(&self) -> f32 {
        self.hour
    }

    /// Ambient light in `[0.2, 1.0]`.
    #[must_use]
    pub fn ambient_light(&self) -> f32 {
        let h = self.hour;
        if (DAY_START..DUSK_START).contains(&h) {
            DAY_LIGHT
        } else if (DUSK_START..NIGHT_START).contains(&h) {
            let t = (h - DUSK_START) / (NIGHT_START - DUSK_START);
            DAY_LIGHT + (NIGHT_LIGHT - DAY_LIGHT) * t
        } else if (DAWN_START..DAY_START).contains(&h) {
            let t = (h - DAWN_START) / (DAY_START - DAWN_START);
            NIGHT_LIGHT + (DAY_LIGHT - NIGHT_LIGHT) * t
        } else {
            NIGHT_LIGHT
        }
    }

    /// Whether it is dark enough to count as night.
    #[must_use]
    pub fn is_night(&self) -> bool {
        self.ambient_light() < 0.5
    }

    /// `Day N - HH:MM`.
    #[must_use]
    pub fn format(&self) -> String {
        let hours = self.hour as u32;
        let minutes = ((self.hour - hours as f32) * 60.0) as u32;
        format!("Day {} - {:02}:{:02}", self.day, hours, minutes.min(59))
    }
}
