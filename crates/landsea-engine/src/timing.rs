//! Fixed-timestep pacing for the realtime runner.

use std::time::{Duration, Instant};

/// Most catch-up ticks run for one frame.
const MAX_TICKS_PER_FRAME: u32 = 10;

/// Converts wall-clock frame time into a count of fixed simulation ticks.
#[derive(Debug)]
pub struct FixedStep {
    fixed_dt: f32,
    /// Longest frame delta accepted, in seconds
    max_dt: f32,
    accumulator: f32,
    last_frame: Instant,
}

impl FixedStep {
    /// Creates a stepper ticking at `tick_rate` Hz.
    #[must_use]
    pub fn new(tick_rate: u32) -> Self {
        Self {
            fixed_dt: 1.0 / tick_rate.max(1) as f32,
            max_dt: 0.25,
            accumulator: 0.0,
            last_frame: Instant::now(),
        }
    }

    /// Tick length in seconds.
    #[must_use]
    pub const fn fixed_dt(&self) -> f32 {
        self.fixed_dt
    }

    /// Seconds since the previous call, clamped.
    pub fn delta_time(&mut self) -> f32 {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        dt.min(self.max_dt)
    }

    /// Adds frame time and returns how many fixed ticks are due.
    pub fn accumulate(&mut self, dt: f32) -> u32 {
        self.accumulator += dt;
        let mut count = 0;
        while self.accumulator >= self.fixed_dt && count < MAX_TICKS_PER_FRAME {
            self.accumulator -= self.fixed_dt;
            count += 1;
        }

        // Still behind: drop the backlog.
        if self.accumulator > self.fixed_dt * 2.0 {
            self.accumulator = 0.0;
        }
        count
    }

    /// Sleeps until one tick length has passed since the last frame.
    pub fn sleep_remainder(&self) {
        let budget = Duration::from_secs_f32(self.fixed_dt);
        let elapsed = self.last_frame.elapsed();
        if elapsed < budget {
            std::thread::sleep(budget - elapsed);
        }
    }
}
