use bevy::prelude::*;

use crate::utils::{TELEMETRY_INTERVAL, WIND_UPDATE_INTERVAL};

/// Float slack when comparing summed step sizes against an interval (s)
const CADENCE_TOLERANCE: f64 = 1e-6;

/// Accumulating timer that fires once its interval has elapsed.
///
/// Overshoot carries into the next period, so the firing rate does not drift with the step size.
#[derive(Debug, Clone, PartialEq)]
pub struct Cadence {
    interval: f64,
    accumulated: f64,
}

impl Cadence {
    pub fn new(interval: f64) -> Self {
        Self {
            interval,
            accumulated: 0.0,
        }
    }

    pub fn tick(&mut self, delta: f64) -> bool {
        self.accumulated += delta;
        if self.accumulated < self.interval - CADENCE_TOLERANCE {
            return false;
        }
        // Whole periods skipped by a long step are dropped
        self.accumulated = ((self.accumulated - self.interval) % self.interval).max(0.0);
        true
    }
}

/// Simulated time as seen by the wind model.
#[derive(Resource, Debug, Clone)]
pub struct WindClock {
    universal_time: f64,
    delta: f64,
    step_count: u64,
    wind_samples: u64,
    pub wind_update: Cadence,
    pub telemetry: Cadence,
}

impl Default for WindClock {
    fn default() -> Self {
        Self::starting_at(0.0)
    }
}

impl WindClock {
    pub fn starting_at(universal_time: f64) -> Self {
        Self {
            universal_time,
            delta: 0.0,
            step_count: 0,
            wind_samples: 0,
            wind_update: Cadence::new(WIND_UPDATE_INTERVAL),
            telemetry: Cadence::new(TELEMETRY_INTERVAL),
        }
    }

    pub fn advance(&mut self, delta: f64) {
        let delta = delta.max(0.0);
        self.delta = delta;
        self.universal_time += delta;
        self.step_count += 1;
    }

    pub fn universal_time(&self) -> f64 {
        self.universal_time
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn record_wind_sample(&mut self) {
        self.wind_samples += 1;
    }

    /// Number of times the wind has been resampled this session
    pub fn wind_samples(&self) -> u64 {
        self.wind_samples
    }
}
