use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::noise::{NoiseField, WindSeeds};
use crate::utils::{
    wrap_degrees, ALTITUDE_SCALE, BASE_WIND_SPEED, BREEZY_WIND_FRACTION, DEFAULT_MAX_WIND_SPEED,
    DIRECTION_ALTITUDE_FACTOR, DIRECTION_OCTAVES, DIRECTION_TIME_FACTOR, MIN_CONFIGURED_WIND_CAP,
    SHEAR_REFERENCE_ALTITUDE, SPEED_OCTAVES, STRONG_WIND_FRACTION, TIME_SCALE,
    WIND_SPEED_VARIATION,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindClassification {
    Stable,
    Breezy,
    Strong,
}

impl WindClassification {
    pub fn from_speed(speed: f64, cap: f64) -> Self {
        if speed > cap * STRONG_WIND_FRACTION {
            WindClassification::Strong
        } else if speed > cap * BREEZY_WIND_FRACTION {
            WindClassification::Breezy
        } else {
            WindClassification::Stable
        }
    }
}

impl fmt::Display for WindClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WindClassification::Stable => "Stable",
            WindClassification::Breezy => "Breezy",
            WindClassification::Strong => "Strong",
        };
        f.write_str(label)
    }
}

/// Wind at one altitude and instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindSample {
    /// Wind speed (m/s), within `[0, cap]`.
    pub speed: f64,
    /// Compass heading the wind blows from (degrees), within `[0, 360)`.
    pub heading: f64,
    /// Altitude the sample was taken at (m).
    pub altitude: f64,
    pub classification: WindClassification,
}

/// Anything that can report the wind at an altitude and time.
pub trait WindField {
    fn forecast(&self, altitude: f64, time: f64) -> WindSample;
}

/// Resolve the configured speed cap; anything at or below 1 m/s counts as unset.
pub fn effective_cap(max_wind_speed: f64) -> f64 {
    if max_wind_speed > MIN_CONFIGURED_WIND_CAP {
        max_wind_speed
    } else {
        DEFAULT_MAX_WIND_SPEED
    }
}

/// Procedural wind over altitude and time.
///
/// Every query is a pure function of its inputs, the speed cap and the session seeds.
#[derive(Resource, Debug, Clone)]
pub struct WindForecastEngine {
    noise: NoiseField,
    max_wind_speed: f64,
}

impl WindForecastEngine {
    pub fn new(seeds: WindSeeds, max_wind_speed: f64) -> Self {
        Self {
            noise: NoiseField::new(seeds),
            max_wind_speed,
        }
    }

    pub fn seeds(&self) -> WindSeeds {
        self.noise.seeds()
    }

    pub fn effective_cap(&self) -> f64 {
        effective_cap(self.max_wind_speed)
    }

    pub fn forecast(&self, altitude: f64, time: f64) -> WindSample {
        let cap = self.effective_cap();
        let seeds = self.noise.seeds();

        let speed_noise = self.noise.sample(
            seeds.time + time * TIME_SCALE,
            seeds.altitude + altitude * ALTITUDE_SCALE,
            SPEED_OCTAVES,
        );
        let raw_speed = BASE_WIND_SPEED + speed_noise * WIND_SPEED_VARIATION;

        let shear_multiplier = 1.0 + altitude / SHEAR_REFERENCE_ALTITUDE;
        let speed = raw_speed * shear_multiplier;
        let speed = if speed.is_finite() {
            speed.clamp(0.0, cap)
        } else {
            0.0
        };

        let direction_noise = self.noise.sample(
            seeds.direction + time * (TIME_SCALE * DIRECTION_TIME_FACTOR),
            seeds.altitude + altitude * (ALTITUDE_SCALE * DIRECTION_ALTITUDE_FACTOR),
            DIRECTION_OCTAVES,
        );
        let heading = wrap_degrees(direction_noise * 360.0);

        WindSample {
            speed,
            heading,
            altitude,
            classification: WindClassification::from_speed(speed, cap),
        }
    }

    pub fn forecast_ahead(&self, altitude: f64, time: f64, minutes_ahead: f64) -> WindSample {
        self.forecast(altitude, time + minutes_ahead * 60.0)
    }
}

impl WindField for WindForecastEngine {
    fn forecast(&self, altitude: f64, time: f64) -> WindSample {
        WindForecastEngine::forecast(self, altitude, time)
    }
}
