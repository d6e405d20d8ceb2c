use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use super::forecast::WindSample;
use crate::utils::heading_to_direction;

/// Wind currently acting on the active vehicle.
///
/// Refreshed on the forecast cadence and read by the force models every physics step,
/// so between refreshes the forces see the last resolved value.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindState {
    /// Body-scaled, capped wind speed (m/s)
    pub speed: f64,
    /// Heading the wind blows from (degrees)
    pub heading: f64,
    /// Unit vector the wind blows towards, world frame
    pub direction: Vector3<f64>,
}

impl Default for WindState {
    fn default() -> Self {
        Self::calm()
    }
}

impl WindState {
    pub fn calm() -> Self {
        Self {
            speed: 0.0,
            heading: 0.0,
            direction: Vector3::zeros(),
        }
    }

    /// Resolve a forecast sample for a body with the given wind scale.
    pub fn from_sample(sample: &WindSample, body_scale: f64, cap: f64) -> Self {
        if body_scale <= 0.0 {
            return Self::calm();
        }
        Self {
            speed: (sample.speed * body_scale).min(cap),
            heading: sample.heading,
            direction: heading_to_direction(sample.heading),
        }
    }

    pub fn refresh(&mut self, sample: &WindSample, body_scale: f64, cap: f64) {
        *self = Self::from_sample(sample, body_scale, cap);
    }

    /// Drop the speed but keep the last heading, as when the vehicle leaves the wind.
    pub fn silence(&mut self) {
        self.speed = 0.0;
    }

    /// Wind velocity in the world frame (m/s)
    pub fn velocity(&self) -> Vector3<f64> {
        self.direction * self.speed
    }
}
