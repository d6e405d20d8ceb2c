use bevy::prelude::*;
use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use super::parts::PartInfo;
use crate::utils::{reference_area, AREA_SCALE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FlightSituation {
    Prelaunch,
    Landed,
    Splashed,
    #[default]
    Flying,
    SubOrbital,
    Orbiting,
    Escaping,
}

/// Marks the vehicle the wind model acts on
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ActiveVehicle;

/// Snapshot of the vehicle supplied by the host every physics step.
///
/// World vectors are East-North-Up; the body "up" axis is body +z.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    /// Celestial body the vehicle is flying around, if any
    pub body: Option<String>,
    /// Top of that body's atmosphere (m)
    pub atmosphere_depth: f64,
    pub situation: FlightSituation,
    /// Altitude above sea level (m)
    pub altitude: f64,
    /// Rotation from body to world frame
    pub attitude: UnitQuaternion<f64>,
    /// Total mass (kg)
    pub mass: f64,
    /// Magnitude of the bounding-box size (m)
    pub size: f64,
    /// Local air density (kg/m^3)
    pub air_density: f64,
    /// Velocity relative to the rotating surface, world frame (m/s)
    pub surface_velocity: Vector3<f64>,
    /// Surface speed as reported by the host (m/s)
    pub surface_speed: f64,
}

impl Default for VehicleState {
    fn default() -> Self {
        Self {
            body: None,
            atmosphere_depth: 0.0,
            situation: FlightSituation::default(),
            altitude: 0.0,
            attitude: UnitQuaternion::identity(),
            mass: 0.0,
            size: 0.0,
            air_density: 0.0,
            surface_velocity: Vector3::zeros(),
            surface_speed: 0.0,
        }
    }
}

impl VehicleState {
    /// Above the atmosphere, on an orbit or escape path, or nowhere at all
    pub fn is_in_space(&self) -> bool {
        if self.body.is_none() || self.altitude >= self.atmosphere_depth {
            return true;
        }
        matches!(
            self.situation,
            FlightSituation::Orbiting | FlightSituation::Escaping
        )
    }

    /// Bounding-size area heuristic (m^2)
    pub fn reference_area(&self) -> f64 {
        reference_area(self.size, AREA_SCALE)
    }
}

/// Part descriptors of the vehicle, used to estimate lifting area
#[derive(Component, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleParts(pub Vec<PartInfo>);

impl VehicleParts {
    pub fn as_slice(&self) -> &[PartInfo] {
        &self.0
    }
}
