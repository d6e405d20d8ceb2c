use bevy::prelude::*;
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

/// Root rigid body of the vehicle. Forces are queued during a step and folded into net
/// accelerations by the accumulator.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct RigidBodyComponent {
    pub mass: f64,
    pub inertia: Matrix3<f64>,
    pub inertia_inv: Matrix3<f64>,
    /// Net linear acceleration from the last accumulation, world frame (m/s^2)
    pub net_acceleration: Vector3<f64>,
    /// Net angular acceleration from the last accumulation, world frame (rad/s^2)
    pub net_angular_acceleration: Vector3<f64>,
    pub forces: Vec<Force>,
    pub moments: Vec<Moment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Force {
    pub vector: Vector3<f64>,
    pub frame: ReferenceFrame,
    pub mode: ForceMode,
    pub category: ForceCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Moment {
    pub vector: Vector3<f64>,
    pub frame: ReferenceFrame,
    pub mode: ForceMode,
    pub category: ForceCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceFrame {
    Body,
    Inertial,
}

/// How a queued vector is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForceMode {
    /// Newtons (or N*m), divided by mass (or inertia)
    Force,
    /// Applied directly, independent of mass
    Acceleration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForceCategory {
    WindDrag,
    HeadwindLift,
    WindShear,
    Custom(String),
}

impl Force {
    pub fn acceleration(vector: Vector3<f64>, frame: ReferenceFrame, category: ForceCategory) -> Self {
        Self {
            vector,
            frame,
            mode: ForceMode::Acceleration,
            category,
        }
    }
}

impl Moment {
    pub fn acceleration(vector: Vector3<f64>, frame: ReferenceFrame, category: ForceCategory) -> Self {
        Self {
            vector,
            frame,
            mode: ForceMode::Acceleration,
            category,
        }
    }
}

impl RigidBodyComponent {
    pub fn new(mass: f64, inertia: Matrix3<f64>) -> Self {
        let inertia_inv = inertia.try_inverse().unwrap_or(Matrix3::identity());
        Self {
            mass,
            inertia,
            inertia_inv,
            net_acceleration: Vector3::zeros(),
            net_angular_acceleration: Vector3::zeros(),
            forces: Vec::new(),
            moments: Vec::new(),
        }
    }

    pub fn add_force(&mut self, force: Force) {
        self.forces.push(force);
    }

    pub fn add_moment(&mut self, moment: Moment) {
        self.moments.push(moment);
    }

}
