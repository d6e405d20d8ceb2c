use bevy::prelude::*;
use nalgebra::{UnitQuaternion, Vector3};

use crate::components::{Force, ForceMode, Moment, ReferenceFrame, RigidBodyComponent, VehicleState};

fn to_inertial(vector: Vector3<f64>, frame: ReferenceFrame, attitude: &UnitQuaternion<f64>) -> Vector3<f64> {
    match frame {
        ReferenceFrame::Body => attitude * vector,
        ReferenceFrame::Inertial => vector,
    }
}

/// Fold queued forces and moments into world-frame accelerations.
///
/// Returns `(linear, angular)`. Force-mode entries on a massless body are dropped.
pub fn calculate_net_accelerations(
    body: &RigidBodyComponent,
    forces: &[Force],
    moments: &[Moment],
    attitude: &UnitQuaternion<f64>,
) -> (Vector3<f64>, Vector3<f64>) {
    let mut linear = Vector3::zeros();
    for force in forces {
        let vector = to_inertial(force.vector, force.frame, attitude);
        match force.mode {
            ForceMode::Acceleration => linear += vector,
            ForceMode::Force if body.mass > 0.0 => linear += vector / body.mass,
            ForceMode::Force => {}
        }
    }

    let mut angular = Vector3::zeros();
    for moment in moments {
        let vector = to_inertial(moment.vector, moment.frame, attitude);
        match moment.mode {
            ForceMode::Acceleration => angular += vector,
            ForceMode::Force => angular += body.inertia_inv * vector,
        }
    }

    (linear, angular)
}

/// Drains each rigid body's queue once per step.
pub fn force_accumulator_system(mut query: Query<(&VehicleState, &mut RigidBodyComponent)>) {
    for (vehicle, mut body) in query.iter_mut() {
        let forces = std::mem::take(&mut body.forces);
        let moments = std::mem::take(&mut body.moments);

        let (linear, angular) =
            calculate_net_accelerations(&body, &forces, &moments, &vehicle.attitude);
        body.net_acceleration = linear;
        body.net_angular_acceleration = angular;
    }
}
