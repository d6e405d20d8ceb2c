use bevy::prelude::*;
use nalgebra::Vector3;
use rand::Rng;

use crate::components::{
    ActiveVehicle, Force, ForceCategory, Moment, ReferenceFrame, RigidBodyComponent, VehicleState,
};
use crate::resources::{BodyWindProfile, WindClock, WindConfig, WindField, WindForecastEngine, WindState};
use crate::utils::{
    WindError, WindRng, MAX_SHEAR_ACCEL, MIN_SHEAR_DELTA, MIN_SHEAR_WIND_SPEED,
    SHEAR_COEFFICIENT, SHEAR_JITTER, SHEAR_SAMPLE_ALTITUDE, SHEAR_TORQUE_SCALE,
};

/// Perturbation from the vertical wind gradient around the vehicle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShearEffect {
    /// World frame, along the going-to direction (m/s^2)
    pub acceleration: Vector3<f64>,
    /// World frame angular acceleration (rad/s^2)
    pub torque: Vector3<f64>,
}

/// Sample the field above the vehicle and turn the speed difference into a jittered
/// push plus a random-axis tumble.
///
/// Uses the unscaled forecast speeds, so the gradient ignores the body wind scale.
pub fn compute_wind_shear<F, R>(
    field: &F,
    wind: &WindState,
    vehicle: &VehicleState,
    time: f64,
    rng: &mut R,
) -> Result<Option<ShearEffect>, WindError>
where
    F: WindField + ?Sized,
    R: Rng,
{
    if vehicle.mass <= 0.0 || wind.speed < MIN_SHEAR_WIND_SPEED {
        return Ok(None);
    }

    let base = field.forecast(vehicle.altitude, time);
    let upper = field.forecast(vehicle.altitude + SHEAR_SAMPLE_ALTITUDE, time);
    let delta = upper.speed - base.speed;
    if delta.abs() < MIN_SHEAR_DELTA {
        return Ok(None);
    }

    let jitter = 1.0 + rng.gen_range(-SHEAR_JITTER..=SHEAR_JITTER);
    let accel = delta * SHEAR_COEFFICIENT * vehicle.size / vehicle.mass.max(1.0) * jitter;
    if !accel.is_finite() {
        return Err(WindError::NonFinite("wind shear"));
    }
    let accel = accel.clamp(-MAX_SHEAR_ACCEL, MAX_SHEAR_ACCEL);

    let axis = Vector3::new(
        rng.gen_range(-1.0..=1.0),
        rng.gen_range(-1.0..=1.0),
        rng.gen_range(-1.0..=1.0),
    )
    .try_normalize(f64::EPSILON)
    .unwrap_or_else(Vector3::zeros);

    Ok(Some(ShearEffect {
        acceleration: wind.direction * accel,
        torque: axis * (accel.abs() * SHEAR_TORQUE_SCALE),
    }))
}

pub fn wind_shear_system(
    config: Res<WindConfig>,
    profile: Res<BodyWindProfile>,
    engine: Res<WindForecastEngine>,
    wind: Res<WindState>,
    clock: Res<WindClock>,
    mut rng: ResMut<WindRng>,
    mut query: Query<(&VehicleState, &mut RigidBodyComponent), With<ActiveVehicle>>,
) {
    if !config.shear_active() {
        return;
    }

    for (vehicle, mut body) in query.iter_mut() {
        if !profile.applies_to(vehicle) {
            continue;
        }

        match compute_wind_shear(
            &*engine,
            &wind,
            vehicle,
            clock.universal_time(),
            &mut rng.0,
        ) {
            Ok(Some(effect)) => {
                body.add_force(Force::acceleration(
                    effect.acceleration,
                    ReferenceFrame::Inertial,
                    ForceCategory::WindShear,
                ));
                body.add_moment(Moment::acceleration(
                    effect.torque,
                    ReferenceFrame::Inertial,
                    ForceCategory::WindShear,
                ));
            }
            Ok(None) => {}
            Err(err) => warn!("Wind shear failed: {}", err),
        }
    }
}
