use bevy::prelude::*;
use nalgebra::Vector3;

use crate::components::{
    lifting_area, ActiveVehicle, Force, ForceCategory, ReferenceFrame, RigidBodyComponent,
    VehicleParts, VehicleState,
};
use crate::resources::{BodyWindProfile, WindConfig, WindState};
use crate::utils::{
    dynamic_pressure, WindError, DRAG_COEFFICIENT, LIFT_COEFFICIENT, MAX_HEADWIND_LIFT_ACCEL,
    MAX_LATERAL_ACCEL, MIN_DRAG_WIND_SPEED, MIN_HEADWIND_DELTA_SQUARE,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadwindLiftSettings {
    pub enabled: bool,
    pub multiplier: f64,
}

impl HeadwindLiftSettings {
    pub fn from_config(config: &WindConfig) -> Self {
        Self {
            enabled: config.headwind_lift_enabled,
            multiplier: config.lift_multiplier(),
        }
    }

    /// Non-positive multipliers count as 1
    pub fn effective_multiplier(&self) -> f64 {
        if self.multiplier <= 0.0 {
            1.0
        } else {
            self.multiplier
        }
    }
}

/// Accelerations produced by the wind in one physics step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WindForces {
    /// Lateral drag, world frame (m/s^2)
    pub lateral: Option<Vector3<f64>>,
    /// Headwind lift along body up (m/s^2)
    pub lift: Option<f64>,
}

/// Sideways push of the wind on the whole vehicle, world frame (m/s^2).
pub fn lateral_drag_acceleration(
    wind: &WindState,
    vehicle: &VehicleState,
) -> Result<Option<Vector3<f64>>, WindError> {
    if wind.speed <= MIN_DRAG_WIND_SPEED {
        return Ok(None);
    }

    let q = dynamic_pressure(vehicle.air_density, wind.speed * wind.speed);
    let force = q * DRAG_COEFFICIENT * vehicle.reference_area();
    let accel = force / vehicle.mass;
    if !accel.is_finite() {
        return Err(WindError::NonFinite("lateral drag"));
    }

    Ok(Some(wind.direction * accel.min(MAX_LATERAL_ACCEL)))
}

/// Extra lift from the dynamic pressure a headwind adds over still air (m/s^2).
pub fn headwind_lift_acceleration(
    wind: &WindState,
    vehicle: &VehicleState,
    lifting_area: f64,
    multiplier: f64,
) -> Result<Option<f64>, WindError> {
    let air_velocity = vehicle.surface_velocity - wind.velocity();
    let delta_square =
        air_velocity.norm_squared() - vehicle.surface_speed * vehicle.surface_speed;
    if delta_square <= MIN_HEADWIND_DELTA_SQUARE {
        return Ok(None);
    }

    let delta_q = dynamic_pressure(vehicle.air_density, delta_square);
    let force = delta_q * LIFT_COEFFICIENT * lifting_area * multiplier;
    let accel = force / vehicle.mass;
    if !accel.is_finite() {
        return Err(WindError::NonFinite("headwind lift"));
    }

    Ok(Some(accel.min(MAX_HEADWIND_LIFT_ACCEL)))
}

/// Wind accelerations for a vehicle already known to be inside a windy atmosphere.
pub fn compute_wind_forces(
    wind: &WindState,
    vehicle: &VehicleState,
    parts: Option<&VehicleParts>,
    lift: HeadwindLiftSettings,
) -> Result<WindForces, WindError> {
    if vehicle.air_density <= 0.0 || vehicle.mass <= 0.0 {
        return Ok(WindForces::default());
    }

    let lateral = lateral_drag_acceleration(wind, vehicle)?;

    let lift = if lift.enabled {
        let area = lifting_area(parts.map(VehicleParts::as_slice), vehicle.reference_area());
        headwind_lift_acceleration(wind, vehicle, area, lift.effective_multiplier())?
    } else {
        None
    };

    Ok(WindForces { lateral, lift })
}

pub fn wind_force_system(
    config: Res<WindConfig>,
    profile: Res<BodyWindProfile>,
    wind: Res<WindState>,
    mut query: Query<
        (&VehicleState, Option<&VehicleParts>, &mut RigidBodyComponent),
        With<ActiveVehicle>,
    >,
) {
    if !config.wind_enabled {
        return;
    }

    let lift = HeadwindLiftSettings::from_config(&config);
    for (vehicle, parts, mut body) in query.iter_mut() {
        if !profile.applies_to(vehicle) {
            continue;
        }

        let forces = match compute_wind_forces(&wind, vehicle, parts, lift) {
            Ok(forces) => forces,
            Err(err) => {
                warn!("Skipping wind forces: {}", err);
                continue;
            }
        };

        if let Some(lateral) = forces.lateral {
            body.add_force(Force::acceleration(
                lateral,
                ReferenceFrame::Inertial,
                ForceCategory::WindDrag,
            ));
        }
        if let Some(lift) = forces.lift {
            body.add_force(Force::acceleration(
                Vector3::z() * lift,
                ReferenceFrame::Body,
                ForceCategory::HeadwindLift,
            ));
        }
    }
}
