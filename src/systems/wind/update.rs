use bevy::prelude::*;

use crate::components::{ActiveVehicle, VehicleState};
use crate::resources::{BodyWindProfile, WindClock, WindConfig, WindForecastEngine, WindState};

pub fn advance_wind_clock(time: Res<Time<Fixed>>, mut clock: ResMut<WindClock>) {
    clock.advance(time.delta_secs_f64());
}

/// Resolve the wind for the active vehicle.
///
/// Returns `true` when a new sample was taken. The cadence only runs while the vehicle
/// is inside a windy atmosphere; otherwise the wind drops to calm and keeps its heading.
pub fn update_wind_state(
    config: &WindConfig,
    profile: &BodyWindProfile,
    engine: &WindForecastEngine,
    clock: &mut WindClock,
    wind: &mut WindState,
    vehicle: Option<&VehicleState>,
) -> bool {
    if !config.wind_enabled {
        wind.silence();
        return false;
    }

    let Some(vehicle) = vehicle.filter(|v| profile.applies_to(v)) else {
        wind.silence();
        return false;
    };

    let delta = clock.delta();
    if !clock.wind_update.tick(delta) {
        return false;
    }

    let body = vehicle.body.as_deref().unwrap_or_default();
    let sample = engine.forecast(vehicle.altitude, clock.universal_time());
    wind.refresh(&sample, profile.scale_for(body), engine.effective_cap());
    clock.record_wind_sample();
    true
}

pub fn wind_update_system(
    config: Res<WindConfig>,
    profile: Res<BodyWindProfile>,
    engine: Res<WindForecastEngine>,
    mut clock: ResMut<WindClock>,
    mut wind: ResMut<WindState>,
    vehicles: Query<&VehicleState, With<ActiveVehicle>>,
) {
    let vehicle = vehicles.get_single().ok();
    if update_wind_state(&config, &profile, &engine, &mut clock, &mut wind, vehicle) {
        debug!(
            "Wind {:.2} m/s from {:.1} deg at t={:.1}",
            wind.speed,
            wind.heading,
            clock.universal_time()
        );
    }
}
