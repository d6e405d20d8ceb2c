use bevy::prelude::*;

use crate::components::{ActiveVehicle, VehicleState};
use crate::resources::{
    unix_timestamp, BodyWindProfile, ForecastPoint, TelemetryRecord, TelemetryWriter, WindClock,
    WindConfig, WindForecastEngine, WindState,
};
use crate::utils::FORECAST_HORIZONS_MIN;

/// Snapshot of the current wind and the outlook for the vehicle's altitude.
pub fn build_telemetry_record(
    config: &WindConfig,
    profile: &BodyWindProfile,
    engine: &WindForecastEngine,
    wind: &WindState,
    vehicle: Option<&VehicleState>,
    universal_time: f64,
    timestamp_unix: f64,
) -> TelemetryRecord {
    let body = vehicle.and_then(|v| v.body.as_deref());
    let vehicle = match vehicle {
        Some(vehicle) if config.wind_enabled && profile.applies_to(vehicle) => vehicle,
        _ => return TelemetryRecord::calm(body, timestamp_unix),
    };

    let scale = profile.scale_for(body.unwrap_or_default());
    let cap = engine.effective_cap();
    let forecasts = FORECAST_HORIZONS_MIN.map(|minutes| {
        let sample = engine.forecast_ahead(vehicle.altitude, universal_time, minutes as f64);
        ForecastPoint {
            minutes_ahead: minutes,
            speed: (sample.speed * scale).min(cap),
            direction: sample.heading,
        }
    });

    TelemetryRecord {
        speed: wind.speed,
        direction_deg: wind.heading,
        timestamp_unix,
        altitude: vehicle.altitude,
        body: body.unwrap_or("None").to_string(),
        forecasts,
    }
}

/// Rewrites the telemetry file on its own cadence, whether or not there is wind.
pub fn telemetry_system(
    writer: Option<Res<TelemetryWriter>>,
    config: Res<WindConfig>,
    profile: Res<BodyWindProfile>,
    engine: Res<WindForecastEngine>,
    wind: Res<WindState>,
    mut clock: ResMut<WindClock>,
    vehicles: Query<&VehicleState, With<ActiveVehicle>>,
) {
    let Some(writer) = writer else {
        return;
    };

    let delta = clock.delta();
    if !clock.telemetry.tick(delta) {
        return;
    }

    let record = build_telemetry_record(
        &config,
        &profile,
        &engine,
        &wind,
        vehicles.get_single().ok(),
        clock.universal_time(),
        unix_timestamp(),
    );
    if let Err(err) = writer.write(&record) {
        debug!("Telemetry write to {:?} failed: {}", writer.path(), err);
    }
}
