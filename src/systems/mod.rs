pub mod aerodynamics;
pub mod physics;
pub mod wind;

pub use aerodynamics::{
    compute_wind_forces, compute_wind_shear, wind_force_system, wind_shear_system,
    HeadwindLiftSettings, ShearEffect, WindForces,
};
pub use physics::{calculate_net_accelerations, force_accumulator_system};
pub use wind::{
    advance_wind_clock, build_telemetry_record, telemetry_system, update_wind_state,
    wind_update_system,
};
