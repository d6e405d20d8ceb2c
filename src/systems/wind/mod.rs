mod telemetry;
mod update;

pub use telemetry::{build_telemetry_record, telemetry_system};
pub use update::{advance_wind_clock, update_wind_state, wind_update_system};
