pub mod config;
mod telemetry;
mod time;
pub mod wind;

pub use config::{load_body_overrides, parse_body_overrides, BodyOverride, WindConfig};
pub use telemetry::{
    unix_timestamp, ForecastPoint, TelemetryRecord, TelemetryWriter, TELEMETRY_FILE_NAME,
};
pub use time::{Cadence, WindClock};
pub use wind::{
    effective_cap, BodyWindProfile, NoiseField, WindClassification, WindField,
    WindForecastEngine, WindSample, WindSeeds, WindState, DEFAULT_BODY_SCALES,
};
