// Forecast field
pub const BASE_WIND_SPEED: f64 = 3.0; // m/s floor before shear
pub const WIND_SPEED_VARIATION: f64 = 10.0; // m/s span added by the noise
pub const TIME_SCALE: f64 = 0.008; // noise units per simulated second
pub const ALTITUDE_SCALE: f64 = 0.0006; // noise units per metre
pub const SPEED_OCTAVES: u32 = 4;
pub const DIRECTION_OCTAVES: u32 = 3;
pub const DIRECTION_TIME_FACTOR: f64 = 0.9;
pub const DIRECTION_ALTITUDE_FACTOR: f64 = 0.5;
pub const SHEAR_REFERENCE_ALTITUDE: f64 = 5000.0; // m per +100% speed
pub const DEFAULT_MAX_WIND_SPEED: f64 = 25.0; // m/s
pub const MIN_CONFIGURED_WIND_CAP: f64 = 1.0; // caps at or below this are unset
pub const STRONG_WIND_FRACTION: f64 = 0.8;
pub const BREEZY_WIND_FRACTION: f64 = 0.45;
pub const SEED_RANGE: f64 = 10_000.0;

// Lateral drag
pub const DRAG_COEFFICIENT: f64 = 2.0;
pub const AREA_SCALE: f64 = 1.2;
pub const MAX_LATERAL_ACCEL: f64 = 15.0; // m/s^2
pub const MIN_DRAG_WIND_SPEED: f64 = 0.01; // m/s

// Headwind lift
pub const WING_AREA_PER_PART: f64 = 2.0; // m^2
pub const LIFT_COEFFICIENT: f64 = 0.45;
pub const MAX_HEADWIND_LIFT_ACCEL: f64 = 2.0; // m/s^2
pub const MIN_HEADWIND_DELTA_SQUARE: f64 = 1.0; // m^2/s^2
pub const LIFTING_SURFACE_MODULE: &str = "ModuleLiftingSurface";

// Vertical shear
pub const SHEAR_SAMPLE_ALTITUDE: f64 = 200.0; // m
pub const SHEAR_COEFFICIENT: f64 = 0.6;
pub const MAX_SHEAR_ACCEL: f64 = 4.0; // m/s^2
pub const SHEAR_TORQUE_SCALE: f64 = 0.45;
pub const MIN_SHEAR_WIND_SPEED: f64 = 2.0; // m/s
pub const MIN_SHEAR_DELTA: f64 = 0.25; // m/s
pub const SHEAR_JITTER: f64 = 0.25;

// Cadences (simulated seconds)
pub const WIND_UPDATE_INTERVAL: f64 = 0.5;
pub const TELEMETRY_INTERVAL: f64 = 0.2;
pub const FORECAST_HORIZONS_MIN: [u32; 3] = [5, 10, 15];

pub const DEFAULT_TIMESTEP: f64 = 1.0 / 50.0; // 50 Hz physics
