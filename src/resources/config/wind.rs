use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::path::Path;

use crate::resources::wind::effective_cap;
use crate::utils::ConfigError;

const DEFAULT_MAX_WIND_SPEED: u32 = 25;
const MAX_WIND_SPEED_LIMIT: u32 = 100;
const DEFAULT_HEADWIND_LIFT_PERCENT: u32 = 150;
const HEADWIND_LIFT_PERCENT_LIMIT: u32 = 500;

/// User-facing wind settings, validated once and read-only afterwards.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindConfig {
    pub wind_enabled: bool,
    /// Speed cap in m/s, `[0, 100]`; values of 1 or less mean "unset"
    pub max_wind_speed: u32,
    pub headwind_lift_enabled: bool,
    /// Extra headwind lift in percent, `[0, 500]`
    pub headwind_lift_percent: u32,
    pub wind_shear_enabled: bool,
    /// Reserved, no effect
    pub jet_streams_enabled: bool,
    /// Reserved, no effect
    pub gusts_enabled: bool,
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            wind_enabled: true,
            max_wind_speed: DEFAULT_MAX_WIND_SPEED,
            headwind_lift_enabled: true,
            headwind_lift_percent: DEFAULT_HEADWIND_LIFT_PERCENT,
            wind_shear_enabled: true,
            jet_streams_enabled: true,
            gusts_enabled: true,
        }
    }
}

impl WindConfig {
    /// Speed cap actually enforced by the forecast (m/s)
    pub fn effective_max_wind_speed(&self) -> f64 {
        effective_cap(self.max_wind_speed as f64)
    }

    pub fn lift_multiplier(&self) -> f64 {
        self.headwind_lift_percent as f64 / 100.0
    }

    pub fn shear_active(&self) -> bool {
        self.wind_enabled && self.wind_shear_enabled
    }

    /// Replace out-of-range values with their defaults.
    pub fn validated(mut self) -> Self {
        if self.max_wind_speed > MAX_WIND_SPEED_LIMIT {
            warn!(
                "max_wind_speed {} outside [0, {}], using {}",
                self.max_wind_speed, MAX_WIND_SPEED_LIMIT, DEFAULT_MAX_WIND_SPEED
            );
            self.max_wind_speed = DEFAULT_MAX_WIND_SPEED;
        }
        if self.headwind_lift_percent > HEADWIND_LIFT_PERCENT_LIMIT {
            warn!(
                "headwind_lift_percent {} outside [0, {}], using {}",
                self.headwind_lift_percent,
                HEADWIND_LIFT_PERCENT_LIMIT,
                DEFAULT_HEADWIND_LIFT_PERCENT
            );
            self.headwind_lift_percent = DEFAULT_HEADWIND_LIFT_PERCENT;
        }
        self
    }

    /// Parse YAML leniently: every missing or invalid field keeps its default.
    pub fn from_yaml_str(source: &str) -> Self {
        let mapping = match serde_yaml::from_str::<Value>(source) {
            Ok(Value::Mapping(mapping)) => mapping,
            Ok(Value::Null) => Mapping::new(),
            Ok(other) => {
                warn!("Wind config is not a mapping ({:?}), using defaults", other);
                Mapping::new()
            }
            Err(err) => {
                warn!("Wind config unreadable, using defaults: {}", err);
                Mapping::new()
            }
        };

        let defaults = Self::default();
        Self {
            wind_enabled: read_bool(&mapping, "wind_enabled", defaults.wind_enabled),
            max_wind_speed: read_int(
                &mapping,
                "max_wind_speed",
                MAX_WIND_SPEED_LIMIT,
                defaults.max_wind_speed,
            ),
            headwind_lift_enabled: read_bool(
                &mapping,
                "headwind_lift_enabled",
                defaults.headwind_lift_enabled,
            ),
            headwind_lift_percent: read_int(
                &mapping,
                "headwind_lift_percent",
                HEADWIND_LIFT_PERCENT_LIMIT,
                defaults.headwind_lift_percent,
            ),
            wind_shear_enabled: read_bool(
                &mapping,
                "wind_shear_enabled",
                defaults.wind_shear_enabled,
            ),
            jet_streams_enabled: read_bool(
                &mapping,
                "jet_streams_enabled",
                defaults.jet_streams_enabled,
            ),
            gusts_enabled: read_bool(&mapping, "gusts_enabled", defaults.gusts_enabled),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Ok(Self::from_yaml_str(&source))
    }

    /// Load settings, falling back to defaults when the file cannot be read.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::from_file(&path) {
            Ok(config) => config,
            Err(err) => {
                warn!(
                    "Wind config {} not loaded, using defaults: {}",
                    path.as_ref().display(),
                    err
                );
                Self::default()
            }
        }
    }
}

fn read_bool(mapping: &Mapping, key: &str, default: bool) -> bool {
    match mapping.get(key) {
        None => default,
        Some(Value::Bool(value)) => *value,
        Some(other) => {
            warn!("{} expects a boolean, got {:?}; using {}", key, other, default);
            default
        }
    }
}

fn read_int(mapping: &Mapping, key: &str, limit: u32, default: u32) -> u32 {
    let Some(value) = mapping.get(key) else {
        return default;
    };
    match value.as_u64() {
        Some(parsed) if parsed <= limit as u64 => parsed as u32,
        _ => {
            warn!(
                "{} expects an integer in [0, {}], got {:?}; using {}",
                key, limit, value, default
            );
            default
        }
    }
}
