use bevy::prelude::*;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::{TelemetryError, FORECAST_HORIZONS_MIN};

pub const TELEMETRY_FILE_NAME: &str = "WindyData.txt";

/// Wind outlook for one forecast horizon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub minutes_ahead: u32,
    pub speed: f64,
    pub direction: f64,
}

impl ForecastPoint {
    pub fn calm(minutes_ahead: u32) -> Self {
        Self {
            minutes_ahead,
            speed: 0.0,
            direction: 0.0,
        }
    }
}

/// One telemetry snapshot, serialised as a flat `key=value` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    pub speed: f64,
    pub direction_deg: f64,
    pub timestamp_unix: f64,
    pub altitude: f64,
    pub body: String,
    pub forecasts: [ForecastPoint; 3],
}

impl TelemetryRecord {
    /// All-zero record for a vehicle that currently has no wind
    pub fn calm(body: Option<&str>, timestamp_unix: f64) -> Self {
        Self {
            speed: 0.0,
            direction_deg: 0.0,
            timestamp_unix,
            altitude: 0.0,
            body: body.unwrap_or("None").to_string(),
            forecasts: FORECAST_HORIZONS_MIN.map(ForecastPoint::calm),
        }
    }

    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Ordered key/value pairs exactly as written to the sink
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("speed".to_string(), format!("{:.2}", unsigned_zero(self.speed))),
            (
                "direction_deg".to_string(),
                format!("{:.1}", unsigned_zero(self.direction_deg)),
            ),
            (
                "timestamp_unix".to_string(),
                format!("{:.3}", unsigned_zero(self.timestamp_unix)),
            ),
            (
                "altitude".to_string(),
                format!("{:.0}", unsigned_zero(self.altitude)),
            ),
            ("body".to_string(), self.body.clone()),
        ];
        for point in &self.forecasts {
            pairs.push((
                format!("forecast_{}min_speed", point.minutes_ahead),
                format!("{:.2}", unsigned_zero(point.speed)),
            ));
            pairs.push((
                format!("forecast_{}min_dir", point.minutes_ahead),
                format!("{:.1}", unsigned_zero(point.direction)),
            ));
        }
        pairs
    }

    /// Read a block produced by [`TelemetryRecord::to_text`].
    pub fn parse(text: &str) -> Result<Self, TelemetryError> {
        let values: HashMap<String, String> = text
            .lines()
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| (key.trim().to_lowercase(), value.trim().to_string()))
            .collect();

        let number = |key: &str| -> Result<f64, TelemetryError> {
            let raw = values
                .get(key)
                .ok_or_else(|| TelemetryError::MissingKey(key.to_string()))?;
            raw.parse::<f64>()
                .map_err(|_| TelemetryError::InvalidValue {
                    key: key.to_string(),
                    value: raw.clone(),
                })
        };

        let mut forecasts = FORECAST_HORIZONS_MIN.map(ForecastPoint::calm);
        for point in forecasts.iter_mut() {
            point.speed = number(&format!("forecast_{}min_speed", point.minutes_ahead))?;
            point.direction = number(&format!("forecast_{}min_dir", point.minutes_ahead))?;
        }

        Ok(Self {
            speed: number("speed")?,
            direction_deg: number("direction_deg")?,
            timestamp_unix: number("timestamp_unix")?,
            altitude: number("altitude")?,
            body: values
                .get("body")
                .cloned()
                .ok_or_else(|| TelemetryError::MissingKey("body".to_string()))?,
            forecasts,
        })
    }
}

impl fmt::Display for TelemetryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.to_pairs() {
            writeln!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}

// "-0.00" would confuse readers of the sink
fn unsigned_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

/// Current UTC time as fractional unix seconds
pub fn unix_timestamp() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}

/// Best-effort sink that rewrites the telemetry file wholesale.
#[derive(Resource, Debug, Clone)]
pub struct TelemetryWriter {
    path: PathBuf,
}

impl TelemetryWriter {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// `<local data dir>/windy/WindyData.txt`, when the platform has one
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join("windy").join(TELEMETRY_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, record: &TelemetryRecord) -> Result<(), TelemetryError> {
        fs::write(&self.path, record.to_text())?;
        Ok(())
    }
}
