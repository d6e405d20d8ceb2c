use bevy::prelude::*;
use std::fs;
use std::path::PathBuf;

use crate::resources::{
    load_body_overrides, BodyOverride, BodyWindProfile, TelemetryWriter, WindClock, WindConfig,
    WindForecastEngine, WindSeeds, WindState,
};
use crate::systems::{
    advance_wind_clock, force_accumulator_system, telemetry_system, wind_force_system,
    wind_shear_system, wind_update_system,
};
use crate::utils::{RngManager, WindRng, DEFAULT_TIMESTEP};

/// Wind simulation stages, run in order every fixed step
#[derive(Debug, Hash, PartialEq, Eq, Clone, SystemSet)]
pub enum WindSet {
    Clock,
    Forecast,
    Forces,
    Accumulate,
    Telemetry,
}

pub struct WindPlugin {
    pub config: Option<WindConfig>,
    pub config_path: Option<PathBuf>,
    pub body_overrides: Vec<BodyOverride>,
    pub overrides_path: Option<PathBuf>,
    /// Master seed; `None` draws a fresh one per session
    pub seed: Option<u64>,
    pub telemetry_path: Option<PathBuf>,
    pub timestep: f64,
    pub start_time: f64,
}

impl Default for WindPlugin {
    fn default() -> Self {
        Self {
            config: None,
            config_path: None,
            body_overrides: Vec::new(),
            overrides_path: None,
            seed: None,
            telemetry_path: None,
            timestep: DEFAULT_TIMESTEP,
            start_time: 0.0,
        }
    }
}

impl WindPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: WindConfig) -> Self {
        Self {
            config: Some(config),
            ..Default::default()
        }
    }

    /// YAML settings file; ignored when an explicit config is also given
    pub fn config_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn body_overrides(mut self, overrides: Vec<BodyOverride>) -> Self {
        self.body_overrides = overrides;
        self
    }

    /// YAML file of `bodies:` overrides, applied after the in-code ones
    pub fn overrides_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.overrides_path = Some(path.into());
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn telemetry<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.telemetry_path = Some(path.into());
        self
    }

    /// Write telemetry to the platform data directory, if there is one
    pub fn default_telemetry(mut self) -> Self {
        self.telemetry_path = TelemetryWriter::default_path();
        self
    }

    pub fn timestep(mut self, timestep: f64) -> Self {
        self.timestep = timestep;
        self
    }

    pub fn start_time(mut self, universal_time: f64) -> Self {
        self.start_time = universal_time;
        self
    }

    fn resolve_config(&self) -> WindConfig {
        match (&self.config, &self.config_path) {
            (Some(config), _) => config.clone().validated(),
            (None, Some(path)) => WindConfig::load_or_default(path),
            (None, None) => WindConfig::default(),
        }
    }

    fn resolve_profile(&self) -> BodyWindProfile {
        let mut overrides = self.body_overrides.clone();
        if let Some(path) = &self.overrides_path {
            match load_body_overrides(path) {
                Ok(loaded) => overrides.extend(loaded),
                Err(err) => warn!("Ignoring body overrides from {:?}: {}", path, err),
            }
        }
        BodyWindProfile::with_overrides(&overrides)
    }

    fn fixed_timestep(&self) -> f64 {
        if self.timestep.is_finite() && self.timestep > 0.0 {
            self.timestep
        } else {
            warn!(
                "Invalid timestep {}, using {:.4} s",
                self.timestep, DEFAULT_TIMESTEP
            );
            DEFAULT_TIMESTEP
        }
    }

    fn telemetry_writer(&self) -> Option<TelemetryWriter> {
        let path = self.telemetry_path.as_ref()?;
        if let Some(parent) = path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                debug!("Could not create telemetry directory {:?}: {}", parent, err);
            }
        }
        Some(TelemetryWriter::new(path.clone()))
    }
}

impl Plugin for WindPlugin {
    fn build(&self, app: &mut App) {
        let config = self.resolve_config();
        let profile = self.resolve_profile();

        let rng = self
            .seed
            .map(RngManager::new)
            .unwrap_or_else(RngManager::from_entropy);
        let seeds = WindSeeds::from_rng(&mut rng.get_rng("wind_seeds"));
        info!(
            "Wind field seeded from {} (time {:.1}, altitude {:.1}, direction {:.1}), {} bodies with wind",
            rng.master_seed(),
            seeds.time,
            seeds.altitude,
            seeds.direction,
            profile.len()
        );

        let engine = WindForecastEngine::new(seeds, config.max_wind_speed as f64);

        app.insert_resource(Time::<Fixed>::from_seconds(self.fixed_timestep()))
            .insert_resource(WindClock::starting_at(self.start_time))
            .insert_resource(WindState::calm())
            .insert_resource(WindRng::from_manager(&rng))
            .insert_resource(engine)
            .insert_resource(profile)
            .insert_resource(config);

        if let Some(writer) = self.telemetry_writer() {
            info!("Wind telemetry written to {:?}", writer.path());
            app.insert_resource(writer);
        }

        app.configure_sets(
            FixedUpdate,
            (
                WindSet::Clock,
                WindSet::Forecast,
                WindSet::Forces,
                WindSet::Accumulate,
                WindSet::Telemetry,
            )
                .chain(),
        );

        app.add_systems(
            FixedUpdate,
            (
                advance_wind_clock.in_set(WindSet::Clock),
                wind_update_system.in_set(WindSet::Forecast),
                (wind_force_system, wind_shear_system)
                    .chain()
                    .in_set(WindSet::Forces),
                force_accumulator_system.in_set(WindSet::Accumulate),
                telemetry_system.in_set(WindSet::Telemetry),
            ),
        );
    }
}
