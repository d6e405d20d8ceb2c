use bevy::prelude::*;
use nalgebra::{Matrix3, Vector3};
use std::path::PathBuf;

use windy::{
    components::{ActiveVehicle, PartInfo, RigidBodyComponent, VehicleParts, VehicleState},
    plugins::WindPlugin,
    resources::{BodyOverride, WindConfig},
};

pub const TEST_SEED: u64 = 7;

// Builder for creating a test application with customizable configuration
pub struct TestAppBuilder {
    config: WindConfig,
    body_overrides: Vec<BodyOverride>,
    seed: u64,
    telemetry_path: Option<PathBuf>,
    time_step: f64,
    start_time: f64,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self {
            config: WindConfig::default(),
            body_overrides: Vec::new(),
            seed: TEST_SEED,
            telemetry_path: None,
            time_step: 1.0 / 50.0,
            start_time: 0.0,
        }
    }
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: WindConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_override(mut self, name: &str, scale: &str) -> Self {
        self.body_overrides.push(BodyOverride::new(name, Some(scale)));
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_telemetry<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.telemetry_path = Some(path.into());
        self
    }

    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_start_time(mut self, universal_time: f64) -> Self {
        self.start_time = universal_time;
        self
    }

    pub fn build(self) -> TestApp {
        let mut plugin = WindPlugin::with_config(self.config)
            .body_overrides(self.body_overrides)
            .seed(self.seed)
            .timestep(self.time_step)
            .start_time(self.start_time);
        if let Some(path) = self.telemetry_path {
            plugin = plugin.telemetry(path);
        }

        let mut app = App::new();
        app.add_plugins(MinimalPlugins).add_plugins(plugin);

        TestApp { app }
    }
}

/// Main test application wrapper
pub struct TestApp {
    pub app: App,
}

impl TestApp {
    /// Advance the fixed clock by one timestep and run the wind schedule once.
    pub fn step_fixed(&mut self) {
        let world = self.app.world_mut();
        let timestep = world.resource::<Time<Fixed>>().timestep();
        world.resource_mut::<Time<Fixed>>().advance_by(timestep);
        world.run_schedule(FixedUpdate);
    }

    pub fn run_steps(&mut self, steps: usize) {
        for _ in 0..steps {
            self.step_fixed();
        }
    }

    pub fn spawn_vehicle(&mut self, state: VehicleState, parts: Option<Vec<PartInfo>>) -> Entity {
        let body = RigidBodyComponent::new(state.mass, Matrix3::identity());
        let mut entity = self
            .app
            .world_mut()
            .spawn((state, body, ActiveVehicle, Name::new("Test Vehicle")));
        if let Some(parts) = parts {
            entity.insert(VehicleParts(parts));
        }
        entity.id()
    }

    pub fn get_state<T: Resource>(&self) -> Option<&T> {
        self.app.world().get_resource::<T>()
    }

    pub fn get_state_mut<T: Resource>(&mut self) -> Option<Mut<T>> {
        self.app.world_mut().get_resource_mut::<T>()
    }

    pub fn component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.app.world().get::<T>(entity)
    }

    pub fn component_mut<T: Component>(&mut self, entity: Entity) -> Option<Mut<T>> {
        self.app.world_mut().get_mut::<T>(entity)
    }
}

/// A light aircraft cruising north over Kerbin at 1.5 km
pub fn kerbin_cruiser() -> VehicleState {
    VehicleState {
        body: Some("Kerbin".to_string()),
        atmosphere_depth: 70_000.0,
        altitude: 1_500.0,
        mass: 1_200.0,
        size: 3.0,
        air_density: 1.0,
        surface_velocity: Vector3::new(0.0, 50.0, 0.0),
        surface_speed: 50.0,
        ..Default::default()
    }
}
