use bevy::{log::LogPlugin, prelude::*};
use nalgebra::{Matrix3, Vector3};
use serde::Serialize;
use std::env;

use windy::{
    components::{ActiveVehicle, PartInfo, RigidBodyComponent, VehicleParts, VehicleState},
    plugins::WindPlugin,
    resources::{WindClock, WindState},
};

const DEFAULT_DURATION: f64 = 60.0;
const DEFAULT_SEED: u64 = 1;

#[derive(Serialize)]
struct WindLine {
    time: f64,
    altitude: f64,
    speed: f64,
    heading: f64,
    acceleration: [f64; 3],
    angular_acceleration: [f64; 3],
}

fn glider() -> (VehicleState, VehicleParts, RigidBodyComponent) {
    let state = VehicleState {
        body: Some("Kerbin".to_string()),
        atmosphere_depth: 70_000.0,
        altitude: 1_500.0,
        mass: 3_000.0,
        size: 6.0,
        air_density: 1.05,
        surface_velocity: Vector3::new(0.0, 60.0, 0.0),
        surface_speed: 60.0,
        ..Default::default()
    };
    let parts = VehicleParts(vec![
        PartInfo::new("Mk1 Cockpit", &["ModuleCommand"]),
        PartInfo::new("Wing Strake", &["ModuleLiftingSurface"]),
        PartInfo::new("Wing Strake", &["ModuleLiftingSurface"]),
        PartInfo::new("Tail Fin", &["ModuleLiftingSurface"]),
        PartInfo::new("Elevon 2", &["ModuleControlSurface", "ModuleLiftingSurface"]),
    ]);
    let inertia = Matrix3::from_diagonal(&Vector3::new(4_000.0, 6_000.0, 9_000.0));
    (state, parts, RigidBodyComponent::new(3_000.0, inertia))
}

fn components(v: &Vector3<f64>) -> [f64; 3] {
    [v.x, v.y, v.z]
}

fn parse_duration(raw: &str) -> Result<f64, Box<dyn std::error::Error>> {
    let duration = raw.parse::<f64>()?;
    if !duration.is_finite() || duration < 0.0 {
        return Err(format!("duration must be a finite number of seconds, got {}", raw).into());
    }
    Ok(duration)
}

fn parse_args<I: Iterator<Item = String>>(
    mut args: I,
) -> Result<(f64, u64), Box<dyn std::error::Error>> {
    let duration = match args.next() {
        Some(raw) => parse_duration(&raw)?,
        None => DEFAULT_DURATION,
    };
    let seed = match args.next() {
        Some(raw) => raw.parse::<u64>()?,
        None => DEFAULT_SEED,
    };
    Ok((duration, seed))
}

fn step_fixed(app: &mut App) {
    let world = app.world_mut();
    let timestep = world.resource::<Time<Fixed>>().timestep();
    world.resource_mut::<Time<Fixed>>().advance_by(timestep);
    world.run_schedule(FixedUpdate);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (duration, seed) = parse_args(env::args().skip(1))?;

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, LogPlugin::default()))
        .add_plugins(WindPlugin::new().seed(seed));

    let (state, parts, body) = glider();
    app.world_mut().spawn((
        state,
        parts,
        body,
        ActiveVehicle,
        Name::new("Demonstration Glider"),
    ));

    let timestep = app.world().resource::<Time<Fixed>>().timestep().as_secs_f64();
    let steps = (duration / timestep).round() as u64;
    info!("Running {} fixed steps ({:.1} s) with seed {}", steps, duration, seed);

    let mut samples = 0;
    for _ in 0..steps {
        step_fixed(&mut app);

        let clock = app.world().resource::<WindClock>();
        if clock.wind_samples() == samples {
            continue;
        }
        samples = clock.wind_samples();
        let time = clock.universal_time();

        let wind = *app.world().resource::<WindState>();
        let world = app.world_mut();
        let mut query = world
            .query_filtered::<(&VehicleState, &RigidBodyComponent), With<ActiveVehicle>>();
        let Ok((state, body)) = query.get_single(world) else {
            continue;
        };

        let line = WindLine {
            time,
            altitude: state.altitude,
            speed: wind.speed,
            heading: wind.heading,
            acceleration: components(&body.net_acceleration),
            angular_acceleration: components(&body.net_angular_acceleration),
        };
        println!("{}", serde_json::to_string(&line)?);
    }

    Ok(())
}
