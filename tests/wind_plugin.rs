mod common;

use approx::assert_relative_eq;
use bevy::prelude::*;
use common::{kerbin_cruiser, TestAppBuilder};
use nalgebra::Vector3;
use windy::components::{FlightSituation, PartInfo, RigidBodyComponent, VehicleState};
use windy::resources::{WindClock, WindConfig, WindForecastEngine, WindState};

fn forces_only_drag() -> WindConfig {
    WindConfig {
        headwind_lift_enabled: false,
        wind_shear_enabled: false,
        ..Default::default()
    }
}

/// Step until the wind has been sampled `count` times, returning the universal time.
fn step_until_sampled(app: &mut common::TestApp, count: u64) -> f64 {
    for _ in 0..1_000 {
        app.step_fixed();
        let clock = app.get_state::<WindClock>().unwrap();
        if clock.wind_samples() >= count {
            return clock.universal_time();
        }
    }
    panic!("wind was never sampled");
}

#[test]
fn test_wind_is_calm_until_first_sample() {
    let mut app = TestAppBuilder::new().build();
    let vehicle = app.spawn_vehicle(kerbin_cruiser(), None);

    app.run_steps(20);
    assert_eq!(*app.get_state::<WindState>().unwrap(), WindState::calm());
    let body = app.component::<RigidBodyComponent>(vehicle).unwrap();
    assert_eq!(body.net_acceleration, Vector3::zeros());
    assert_eq!(body.net_angular_acceleration, Vector3::zeros());

    app.run_steps(10);
    let wind = app.get_state::<WindState>().unwrap();
    // Base 3 m/s scaled by the 1.5 km altitude shear
    assert!(wind.speed >= 3.9 - 1e-9);
    assert_eq!(app.get_state::<WindClock>().unwrap().wind_samples(), 1);
}

#[test]
fn test_sample_matches_forecast() {
    let mut app = TestAppBuilder::new().build();
    app.spawn_vehicle(kerbin_cruiser(), None);

    let time = step_until_sampled(&mut app, 1);
    let expected = app
        .get_state::<WindForecastEngine>()
        .unwrap()
        .forecast(1_500.0, time);
    let wind = app.get_state::<WindState>().unwrap();
    assert_relative_eq!(wind.speed, expected.speed);
    assert_relative_eq!(wind.heading, expected.heading);
    assert!(wind.speed <= 25.0);
}

#[test]
fn test_lateral_drag_reaches_rigid_body() {
    let mut app = TestAppBuilder::new().with_config(forces_only_drag()).build();
    let vehicle = app.spawn_vehicle(kerbin_cruiser(), None);

    step_until_sampled(&mut app, 1);
    app.step_fixed();

    let wind = *app.get_state::<WindState>().unwrap();
    // q * 2 * (3^2 * 1.2) / 1200
    let expected = (0.5 * wind.speed * wind.speed * 2.0 * 10.8 / 1_200.0).min(15.0);
    let body = app.component::<RigidBodyComponent>(vehicle).unwrap();
    assert_relative_eq!(body.net_acceleration, wind.direction * expected, epsilon = 1e-9);
    assert_eq!(body.net_angular_acceleration, Vector3::zeros());
    assert!(body.forces.is_empty());
}

#[test]
fn test_headwind_lift_when_flying_into_wind() {
    let config = WindConfig {
        wind_shear_enabled: false,
        ..Default::default()
    };
    let mut app = TestAppBuilder::new().with_config(config).build();
    let parts = vec![
        PartInfo::new("Swept Wings", &[]),
        PartInfo::new("Swept Wings", &[]),
        PartInfo::new("Mk1 Cockpit", &["ModuleCommand"]),
    ];
    let vehicle = app.spawn_vehicle(kerbin_cruiser(), Some(parts));

    step_until_sampled(&mut app, 1);
    let wind = *app.get_state::<WindState>().unwrap();

    // Turn into the wind
    {
        let mut state = app.component_mut::<VehicleState>(vehicle).unwrap();
        state.surface_velocity = -wind.direction * 50.0;
    }
    app.step_fixed();

    let delta_square = (50.0 + wind.speed).powi(2) - 2_500.0;
    let expected = (0.5 * delta_square * 0.45 * 4.0 * 1.5 / 1_200.0).min(2.0);
    let body = app.component::<RigidBodyComponent>(vehicle).unwrap();
    assert_relative_eq!(body.net_acceleration.z, expected, epsilon = 1e-9);
}

#[test]
fn test_no_wind_outside_windy_atmosphere() {
    let cases = vec![
        VehicleState {
            body: Some("Minmus".to_string()),
            ..kerbin_cruiser()
        },
        VehicleState {
            situation: FlightSituation::Orbiting,
            ..kerbin_cruiser()
        },
        VehicleState {
            altitude: 80_000.0,
            ..kerbin_cruiser()
        },
        VehicleState {
            body: None,
            ..kerbin_cruiser()
        },
    ];

    for state in cases {
        let mut app = TestAppBuilder::new().build();
        let vehicle = app.spawn_vehicle(state, None);
        app.run_steps(60);

        assert_eq!(app.get_state::<WindState>().unwrap().speed, 0.0);
        assert_eq!(app.get_state::<WindClock>().unwrap().wind_samples(), 0);
        let body = app.component::<RigidBodyComponent>(vehicle).unwrap();
        assert_eq!(body.net_acceleration, Vector3::zeros());
        assert_eq!(body.net_angular_acceleration, Vector3::zeros());
    }
}

#[test]
fn test_disabled_wind_applies_nothing() {
    let config = WindConfig {
        wind_enabled: false,
        ..Default::default()
    };
    let mut app = TestAppBuilder::new().with_config(config).build();
    let vehicle = app.spawn_vehicle(kerbin_cruiser(), None);
    app.run_steps(100);

    assert_eq!(*app.get_state::<WindState>().unwrap(), WindState::calm());
    let body = app.component::<RigidBodyComponent>(vehicle).unwrap();
    assert_eq!(body.net_acceleration, Vector3::zeros());
}

#[test]
fn test_body_override_enables_wind() {
    let mut app = TestAppBuilder::new()
        .with_config(forces_only_drag())
        .with_override("Minmus", " 0.5 ")
        .build();
    let minmus = VehicleState {
        body: Some("Minmus".to_string()),
        ..kerbin_cruiser()
    };
    app.spawn_vehicle(minmus, None);

    let time = step_until_sampled(&mut app, 1);
    let expected = app
        .get_state::<WindForecastEngine>()
        .unwrap()
        .forecast(1_500.0, time)
        .speed
        * 0.5;
    assert_relative_eq!(app.get_state::<WindState>().unwrap().speed, expected);
}

#[test]
fn test_leaving_atmosphere_keeps_heading() {
    let mut app = TestAppBuilder::new().build();
    let vehicle = app.spawn_vehicle(kerbin_cruiser(), None);
    step_until_sampled(&mut app, 1);
    let heading = app.get_state::<WindState>().unwrap().heading;

    app.component_mut::<VehicleState>(vehicle).unwrap().situation = FlightSituation::Escaping;
    app.step_fixed();

    let wind = app.get_state::<WindState>().unwrap();
    assert_eq!(wind.speed, 0.0);
    assert_eq!(wind.heading, heading);
}

#[test]
fn test_same_seed_same_session() {
    let run = |seed: u64| {
        let mut app = TestAppBuilder::new().with_seed(seed).build();
        app.spawn_vehicle(kerbin_cruiser(), None);
        app.run_steps(120);
        let engine = app.get_state::<WindForecastEngine>().unwrap();
        (engine.seeds(), *app.get_state::<WindState>().unwrap())
    };

    let (seeds_a, wind_a) = run(11);
    let (seeds_b, wind_b) = run(11);
    assert_eq!(seeds_a, seeds_b);
    assert_eq!(wind_a.speed.to_bits(), wind_b.speed.to_bits());
    assert_eq!(wind_a.heading.to_bits(), wind_b.heading.to_bits());

    let (seeds_c, _) = run(12);
    assert_ne!(seeds_a, seeds_c);
}

#[test]
fn test_clock_follows_start_time() {
    let mut app = TestAppBuilder::new().with_start_time(1_000.0).build();
    app.run_steps(50);
    let clock = app.get_state::<WindClock>().unwrap();
    assert_relative_eq!(clock.universal_time(), 1_001.0, epsilon = 1e-9);
    assert_eq!(clock.step_count(), 50);
}

#[test]
fn test_configured_cap_is_respected() {
    let config = WindConfig {
        max_wind_speed: 5,
        ..Default::default()
    };
    let mut app = TestAppBuilder::new().with_config(config).build();
    // Jool doubles the wind, well past the cap
    let jool = VehicleState {
        body: Some("Jool".to_string()),
        atmosphere_depth: 200_000.0,
        altitude: 10_000.0,
        ..kerbin_cruiser()
    };
    app.spawn_vehicle(jool, None);

    for count in 1..=5 {
        step_until_sampled(&mut app, count);
        assert!(app.get_state::<WindState>().unwrap().speed <= 5.0);
    }
    assert_eq!(
        app.get_state::<WindForecastEngine>().unwrap().effective_cap(),
        5.0
    );
}

#[test]
fn test_cadence_holds_at_sixty_hertz() {
    let mut app = TestAppBuilder::new().with_time_step(1.0 / 60.0).build();
    app.spawn_vehicle(kerbin_cruiser(), None);

    let timestep = app.get_state::<Time<Fixed>>().unwrap().timestep();
    assert_relative_eq!(timestep.as_secs_f64(), 1.0 / 60.0, epsilon = 1e-9);

    app.run_steps(119);
    assert_eq!(app.get_state::<WindClock>().unwrap().wind_samples(), 3);
    app.step_fixed();
    assert_eq!(app.get_state::<WindClock>().unwrap().wind_samples(), 4);
}

#[test]
fn test_invalid_timestep_falls_back_to_fifty_hertz() {
    let app = TestAppBuilder::new().with_time_step(f64::NAN).build();
    let timestep = app.get_state::<Time<Fixed>>().unwrap().timestep();
    assert_relative_eq!(timestep.as_secs_f64(), 0.02, epsilon = 1e-9);
}

fn shear_config(wind_shear_enabled: bool) -> WindConfig {
    WindConfig {
        max_wind_speed: 100,
        headwind_lift_enabled: false,
        wind_shear_enabled,
        ..Default::default()
    }
}

/// Altitude with the steepest 200 m speed gradient around the first wind sample
fn steepest_altitude(engine: &WindForecastEngine) -> f64 {
    (1..=60)
        .map(|i| i as f64 * 500.0)
        .map(|altitude| {
            let delta = engine.forecast(altitude + 200.0, 0.5).speed
                - engine.forecast(altitude, 0.5).speed;
            (altitude, delta.abs())
        })
        .fold((0.0, 0.0), |best, candidate| {
            if candidate.1 > best.1 {
                candidate
            } else {
                best
            }
        })
        .0
}

/// Run past the first sample at the steepest altitude, returning the vehicle's net
/// accelerations and the drag the wind alone would produce along its direction.
fn run_in_gradient(wind_shear_enabled: bool) -> (RigidBodyComponent, WindState, f64, f64) {
    let mut app = TestAppBuilder::new()
        .with_config(shear_config(wind_shear_enabled))
        .build();
    let altitude = steepest_altitude(app.get_state::<WindForecastEngine>().unwrap());
    let vehicle = app.spawn_vehicle(
        VehicleState {
            altitude,
            ..kerbin_cruiser()
        },
        None,
    );

    step_until_sampled(&mut app, 1);
    app.step_fixed();

    let time = app.get_state::<WindClock>().unwrap().universal_time();
    let engine = app.get_state::<WindForecastEngine>().unwrap();
    let delta = engine.forecast(altitude + 200.0, time).speed - engine.forecast(altitude, time).speed;

    let wind = *app.get_state::<WindState>().unwrap();
    // q * 2 * (3^2 * 1.2) / 1200
    let drag = (0.5 * wind.speed * wind.speed * 2.0 * 10.8 / 1_200.0).min(15.0);
    let body = app.component::<RigidBodyComponent>(vehicle).unwrap().clone();
    (body, wind, drag, delta)
}

#[test]
fn test_shear_pushes_and_tumbles_in_gradient() {
    let (body, wind, drag, delta) = run_in_gradient(true);
    assert!(delta.abs() >= 0.25, "gradient too weak: {}", delta);

    let shear = body.net_acceleration.dot(&wind.direction) - drag;
    // delta * 0.6 * size / mass, jittered by up to 25%
    let nominal = delta * 0.6 * 3.0 / 1_200.0;
    assert!(shear.abs() >= nominal.abs() * 0.75 - 1e-12);
    assert!(shear.abs() <= nominal.abs() * 1.25 + 1e-12);
    assert_eq!(shear.signum(), delta.signum());

    assert!(body.net_angular_acceleration.norm() > 0.0);
    assert_relative_eq!(
        body.net_angular_acceleration.norm(),
        shear.abs() * 0.45,
        epsilon = 1e-9
    );
    assert!(body.moments.is_empty());
}

#[test]
fn test_disabled_shear_leaves_only_drag() {
    let (body, wind, drag, delta) = run_in_gradient(false);
    assert!(delta.abs() >= 0.25);

    assert_relative_eq!(body.net_acceleration, wind.direction * drag, epsilon = 1e-9);
    assert_eq!(body.net_angular_acceleration, Vector3::zeros());
}
