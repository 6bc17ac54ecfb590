use std::f64::consts::PI;
use std::path::PathBuf;

use approx::assert_relative_eq;

use rodsim::{bob_torque, moment_of_inertia, net_torque};
use rodsim::{Bob, NVec2, Parameters, RodEnd, RodSystem, Scenario, ScenarioConfig, SimError};

/// Rod at the origin with default parameters and no bobs
pub fn bare_rod(length: f64, angle: f64) -> RodSystem {
    RodSystem::new(0.0, 0.0, length, angle, Parameters::default()).unwrap()
}

/// The stock assemblies anchored at the origin
pub fn reference() -> Scenario {
    Scenario::reference(NVec2::zeros()).unwrap()
}

// ==================================================================================
// Construction tests
// ==================================================================================

#[test]
fn rejects_non_positive_geometry() {
    assert_eq!(Bob::new(0.0, 1.0, 0.0, "x"), Err(SimError::NonPositiveLength(0.0)));
    assert_eq!(Bob::new(1.0, -2.0, 0.0, "x"), Err(SimError::NonPositiveMass(-2.0)));
    assert!(matches!(Bob::new(f64::NAN, 1.0, 0.0, "x"), Err(SimError::NonPositiveLength(_))));
    assert!(matches!(
        RodSystem::new(0.0, 0.0, -1.0, 0.0, Parameters::default()),
        Err(SimError::NonPositiveLength(_))
    ));
}

#[test]
fn rejects_damping_that_amplifies() {
    let p = Parameters { damping: 1.01, ..Parameters::default() };
    assert_eq!(RodSystem::new(0.0, 0.0, 1.0, 0.0, p), Err(SimError::InvalidDamping(1.01)));
}

#[test]
fn new_bob_is_seeded_with_motion() {
    let bob = Bob::new(100.0, 20.0, PI, "#f95869").unwrap();
    assert_eq!(bob.state.angular_velocity, 0.05);
    assert_eq!(bob.state.angular_acceleration, 0.0);
    assert_eq!(bob.tag, "#f95869");
}

// ==================================================================================
// Torque tests
// ==================================================================================

#[test]
fn empty_rod_steps_without_division_error() {
    let mut rod = bare_rod(400.0, PI);
    assert_relative_eq!(moment_of_inertia(&rod), 400.0_f64.powi(2) / 12.0);
    rod.step(1.0);
    assert_eq!(rod.state.angular_acceleration, 0.0);
    assert!(rod.is_finite());
}

#[test]
fn opposite_ends_contribute_opposite_torque() {
    let g = Parameters::default().gravity;
    let bob = Bob::new(50.0, 3.0, 0.7, "x").unwrap();
    let first = bob_torque(&bob, RodEnd::First, g, 200.0);
    let second = bob_torque(&bob, RodEnd::Second, g, 200.0);
    assert!(first < 0.0 && second > 0.0);
    assert_relative_eq!(first, -second);

    let mut rod = bare_rod(200.0, 0.0);
    rod.attach(bob.clone());
    rod.attach(bob);
    assert_relative_eq!(net_torque(&rod), 0.0);
}

#[test]
fn later_bobs_all_add_positively() {
    let g = Parameters::default().gravity;
    let mut rod = bare_rod(10.0, 0.0);
    for _ in 0..3 {
        rod.attach(Bob::new(1.0, 2.0, 0.5, "x").unwrap());
    }
    // one negated, two positive
    assert_relative_eq!(net_torque(&rod), 2.0 * g * 10.0 * 0.5_f64.sin(), epsilon = 1e-12);
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn rod_velocity_is_damped_before_moving_angle() {
    let p = Parameters::default();
    let (theta, v, dt) = (0.0, 0.1, 0.5);

    let mut rod = bare_rod(100.0, theta);
    rod.attach_at(Bob::new(40.0, 2.0, 0.5, "x").unwrap(), RodEnd::Second);
    rod.state.angular_velocity = v;

    let a = 2.0 * p.gravity * 100.0 * 0.5_f64.sin() / (100.0_f64.powi(2) / 12.0 + 2.0 * 40.0_f64.powi(2));
    rod.step(dt);

    let v_new = (v + a * dt) * p.damping;
    assert_relative_eq!(rod.state.angular_acceleration, a, epsilon = 1e-12);
    assert_relative_eq!(rod.state.angular_velocity, v_new, epsilon = 1e-12);
    assert_relative_eq!(rod.state.angle, theta + v_new * dt, epsilon = 1e-12);
}

#[test]
fn bob_is_forced_by_new_rod_state() {
    let p = Parameters::default();
    let mut rod = bare_rod(100.0, 0.2);
    rod.attach_at(Bob::new(40.0, 2.0, 0.5, "x").unwrap(), RodEnd::Second);
    rod.step(1.0);

    let rod_angle = rod.state.angle;
    let rod_accel = rod.state.angular_acceleration;
    let bob = rod.bobs().next().unwrap().1;

    let a = -(p.gravity / 40.0) * 0.5_f64.sin() + rod_accel * rod_angle.cos();
    let v = (0.05 + a) * p.damping;
    assert_relative_eq!(bob.state.angular_acceleration, a, epsilon = 1e-12);
    assert_relative_eq!(bob.state.angle, 0.5 + v, epsilon = 1e-12);
}

#[test]
fn undriven_rod_velocity_decays() {
    let mut rod = bare_rod(400.0, 0.0);
    rod.state.angular_velocity = 1.0;

    let mut prev = rod.state.angular_velocity.abs();
    for _ in 0..500 {
        rod.step(1.0);
        let now = rod.state.angular_velocity.abs();
        assert!(now <= prev, "velocity grew: {prev} -> {now}");
        prev = now;
    }
    assert_relative_eq!(prev, 0.995_f64.powi(500), epsilon = 1e-12);
}

// ==================================================================================
// End-to-end tests
// ==================================================================================

#[test]
fn single_bob_inverted_step() {
    let p = Parameters::default();
    let mut rod = bare_rod(400.0, PI);
    rod.attach(Bob::new(100.0, 20.0, PI, "x").unwrap());

    let torque = net_torque(&rod);
    assert_relative_eq!(torque, -(20.0 * 0.6 * 400.0 * PI.sin()), epsilon = 1e-9);
    assert!(torque.abs() < 1e-9);

    rod.step(1.0);

    let inertia = 400.0_f64.powi(2) / 12.0 + 20.0 * 100.0_f64.powi(2);
    let rod_a = torque / inertia;
    let rod_v = rod_a * p.damping;
    let rod_theta = PI + rod_v;
    assert_relative_eq!(rod.state.angular_acceleration, rod_a, epsilon = 1e-9);
    assert!(rod.state.angular_acceleration.abs() < 1e-9);
    assert_relative_eq!(rod.state.angle, rod_theta, epsilon = 1e-9);

    let bob = rod.bobs().next().unwrap().1;
    let bob_a = -(0.6 / 100.0) * PI.sin() + rod_a * rod_theta.cos();
    let bob_v = (0.05 + bob_a) * p.damping;
    assert_relative_eq!(bob.state.angular_velocity, bob_v, epsilon = 1e-9);
    assert_relative_eq!(bob.state.angle, PI + bob_v, epsilon = 1e-9);
    assert_relative_eq!(rod.tracer_angle, 0.02, epsilon = 1e-12);
}

#[test]
fn runs_are_deterministic() {
    let mut a = reference();
    let mut b = reference();
    for i in 0..2_000 {
        if i % 300 == 0 {
            a.speed.faster();
            b.speed.faster();
        }
        a.advance();
        b.advance();
    }
    assert_eq!(a.rods, b.rods);
}

#[test]
fn rods_do_not_interact() {
    let mut both = reference();
    let mut alone = reference();
    alone.rods.truncate(1);

    for _ in 0..1_000 {
        both.advance();
        alone.advance();
    }
    assert_eq!(both.rods[0], alone.rods[0]);
}

#[test]
fn bob_positions_follow_rod_ends() {
    let s = reference();
    let rod = &s.rods[0];
    let (first, second) = rod.endpoints();
    let positions = rod.bob_positions();

    let bobs: Vec<_> = rod.bobs().map(|(_, b)| b).collect();
    assert_relative_eq!((positions[0] - first).norm(), bobs[0].length(), epsilon = 1e-9);
    assert_relative_eq!((positions[1] - second).norm(), bobs[1].length(), epsilon = 1e-9);
}

#[test]
fn huge_steps_are_detected_and_reset() {
    let mut s = reference();
    let initial = s.rods[0].clone();
    for _ in 0..3 {
        s.rods[0].step(1e300);
    }
    assert_eq!(s.diverged(), vec![0]);
    assert!(matches!(s.rods[0].check_finite(), Err(SimError::Diverged { .. })));

    assert_eq!(s.recover_diverged(), 1);
    assert_eq!(s.rods[0], initial);
    assert!(s.diverged().is_empty());
}

// ==================================================================================
// Scenario loading tests
// ==================================================================================

#[test]
fn reference_yaml_matches_builtin_assemblies() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join("reference.yaml");
    let cfg = ScenarioConfig::from_path(&path).unwrap();
    let loaded = Scenario::build_scenario(cfg, NVec2::zeros()).unwrap();

    let builtin = reference();
    assert_eq!(loaded.parameters, builtin.parameters);
    assert_eq!(loaded.rods, builtin.rods);
}

#[test]
fn yaml_speed_floor_is_enforced() {
    let yaml = "speed: { initial: 0.01 }\nrods: []\n";
    let cfg = ScenarioConfig::from_reader(yaml.as_bytes()).unwrap();
    assert!(matches!(
        Scenario::build_scenario(cfg, NVec2::zeros()),
        Err(SimError::InvalidSpeed { .. })
    ));
}

#[test]
fn yaml_bad_bob_fails_fast() {
    let yaml = "rods:\n  - length: 10.0\n    angle: 0.0\n    bobs:\n      - { length: 5.0, mass: 0.0, angle: 0.0 }\n";
    let cfg = ScenarioConfig::from_reader(yaml.as_bytes()).unwrap();
    assert_eq!(
        Scenario::build_scenario(cfg, NVec2::zeros()).err(),
        Some(SimError::NonPositiveMass(0.0))
    );
}

#[test]
fn lopsided_scenario_stays_finite_at_capped_speed() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join("lopsided.yaml");
    let cfg = ScenarioConfig::from_path(&path).unwrap();
    let mut s = Scenario::build_scenario(cfg, NVec2::zeros()).unwrap();

    let ends: Vec<RodEnd> = s.rods[0].bobs().map(|(e, _)| e).collect();
    assert_eq!(ends, vec![RodEnd::First, RodEnd::First, RodEnd::Second]);

    for _ in 0..100 {
        s.speed.faster();
    }
    assert_eq!(s.speed.multiplier(), 4.0);
    for _ in 0..2_000 {
        s.advance();
    }
    assert!(s.diverged().is_empty());
}
