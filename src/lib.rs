pub mod error;
pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use error::SimError;

pub use simulation::states::{AngularState, Bob, RodEnd, RodSystem, NVec2};
pub use simulation::params::Parameters;
pub use simulation::speed::SpeedControl;
pub use simulation::integrator::semi_implicit_euler;
pub use simulation::torque::{bob_torque, net_torque, moment_of_inertia};
pub use simulation::scenario::{Scenario, RodSystemBuilder, BobSpec};

pub use configuration::config::{ScenarioConfig, ParametersConfig, SpeedConfig, RodConfig, BobConfig};

pub use visualization::rodsim_vis2d::run_2d;

pub use benchmark::benchmark::{bench_step, bench_step_curve};
