pub mod states;
pub mod params;
pub mod speed;
pub mod engine;
pub mod torque;
pub mod integrator;
pub mod scenario;
