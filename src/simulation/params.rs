//! Physical constants and step settings for the simulation
//!
//! `Parameters` holds the values every rod and bob reads while stepping:
//! - gravity and per-step velocity damping,
//! - the base time unit scaled by the speed multiplier,
//! - the angular velocity of the decorative tracer

use crate::error::SimError;

/// Gravitational acceleration in simulation units (pixels per frame²)
pub const DEFAULT_GRAVITY: f64 = 0.6;

/// Multiplicative velocity decay applied once per step
pub const DEFAULT_DAMPING: f64 = 0.995;

/// One rendered frame
pub const DEFAULT_BASE_DT: f64 = 1.0;

/// Tracer advance per unit time
pub const DEFAULT_TRACER_ANGULAR_VELOCITY: f64 = 0.02;

/// Seed velocity for new bobs, so an assembly built at the unstable
/// equilibrium still starts to move
pub const INITIAL_BOB_ANGULAR_VELOCITY: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub gravity: f64, // gravitational acceleration
    pub damping: f64, // velocity decay per step, 0 < damping < 1
    pub base_dt: f64, // time unit before the speed multiplier
    pub tracer_angular_velocity: f64, // decorative tracer speed
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            damping: DEFAULT_DAMPING,
            base_dt: DEFAULT_BASE_DT,
            tracer_angular_velocity: DEFAULT_TRACER_ANGULAR_VELOCITY,
        }
    }
}

impl Parameters {
    /// Reject settings that would make damping amplify motion or the step
    /// run backwards
    pub fn validate(&self) -> Result<(), SimError> {
        if !self.gravity.is_finite() {
            return Err(SimError::InvalidGravity(self.gravity));
        }
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(SimError::InvalidDamping(self.damping));
        }
        if !(self.base_dt.is_finite() && self.base_dt > 0.0) {
            return Err(SimError::InvalidTimeStep(self.base_dt));
        }
        Ok(())
    }
}
