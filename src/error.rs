//! Error types for building and stepping rod systems.

use thiserror::Error;

/// Errors raised while constructing a rod system or detecting that one has
/// blown up numerically.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// Rod or bob length is zero, negative, or not finite.
    #[error("length must be positive and finite, got {0}")]
    NonPositiveLength(f64),

    /// Bob mass is zero, negative, or not finite.
    #[error("mass must be positive and finite, got {0}")]
    NonPositiveMass(f64),

    /// Damping outside the open interval (0, 1).
    #[error("damping must lie strictly between 0 and 1, got {0}")]
    InvalidDamping(f64),

    /// Gravity is NaN or infinite.
    #[error("gravity must be finite, got {0}")]
    InvalidGravity(f64),

    /// Base time unit is not a positive finite number.
    #[error("base time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),

    /// Speed multiplier below the 0.1 floor, or a ceiling below the floor.
    #[error("speed multiplier must be at least {floor}, got {value}")]
    InvalidSpeed {
        /// Offending value.
        value: f64,
        /// Lowest multiplier accepted.
        floor: f64,
    },

    /// Explicit integration diverged (angle or angular velocity went non-finite).
    #[error("integration diverged: angle = {angle}, angular velocity = {angular_velocity}")]
    Diverged {
        /// Angle at the time of detection.
        angle: f64,
        /// Angular velocity at the time of detection.
        angular_velocity: f64,
    },

    /// Rod index out of range for the scenario.
    #[error("no rod at index {0}")]
    UnknownRod(usize),
}
