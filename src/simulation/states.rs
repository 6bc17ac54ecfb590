//! Core state types for the rod simulation.
//!
//! - `AngularState` is the (angle, velocity, acceleration) triple shared by
//!   rods and bobs
//! - `Bob` is a point mass on its own pivot
//! - `RodSystem` is a pivoting rod carrying bobs at its two ends
//!
//! Angles are radians and never wrapped.

use nalgebra::Vector2;
use serde::Deserialize;

use crate::error::SimError;
use super::params::{Parameters, INITIAL_BOB_ANGULAR_VELOCITY};

pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AngularState {
    pub angle: f64, // radians, unbounded
    pub angular_velocity: f64,
    pub angular_acceleration: f64, // recomputed every step
}

impl AngularState {
    pub fn at(angle: f64) -> Self {
        Self { angle, ..Self::default() }
    }

    pub fn is_finite(&self) -> bool {
        self.angle.is_finite() && self.angular_velocity.is_finite()
    }
}

/// Which end of the rod a bob hangs from.
///
/// `First` sits at `pivot - L/2 (cos θ, sin θ)` and its torque is negated,
/// `Second` sits at `pivot + L/2 (cos θ, sin θ)` and adds positively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RodEnd {
    #[serde(rename = "first")]
    First,
    #[serde(rename = "second")]
    Second,
}

impl RodEnd {
    pub fn torque_sign(self) -> f64 {
        match self {
            RodEnd::First => -1.0,
            RodEnd::Second => 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bob {
    length: f64, // distance from its pivot, fixed
    mass: f64, // torque weight
    pub state: AngularState,
    pub tag: String, // presentation only (hex colour)
}

impl Bob {
    pub fn new(length: f64, mass: f64, angle: f64, tag: impl Into<String>) -> Result<Self, SimError> {
        if !(length.is_finite() && length > 0.0) {
            return Err(SimError::NonPositiveLength(length));
        }
        if !(mass.is_finite() && mass > 0.0) {
            return Err(SimError::NonPositiveMass(mass));
        }
        Ok(Self {
            length,
            mass,
            state: AngularState {
                angle,
                angular_velocity: INITIAL_BOB_ANGULAR_VELOCITY,
                angular_acceleration: 0.0,
            },
            tag: tag.into(),
        })
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RodSystem {
    pivot: NVec2, // fixed anchor
    length: f64, // fixed rod length
    pub state: AngularState,
    pub(crate) bobs: Vec<(RodEnd, Bob)>, // insertion order kept
    pub tracer_angle: f64, // decorative, no feedback into dynamics
    pub(crate) params: Parameters,
}

impl RodSystem {
    pub fn new(pivot_x: f64, pivot_y: f64, length: f64, angle: f64, params: Parameters) -> Result<Self, SimError> {
        if !(length.is_finite() && length > 0.0) {
            return Err(SimError::NonPositiveLength(length));
        }
        params.validate()?;
        Ok(Self {
            pivot: NVec2::new(pivot_x, pivot_y),
            length,
            state: AngularState::at(angle),
            bobs: Vec::new(),
            tracer_angle: 0.0,
            params,
        })
    }

    pub fn pivot(&self) -> NVec2 {
        self.pivot
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Bobs with their attachment ends, in insertion order
    pub fn bobs(&self) -> impl Iterator<Item = (RodEnd, &Bob)> {
        self.bobs.iter().map(|(end, bob)| (*end, bob))
    }

    pub fn bob_count(&self) -> usize {
        self.bobs.len()
    }
}
