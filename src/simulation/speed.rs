//! Pause state and speed multiplier
//!
//! The multiplier scales the base time unit into the `dt` passed to
//! `RodSystem::step`. It never drops below `SPEED_FLOOR`. There is no
//! ceiling unless one is configured.

use bevy::log::{info, warn};

use crate::error::SimError;

/// Lowest multiplier accepted
pub const SPEED_FLOOR: f64 = 0.1;

/// Increment applied by `faster` / `slower`
pub const SPEED_STEP: f64 = 0.1;

/// Above this the explicit integrator starts to misbehave for the reference
/// assemblies
pub const SPEED_WARN_THRESHOLD: f64 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SpeedControl {
    multiplier: f64,
    paused: bool,
    max: Option<f64>,
}

impl Default for SpeedControl {
    fn default() -> Self {
        Self {
            multiplier: 1.0,
            paused: false,
            max: None,
        }
    }
}

impl SpeedControl {
    /// Build a controller starting at `initial`, optionally capped at `max`
    pub fn new(initial: f64, max: Option<f64>) -> Result<Self, SimError> {
        if !(initial.is_finite() && initial >= SPEED_FLOOR) {
            return Err(SimError::InvalidSpeed { value: initial, floor: SPEED_FLOOR });
        }
        if let Some(m) = max {
            if m.is_nan() || m < initial {
                return Err(SimError::InvalidSpeed { value: m, floor: initial });
            }
        }
        Ok(Self { multiplier: initial, paused: false, max })
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn max(&self) -> Option<f64> {
        self.max
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        info!("simulation {}", if self.paused { "paused" } else { "resumed" });
    }

    pub fn faster(&mut self) {
        let mut next = self.multiplier + SPEED_STEP;
        if let Some(max) = self.max {
            next = next.min(max);
        }
        if next > SPEED_WARN_THRESHOLD && self.multiplier <= SPEED_WARN_THRESHOLD {
            warn!("speed multiplier {next:.1} is past {SPEED_WARN_THRESHOLD}; integration may diverge");
        }
        self.multiplier = next;
        info!("speed multiplier {:.1}", self.multiplier);
    }

    pub fn slower(&mut self) {
        self.multiplier = (self.multiplier - SPEED_STEP).max(SPEED_FLOOR);
        info!("speed multiplier {:.1}", self.multiplier);
    }

    /// Step size for the next tick, `None` while paused
    pub fn dt(&self, base_dt: f64) -> Option<f64> {
        if self.paused {
            None
        } else {
            Some(base_dt * self.multiplier)
        }
    }
}
