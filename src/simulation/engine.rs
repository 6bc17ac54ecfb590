//! Per-step dynamics for bobs and rods
//!
//! A rod step computes the net torque from its bobs, integrates the rod,
//! then drives every bob with the rod's new angle and acceleration as the
//! forcing parent. Rods never share state, so separate rods may be stepped
//! in any order or in parallel.

use crate::error::SimError;
use super::integrator::semi_implicit_euler;
use super::params::Parameters;
use super::states::{Bob, NVec2, RodEnd, RodSystem};
use super::torque::{moment_of_inertia, net_torque};

impl Bob {
    /// Advance the bob by `dt`, forced by a pivot that rotates with
    /// `parent_angle` and `parent_angular_acceleration`
    pub fn step(&mut self, parent_angle: f64, parent_angular_acceleration: f64, dt: f64, params: &Parameters) {
        let restoring = -(params.gravity / self.length()) * self.state.angle.sin();
        let forcing = parent_angular_acceleration * parent_angle.cos();
        self.state.angular_acceleration = restoring + forcing;
        semi_implicit_euler(&mut self.state, dt, params.damping);
    }

    /// World position of the bob hanging from `origin`
    ///
    /// y grows downward, as on a canvas.
    pub fn position(&self, origin: NVec2, parent_angle: f64) -> NVec2 {
        let phi = self.state.angle + parent_angle;
        origin + self.length() * NVec2::new(phi.sin(), phi.cos())
    }
}

impl RodSystem {
    /// Attach a bob, first one to `RodEnd::First`, every later one to
    /// `RodEnd::Second`
    ///
    /// Use `attach_at` to pick the end explicitly.
    pub fn attach(&mut self, bob: Bob) {
        let end = if self.bobs.is_empty() { RodEnd::First } else { RodEnd::Second };
        self.attach_at(bob, end);
    }

    pub fn attach_at(&mut self, bob: Bob, end: RodEnd) {
        self.bobs.push((end, bob));
    }

    /// Advance the rod and all its bobs by `dt`
    pub fn step(&mut self, dt: f64) {
        let params = self.params;

        let torque = net_torque(self);
        let inertia = moment_of_inertia(self);
        self.state.angular_acceleration = torque / inertia;
        semi_implicit_euler(&mut self.state, dt, params.damping);

        let (angle, accel) = (self.state.angle, self.state.angular_acceleration);
        for (_, bob) in self.bobs.iter_mut() {
            bob.step(angle, accel, dt, &params);
        }

        self.tracer_angle += params.tracer_angular_velocity * dt;
    }

    /// Point where bobs on `end` hang
    pub fn end_point(&self, end: RodEnd) -> NVec2 {
        let half = 0.5 * self.length();
        let dir = NVec2::new(self.state.angle.cos(), self.state.angle.sin());
        match end {
            RodEnd::First => self.pivot() - half * dir,
            RodEnd::Second => self.pivot() + half * dir,
        }
    }

    /// Both rod endpoints, `First` then `Second`
    pub fn endpoints(&self) -> (NVec2, NVec2) {
        (self.end_point(RodEnd::First), self.end_point(RodEnd::Second))
    }

    /// Position of every bob, in insertion order
    pub fn bob_positions(&self) -> Vec<NVec2> {
        self.bobs()
            .map(|(end, bob)| bob.position(self.end_point(end), self.state.angle))
            .collect()
    }

    pub fn is_finite(&self) -> bool {
        self.state.is_finite() && self.bobs.iter().all(|(_, b)| b.state.is_finite())
    }

    /// Report the first non-finite state in the rod or its bobs
    pub fn check_finite(&self) -> Result<(), SimError> {
        let states = std::iter::once(&self.state).chain(self.bobs.iter().map(|(_, b)| &b.state));
        for s in states {
            if !s.is_finite() {
                return Err(SimError::Diverged {
                    angle: s.angle,
                    angular_velocity: s.angular_velocity,
                });
            }
        }
        Ok(())
    }
}
