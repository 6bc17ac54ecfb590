//! Fixed-step time integrator shared by rods and bobs
//!
//! Semi-implicit (symplectic) Euler with multiplicative damping. The
//! acceleration must already be set for the current step.

use super::states::AngularState;

/// Advance one angular degree of freedom by `dt`
///
/// v_n+1 = (v_n + a_n dt) * damping
/// θ_n+1 = θ_n + v_n+1 dt
///
/// The damped, updated velocity drives the position update.
pub fn semi_implicit_euler(state: &mut AngularState, dt: f64, damping: f64) {
    state.angular_velocity += state.angular_acceleration * dt;
    state.angular_velocity *= damping;
    state.angle += state.angular_velocity * dt;
}
