//! Torque and inertia terms for a rod driven by its bobs
//!
//! This is an approximate coupling: each bob pushes on the rod as if its
//! weight acted at rod-length distance with lever angle equal to the bob's
//! own swing angle. The inertia ignores bob motion.

use super::states::{Bob, RodEnd, RodSystem};

/// Signed torque one bob exerts on a rod of length `rod_length`
pub fn bob_torque(bob: &Bob, end: RodEnd, gravity: f64, rod_length: f64) -> f64 {
    end.torque_sign() * bob.mass() * gravity * rod_length * bob.state.angle.sin()
}

/// Sum of every attached bob's signed torque
pub fn net_torque(rod: &RodSystem) -> f64 {
    let g = rod.params().gravity;
    rod.bobs()
        .map(|(end, bob)| bob_torque(bob, end, g, rod.length()))
        .sum()
}

/// I = L²/12 + Σ m l²
///
/// Strictly positive even with no bobs, since the rod term is always there.
pub fn moment_of_inertia(rod: &RodSystem) -> f64 {
    let rod_term = rod.length().powi(2) / 12.0;
    rod_term + rod.bobs().map(|(_, b)| b.mass() * b.length().powi(2)).sum::<f64>()
}
