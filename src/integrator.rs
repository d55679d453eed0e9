//! Equations of motion for the double pendulum and the fixed-step update.
//!
//! Angles are measured from straight down, y grows downward. The update is
//! position-first semi-implicit Euler: angles move with the previous angular
//! velocities, then the velocities pick up the accelerations evaluated at the
//! new angles.

use crate::pendulum::PendulumState;

/// Angular accelerations `(acc1, acc2)` from the coupled Lagrangian equations.
///
/// Not guarded: when `2*m1 + m2 == m2 * cos(2*a1 - 2*a2)` the shared denominator
/// vanishes and the result is non-finite.
pub(crate) fn angular_accelerations(state: &PendulumState) -> (f32, f32) {
    let p = &state.params;
    let (g, m1, m2, l1, l2) = (p.gravity, p.mass1, p.mass2, p.length1, p.length2);
    let (a1, a2) = (state.angle1, state.angle2);
    let (av1, av2) = (state.angular_velocity1, state.angular_velocity2);

    let delta = a1 - a2;
    let den = 2.0 * m1 + m2 - m2 * (2.0 * a1 - 2.0 * a2).cos();

    let acc1 = (-g * (2.0 * m1 + m2) * a1.sin()
        - m2 * g * (a1 - 2.0 * a2).sin()
        - 2.0 * delta.sin() * m2 * (av2 * av2 * l2 + av1 * av1 * l1 * delta.cos()))
        / (l1 * den);
    let acc2 = (2.0
        * delta.sin()
        * (av1 * av1 * l1 * (m1 + m2) + g * (m1 + m2) * a1.cos() + av2 * av2 * l2 * m2 * delta.cos()))
        / (l2 * den);

    (acc1, acc2)
}

/// Advance by `dt` seconds and return the new state.
pub(crate) fn advance(state: PendulumState, dt: f32) -> PendulumState {
    let mut next = state;

    next.angle1 += next.angular_velocity1 * dt;
    next.angle2 += next.angular_velocity2 * dt;

    let (acc1, acc2) = angular_accelerations(&next);

    let damp = next.params.dampening;
    next.angular_velocity1 *= damp;
    next.angular_velocity2 *= damp;
    next.angular_velocity1 += acc1 * dt;
    next.angular_velocity2 += acc2 * dt;

    next.refresh_positions();
    next
}
