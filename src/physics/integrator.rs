//! Fixed-step integrators for the two-body problem.
//!
//! The default scheme is semi-implicit (symplectic) Euler: the velocity is
//! updated first and the position is advanced with the *updated* velocity.
//! That ordering keeps energy and angular momentum bounded over long runs,
//! which is what makes the conservation diagnostics meaningful. Explicit Euler
//! is kept only as a comparison baseline.

use crate::error::{KeplerError, Result};
use crate::physics::gravity::compute_acceleration;
use crate::types::StateVector;

/// Numerical scheme used to advance a [`StateVector`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntegrationScheme {
    /// v' = v + a·dt, r' = r + v'·dt
    #[default]
    SemiImplicitEuler,
    /// r' = r + v·dt, v' = v + a·dt
    ///
    /// Not symplectic: bound orbits spiral outward. Only useful to show drift.
    ExplicitEuler,
}

impl IntegrationScheme {
    /// Advance `state` by one step of `dt` seconds around a primary with
    /// gravitational parameter `gm` (G·M).
    ///
    /// # Errors
    /// [`KeplerError::InvalidParameter`] for a non-positive `dt`,
    /// [`KeplerError::Divergence`] when the body reaches the primary.
    pub fn advance(self, state: &StateVector, dt: f64, gm: f64) -> Result<StateVector> {
        if !(dt > 0.0 && dt.is_finite()) {
            return Err(KeplerError::InvalidParameter {
                name: "dt",
                value: dt,
                reason: "time step must be positive and finite",
            });
        }

        let acc = compute_acceleration(state.pos, gm, state.time)?;

        let (pos, vel) = match self {
            Self::SemiImplicitEuler => {
                let vel = state.vel + acc * dt;
                (state.pos + vel * dt, vel)
            }
            Self::ExplicitEuler => (state.pos + state.vel * dt, state.vel + acc * dt),
        };

        Ok(StateVector::new(state.time + dt, pos, vel))
    }
}

/// Advance one semi-implicit Euler step.
///
/// Pure function of its inputs: identical arguments always yield identical
/// output.
///
/// # Errors
/// See [`IntegrationScheme::advance`].
pub fn step(
    state: &StateVector,
    dt: f64,
    central_mass: f64,
    gravitational_constant: f64,
) -> Result<StateVector> {
    IntegrationScheme::SemiImplicitEuler.advance(state, dt, gravitational_constant * central_mass)
}

// =============================================================================
// Tests
// =============================================================================
