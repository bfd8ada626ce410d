//! Inverse-square gravity from the fixed primary.

use glam::DVec2;

use crate::error::{KeplerError, Result};

/// Compute gravitational acceleration at `pos` from a primary at the origin.
///
/// `gm` is the standard gravitational parameter G·M (m³/s²). `time` is only
/// used to label a divergence error.
///
/// # Errors
/// Returns [`KeplerError::Divergence`] when the distance underflows to zero or
/// the acceleration is no longer finite (a collision with the primary).
#[inline]
pub fn compute_acceleration(pos: DVec2, gm: f64, time: f64) -> Result<DVec2> {
    let r_squared = pos.length_squared();
    let r = r_squared.sqrt();

    if r_squared < f64::MIN_POSITIVE || !r.is_finite() {
        return Err(KeplerError::Divergence { time, distance: r });
    }

    // a = -GM r / |r|³
    let acc = -pos * (gm / (r_squared * r));
    if !acc.is_finite() {
        return Err(KeplerError::Divergence { time, distance: r });
    }

    Ok(acc)
}
