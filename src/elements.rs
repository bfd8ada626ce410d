//! Analytic orbital elements from a single state vector.
//!
//! These are the reference values the numerical checks are compared against:
//! the focal-distance sum should approach `2a` and the second focus should
//! sit `2ae` from the primary.

use std::f64::consts::TAU;

use glam::DVec2;

/// Keplerian elements of the orbit through one state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitalElements {
    /// Semi-major axis (meters). Negative for hyperbolic orbits.
    pub semi_major_axis: f64,
    /// Eccentricity (0 = circular, <1 = elliptical, >1 = hyperbolic).
    pub eccentricity: f64,
    /// Specific orbital energy (m²/s²).
    pub energy: f64,
    /// Specific angular momentum magnitude (m²/s).
    pub angular_momentum: f64,
    /// Orbital period (seconds). Only for bound orbits.
    pub period: Option<f64>,
}

impl OrbitalElements {
    /// Elements of the orbit through `pos`, `vel` about a primary with
    /// gravitational parameter `gm`.
    ///
    /// Returns `None` at the primary itself or for non-finite input.
    pub fn from_state(pos: DVec2, vel: DVec2, gm: f64) -> Option<Self> {
        let r = pos.length();
        if r == 0.0 || !r.is_finite() || !vel.is_finite() {
            return None;
        }

        let energy = 0.5 * vel.length_squared() - gm / r;
        let h = pos.perp_dot(vel).abs();

        // Vis-viva; a parabola has no finite semi-major axis
        let semi_major_axis = if energy == 0.0 {
            f64::INFINITY
        } else {
            -gm / (2.0 * energy)
        };

        // Rounding can make e² slightly negative for a circular orbit
        let eccentricity = (1.0 + 2.0 * energy * h * h / (gm * gm)).max(0.0).sqrt();

        let period = (energy < 0.0).then(|| TAU * (semi_major_axis.powi(3) / gm).sqrt());

        Some(Self {
            semi_major_axis,
            eccentricity,
            energy,
            angular_momentum: h,
            period,
        })
    }

    pub fn is_bound(&self) -> bool {
        self.energy < 0.0
    }

    /// Closest approach to the primary.
    pub fn perihelion(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    /// Farthest distance from the primary. Only meaningful for bound orbits.
    pub fn aphelion(&self) -> f64 {
        self.semi_major_axis * (1.0 + self.eccentricity)
    }

    pub fn semi_minor_axis(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity * self.eccentricity).max(0.0).sqrt()
    }

    /// Distance between the two foci, `2ae`.
    pub fn focal_separation(&self) -> f64 {
        2.0 * self.semi_major_axis * self.eccentricity
    }

    /// Area of the ellipse, `πab`.
    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.semi_major_axis * self.semi_minor_axis()
    }
}
