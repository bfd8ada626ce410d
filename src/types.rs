//! Core physics types and constants for the two-body problem.

use glam::DVec2;

/// Physical constants (SI units)

/// Gravitational constant (m³·kg⁻¹·s⁻²)
pub const G: f64 = 6.6743e-11;

/// Solar mass in kilograms
pub const SUN_MASS: f64 = 1.989e30;

/// Earth mass in kilograms
pub const EARTH_MASS: f64 = 5.972e24;

/// Astronomical unit in meters
pub const AU_TO_METERS: f64 = 1.495978707e11;

/// Meters to AU
pub const METERS_TO_AU: f64 = 1.0 / AU_TO_METERS;

/// Seconds per day
pub const SECONDS_PER_DAY: f64 = 86400.0;

/// One sample of the orbiting body's motion.
///
/// Positions are measured from the primary, which sits fixed at the origin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StateVector {
    /// Seconds since the start of the run
    pub time: f64,
    /// Position in meters relative to the primary
    pub pos: DVec2,
    /// Velocity in meters per second
    pub vel: DVec2,
}

impl StateVector {
    pub const fn new(time: f64, pos: DVec2, vel: DVec2) -> Self {
        Self { time, pos, vel }
    }

    /// Initial condition at t = 0.
    pub const fn initial(pos: DVec2, vel: DVec2) -> Self {
        Self::new(0.0, pos, vel)
    }

    /// Distance to the primary in meters
    pub fn radius(&self) -> f64 {
        self.pos.length()
    }

    /// Speed in m/s
    pub fn speed(&self) -> f64 {
        self.vel.length()
    }

    /// Position in AU
    pub fn pos_au(&self) -> DVec2 {
        self.pos * METERS_TO_AU
    }

    /// Time in days
    pub fn days(&self) -> f64 {
        self.time / SECONDS_PER_DAY
    }
}
