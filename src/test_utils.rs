//! Test utilities for orbit integration tests.
//!
//! Provides fixtures for building run configurations and assertions for
//! verifying physical invariants like energy and angular momentum
//! conservation.

use glam::DVec2;

use crate::physics::OrbitConfig;
use crate::types::AU_TO_METERS;

/// Fixtures for creating test run configurations.
///
/// All of them orbit the default primary and keep the default step size and
/// termination policy; override with struct-update syntax.
pub mod fixtures {
    use super::*;

    /// Circular orbit at `distance_au`, starting on the positive x axis and
    /// moving counterclockwise.
    pub fn circular_orbit(distance_au: f64) -> OrbitConfig {
        let base = OrbitConfig::default();
        let r = distance_au * AU_TO_METERS;
        OrbitConfig {
            initial_position: DVec2::new(r, 0.0),
            initial_velocity: DVec2::new(0.0, (base.gm() / r).sqrt()),
            ..base
        }
    }

    /// Elliptical orbit starting at perihelion on the positive x axis,
    /// moving counterclockwise.
    pub fn elliptical_orbit(perihelion_au: f64, eccentricity: f64) -> OrbitConfig {
        assert!(
            (0.0..1.0).contains(&eccentricity),
            "Eccentricity must be in [0, 1) for elliptical orbit"
        );

        let base = OrbitConfig::default();
        let r_p = perihelion_au * AU_TO_METERS;
        let a = r_p / (1.0 - eccentricity);
        // Vis-viva at perihelion
        let v = (base.gm() * (2.0 / r_p - 1.0 / a)).sqrt();

        OrbitConfig {
            initial_position: DVec2::new(r_p, 0.0),
            initial_velocity: DVec2::new(0.0, v),
            ..base
        }
    }

    /// Elliptical orbit starting at aphelion on the negative x axis, moving
    /// clockwise like the default run, so odd axis crossings are perihelia.
    pub fn aphelion_orbit(perihelion_au: f64, eccentricity: f64) -> OrbitConfig {
        let at_perihelion = elliptical_orbit(perihelion_au, eccentricity);
        let gm = at_perihelion.gm();
        let r_p = perihelion_au * AU_TO_METERS;
        let a = r_p / (1.0 - eccentricity);
        let r_a = a * (1.0 + eccentricity);
        let v = (gm * (2.0 / r_a - 1.0 / a)).sqrt();

        OrbitConfig {
            initial_position: DVec2::new(-r_a, 0.0),
            initial_velocity: DVec2::new(0.0, v),
            ..at_perihelion
        }
    }

    /// `config` with the step size set to `period / steps_per_orbit`.
    pub fn resolved(config: OrbitConfig, steps_per_orbit: f64) -> OrbitConfig {
        let period = super::assertions::period_of(&config);
        OrbitConfig {
            dt: period / steps_per_orbit,
            ..config
        }
    }
}

/// Assertions for verifying physical invariants.
pub mod assertions {
    use super::*;
    use crate::elements::OrbitalElements;

    /// Specific orbital energy E = v²/2 - GM/r.
    pub fn orbital_energy(pos: DVec2, vel: DVec2, gm: f64) -> f64 {
        0.5 * vel.length_squared() - gm / pos.length()
    }

    /// Specific angular momentum (z component of r × v).
    pub fn angular_momentum(pos: DVec2, vel: DVec2) -> f64 {
        pos.x * vel.y - pos.y * vel.x
    }

    /// Analytic period of the orbit `config` starts on.
    ///
    /// # Panics
    /// Panics if the orbit is not bound.
    pub fn period_of(config: &OrbitConfig) -> f64 {
        elements_of(config)
            .period
            .expect("fixture orbit must be bound")
    }

    /// Analytic elements of the orbit `config` starts on.
    pub fn elements_of(config: &OrbitConfig) -> OrbitalElements {
        OrbitalElements::from_state(config.initial_position, config.initial_velocity, config.gm())
            .expect("fixture must start away from the primary")
    }

    /// Assert that energy is conserved within tolerance.
    ///
    /// # Panics
    /// Panics if relative energy drift exceeds tolerance.
    pub fn assert_energy_conserved(initial_energy: f64, final_energy: f64, tolerance: f64) {
        let drift = ((final_energy - initial_energy) / initial_energy).abs();
        assert!(
            drift <= tolerance,
            "Energy not conserved: initial={initial_energy:.6e}, final={final_energy:.6e}, drift={drift:.6e}, tolerance={tolerance:.6e}"
        );
    }

    /// Assert that angular momentum is conserved within tolerance.
    ///
    /// # Panics
    /// Panics if relative angular momentum drift exceeds tolerance.
    pub fn assert_angular_momentum_conserved(initial_l: f64, final_l: f64, tolerance: f64) {
        let drift = ((final_l - initial_l) / initial_l).abs();
        assert!(
            drift <= tolerance,
            "Angular momentum not conserved: initial={initial_l:.6e}, final={final_l:.6e}, drift={drift:.6e}, tolerance={tolerance:.6e}"
        );
    }
}

/// Writers with scripted failures.
pub mod writers {
    use std::io;

    /// Accepts every write, then fails on `flush` the way a full disk does.
    pub struct FullDisk;

    impl io::Write for FullDisk {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::other("no space left on device"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_circular_orbit_has_correct_velocity() {
        let config = fixtures::circular_orbit(1.0);
        let expected_v = (config.gm() / AU_TO_METERS).sqrt();
        assert_relative_eq!(config.initial_velocity.length(), expected_v, epsilon = 1e-9);
        assert!(assertions::elements_of(&config).eccentricity < 1e-6);
    }

    #[test]
    fn test_elliptical_orbit_elements() {
        let config = fixtures::elliptical_orbit(1.0, 0.5);
        let el = assertions::elements_of(&config);
        assert_relative_eq!(el.eccentricity, 0.5, max_relative = 1e-9);
        assert_relative_eq!(el.perihelion(), AU_TO_METERS, max_relative = 1e-9);
        assert!(
            assertions::angular_momentum(config.initial_position, config.initial_velocity) > 0.0
        );
    }

    #[test]
    fn test_aphelion_orbit_matches_perihelion_orbit() {
        let from_peri = assertions::elements_of(&fixtures::elliptical_orbit(0.7, 0.4));
        let config = fixtures::aphelion_orbit(0.7, 0.4);
        let from_aph = assertions::elements_of(&config);

        assert_relative_eq!(
            from_aph.semi_major_axis,
            from_peri.semi_major_axis,
            max_relative = 1e-9
        );
        assert_relative_eq!(from_aph.eccentricity, 0.4, max_relative = 1e-9);
        // Clockwise
        assert!(
            assertions::angular_momentum(config.initial_position, config.initial_velocity) < 0.0
        );
    }

    #[test]
    fn test_resolved_step_size() {
        let config = fixtures::resolved(fixtures::circular_orbit(1.0), 1000.0);
        assert_relative_eq!(
            config.dt * 1000.0,
            assertions::period_of(&config),
            max_relative = 1e-12
        );
    }
}
