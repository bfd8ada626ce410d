//! Common test utilities for integration tests.

#![allow(dead_code)]

use glam::DVec2;
use kepler_laws::elements::OrbitalElements;
use kepler_laws::physics::{OrbitConfig, RunStatus};
use kepler_laws::trajectory::Trajectory;
use kepler_laws::types::AU_TO_METERS;

/// The default Earth-like run with a different step size.
pub fn earth_like(dt: f64) -> OrbitConfig {
    OrbitConfig {
        dt,
        ..OrbitConfig::default()
    }
}

/// Elliptical orbit starting at perihelion on the positive x axis.
pub fn elliptical_orbit(perihelion_au: f64, eccentricity: f64) -> OrbitConfig {
    let base = OrbitConfig::default();
    let r_p = perihelion_au * AU_TO_METERS;
    let a = r_p / (1.0 - eccentricity);
    let v = (base.gm() * (2.0 / r_p - 1.0 / a)).sqrt();
    OrbitConfig {
        initial_position: DVec2::new(r_p, 0.0),
        initial_velocity: DVec2::new(0.0, v),
        ..base
    }
}

/// Analytic elements of the orbit `config` starts on.
pub fn elements(config: &OrbitConfig) -> OrbitalElements {
    OrbitalElements::from_state(config.initial_position, config.initial_velocity, config.gm())
        .expect("config starts away from the primary")
}

/// Integrate `config` and require that the run closed.
pub fn closed_run(config: &OrbitConfig) -> Trajectory {
    let traj = Trajectory::simulate(config).expect("integration failed");
    assert_eq!(
        traj.status(),
        RunStatus::Closed,
        "run with dt = {} did not close",
        config.dt
    );
    traj
}
