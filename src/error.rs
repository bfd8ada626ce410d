//! Error type shared by the integrator and the analyzers.

/// Errors produced while simulating or analysing an orbit.
#[derive(thiserror::Error, Debug)]
pub enum KeplerError {
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("integration diverged at t = {time} s (distance to primary {distance} m)")]
    Divergence { time: f64, distance: f64 },

    #[error("orbit did not close within {steps} steps")]
    NonConvergentOrbit { steps: usize },

    #[error(
        "fraction {fraction} maps to sample {index} of {len}; valid fractions are [0, {max_fraction})"
    )]
    IndexOutOfRange {
        fraction: f64,
        index: usize,
        len: usize,
        max_fraction: f64,
    },

    #[error("trajectory contains no samples")]
    EmptyTrajectory,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, KeplerError>;
