//! Fixed-step simulation of the restricted two-body problem.
//!
//! The primary sits at the origin and never moves; the orbiting body's mass
//! only scales the energy and momentum diagnostics. [`propagate`] drives the
//! integrator and the termination policy and hands every sample to a
//! [`StateSink`], so callers decide whether to keep the whole trajectory or
//! fold it into running diagnostics.

mod gravity;
mod integrator;
mod termination;

#[cfg(test)]
mod proptest_physics;

use glam::DVec2;
use tracing::{debug, info, warn};

pub use gravity::compute_acceleration;
pub use integrator::{step, IntegrationScheme};
pub use termination::{crosses_axis, RunStatus, TerminationPolicy, TerminationTracker};

use crate::error::{KeplerError, Result};
use crate::types::{StateVector, AU_TO_METERS, EARTH_MASS, G, SUN_MASS};

/// Default hard cap on integration steps.
pub const DEFAULT_MAX_ITERATIONS: usize = 500_000;

/// Input parameters for one integration run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitConfig {
    /// Mass of the fixed primary (kg).
    pub primary_mass: f64,
    /// Mass of the orbiting body (kg). Scales diagnostics only.
    pub secondary_mass: f64,
    /// Gravitational constant (m³·kg⁻¹·s⁻²).
    pub gravitational_constant: f64,
    /// Initial position relative to the primary (m). Must not be the origin.
    pub initial_position: DVec2,
    /// Initial velocity (m/s).
    pub initial_velocity: DVec2,
    /// Time step (s). Default: 3600 (1 hour).
    pub dt: f64,
    /// When the run counts as complete.
    pub termination: TerminationPolicy,
    /// Hard cap on integration steps. Default: 500 000.
    pub max_iterations: usize,
    /// Numerical scheme. Default: semi-implicit Euler.
    pub scheme: IntegrationScheme,
}

impl OrbitConfig {
    /// Earth-mass body released at 1.0167 AU (Earth's aphelion distance) with
    /// 20 km/s, well below circular speed, giving a clearly eccentric orbit.
    pub const EARTH_LIKE: Self = Self {
        primary_mass: SUN_MASS,
        secondary_mass: EARTH_MASS,
        gravitational_constant: G,
        initial_position: DVec2::new(-1.0167 * AU_TO_METERS, 0.0),
        initial_velocity: DVec2::new(0.0, 2e4),
        dt: 3600.0,
        termination: TerminationPolicy::BoundingRevisit,
        max_iterations: DEFAULT_MAX_ITERATIONS,
        scheme: IntegrationScheme::SemiImplicitEuler,
    };

    /// Standard gravitational parameter G·M (m³/s²).
    pub fn gm(&self) -> f64 {
        self.gravitational_constant * self.primary_mass
    }

    /// State at t = 0.
    pub fn initial_state(&self) -> StateVector {
        StateVector::initial(self.initial_position, self.initial_velocity)
    }

    /// Reject physically meaningless input before integrating.
    ///
    /// # Errors
    /// [`KeplerError::InvalidParameter`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        positive("primary_mass", self.primary_mass)?;
        positive("secondary_mass", self.secondary_mass)?;
        positive("gravitational_constant", self.gravitational_constant)?;
        positive("dt", self.dt)?;

        let r = self.initial_position.length();
        if !r.is_finite() {
            return Err(KeplerError::InvalidParameter {
                name: "initial_position",
                value: r,
                reason: "must be finite",
            });
        }
        if r == 0.0 {
            return Err(KeplerError::InvalidParameter {
                name: "initial_position",
                value: r,
                reason: "must not coincide with the primary",
            });
        }
        if !self.initial_velocity.is_finite() {
            return Err(KeplerError::InvalidParameter {
                name: "initial_velocity",
                value: self.initial_velocity.length(),
                reason: "must be finite",
            });
        }
        if self.max_iterations == 0 {
            return Err(KeplerError::InvalidParameter {
                name: "max_iterations",
                value: 0.0,
                reason: "at least one step is required",
            });
        }
        if let TerminationPolicy::AxisCrossing { crossings: 0 } = self.termination {
            return Err(KeplerError::InvalidParameter {
                name: "crossings",
                value: 0.0,
                reason: "at least one axis crossing is required",
            });
        }

        Ok(())
    }
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self::EARTH_LIKE
    }
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(KeplerError::InvalidParameter {
            name,
            value,
            reason: "must be positive and finite",
        })
    }
}

/// Receives every sample of a run, the initial condition included.
pub trait StateSink {
    fn record(&mut self, state: &StateVector);
}

impl StateSink for Vec<StateVector> {
    fn record(&mut self, state: &StateVector) {
        self.push(*state);
    }
}

/// Outcome of [`propagate`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunSummary {
    pub status: RunStatus,
    /// Integration steps taken (samples recorded minus one).
    pub steps: usize,
    /// Sign changes of `y` seen during the run.
    pub crossings: u32,
    /// Last recorded sample.
    pub final_state: StateVector,
}

/// Integrate `config` until its termination policy or the iteration cap
/// stops the run, feeding each sample to `sink`.
///
/// Reaching the cap is not an error: the summary is flagged
/// [`RunStatus::NonConvergent`] and the samples recorded so far stay valid.
///
/// # Errors
/// [`KeplerError::InvalidParameter`] for bad input,
/// [`KeplerError::Divergence`] on a collision with the primary.
pub fn propagate<S: StateSink + ?Sized>(config: &OrbitConfig, sink: &mut S) -> Result<RunSummary> {
    config.validate()?;

    let gm = config.gm();
    let mut tracker = TerminationTracker::new(config.termination);
    let mut state = config.initial_state();

    info!(
        dt = config.dt,
        policy = ?config.termination,
        scheme = ?config.scheme,
        max_iterations = config.max_iterations,
        "Starting orbit integration"
    );

    tracker.observe(&state);
    sink.record(&state);

    let mut steps = 0;
    let status = loop {
        if steps >= config.max_iterations {
            if config.termination == TerminationPolicy::FixedSteps {
                break RunStatus::StepBudgetSpent;
            }
            warn!(
                steps,
                crossings = tracker.crossings(),
                "Iteration cap reached before the orbit closed"
            );
            break RunStatus::NonConvergent;
        }

        state = config.scheme.advance(&state, config.dt, gm)?;
        steps += 1;
        sink.record(&state);

        let crossings_before = tracker.crossings();
        let done = tracker.observe(&state);
        if tracker.crossings() != crossings_before {
            debug!(
                crossing = tracker.crossings(),
                time = state.time,
                radius = state.radius(),
                "Axis crossing"
            );
        }
        if done {
            break RunStatus::Closed;
        }
    };

    info!(steps, ?status, crossings = tracker.crossings(), "Orbit integration finished");

    Ok(RunSummary {
        status,
        steps,
        crossings: tracker.crossings(),
        final_state: state,
    })
}
