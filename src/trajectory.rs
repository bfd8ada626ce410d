//! Finalized sequence of sampled states produced by one integration run.
//!
//! A [`Trajectory`] is read-only once built. Every analyzer is a pure query
//! over it, addressed by a fractional position along the run in percent.

use std::cmp::Ordering;
use std::io::Write;
use std::sync::OnceLock;

use tracing::warn;

use crate::error::{KeplerError, Result};
use crate::geometry::{self, FocusPair};
use crate::physics::{self, OrbitConfig, RunStatus};
use crate::types::StateVector;

/// Ordered samples of one run, index 0 being the initial condition.
#[derive(Debug)]
pub struct Trajectory {
    states: Vec<StateVector>,
    status: RunStatus,
    crossings: u32,
    foci: OnceLock<FocusPair>,
}

impl Trajectory {
    /// Integrate `config` and keep every sample.
    ///
    /// # Errors
    /// Propagates [`physics::propagate`] failures. A run that hits the
    /// iteration cap still succeeds, flagged [`RunStatus::NonConvergent`].
    pub fn simulate(config: &OrbitConfig) -> Result<Self> {
        let mut states = Vec::new();
        let summary = physics::propagate(config, &mut states)?;
        Ok(Self::from_states(states, summary.status, summary.crossings))
    }

    /// Wrap samples recorded in time order by this crate.
    pub(crate) fn from_states(states: Vec<StateVector>, status: RunStatus, crossings: u32) -> Self {
        Self {
            states,
            status,
            crossings,
            foci: OnceLock::new(),
        }
    }

    /// Wrap samples computed elsewhere.
    ///
    /// # Errors
    /// [`KeplerError::InvalidParameter`] unless sample times strictly
    /// increase.
    pub fn from_samples(
        states: Vec<StateVector>,
        status: RunStatus,
        crossings: u32,
    ) -> Result<Self> {
        let out_of_order = states
            .windows(2)
            .find(|w| w[1].time.partial_cmp(&w[0].time) != Some(Ordering::Greater));
        if let Some(w) = out_of_order {
            return Err(KeplerError::InvalidParameter {
                name: "time",
                value: w[1].time,
                reason: "sample times must strictly increase",
            });
        }
        Ok(Self::from_states(states, status, crossings))
    }

    pub fn states(&self) -> &[StateVector] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// Sign changes of `y` observed while integrating.
    pub fn crossings(&self) -> u32 {
        self.crossings
    }

    /// Elapsed simulated time in seconds.
    pub fn duration(&self) -> f64 {
        match (self.states.first(), self.states.last()) {
            (Some(first), Some(last)) => last.time - first.time,
            _ => 0.0,
        }
    }

    /// Both foci of the orbit, derived once and cached.
    ///
    /// The estimate is only trustworthy for a closed single revolution; a
    /// warning is logged when the run did not converge.
    pub fn foci(&self) -> &FocusPair {
        self.foci.get_or_init(|| {
            if !self.status.is_converged() {
                warn!(
                    samples = self.len(),
                    "Deriving the second focus from a non-convergent run"
                );
            }
            geometry::second_focus(self)
        })
    }

    /// Sample index for `fraction` percent of the run:
    /// `floor(len · fraction / 100)`.
    ///
    /// # Errors
    /// [`KeplerError::IndexOutOfRange`] unless `fraction` is in `[0, 100)`.
    pub fn index_at(&self, fraction: f64) -> Result<usize> {
        self.index_with_margin(fraction, 0)
    }

    /// Like [`index_at`](Self::index_at) but also requires `margin` further
    /// samples after the returned index.
    pub(crate) fn index_with_margin(&self, fraction: f64, margin: usize) -> Result<usize> {
        let len = self.len();
        if len == 0 {
            return Err(KeplerError::EmptyTrajectory);
        }

        let scaled = (len as f64 * fraction / 100.0).floor();
        let index = scaled as usize;
        let usable = len.saturating_sub(margin);

        if !(fraction >= 0.0 && scaled.is_finite()) || index >= usable {
            return Err(KeplerError::IndexOutOfRange {
                fraction,
                index,
                len,
                max_fraction: 100.0 * usable as f64 / len as f64,
            });
        }

        Ok(index)
    }

    /// Write one tab-separated row per sample: time, x, y, vx, vy (SI units).
    ///
    /// # Errors
    /// Propagates write and flush failures.
    pub fn write_table<W: Write>(&self, mut out: W) -> Result<()> {
        writeln!(out, "time\tx\ty\tvx\tvy")?;
        for s in &self.states {
            writeln!(
                out,
                "{}\t{}\t{}\t{}\t{}",
                s.time, s.pos.x, s.pos.y, s.vel.x, s.vel.y
            )?;
        }
        out.flush()?;
        Ok(())
    }
}
