//! Long-run drift diagnostics: angular momentum, mechanical energy and
//! perihelion distance.
//!
//! A symplectic integrator keeps energy bounded and perihelia fixed over many
//! revolutions, while a non-symplectic one lets both creep. The series here
//! make that visible. They can be computed from a stored [`Trajectory`] or
//! folded sample by sample during integration with [`DriftAccumulator`], which
//! never holds more than two past samples.

use std::io::Write;

use tracing::debug;

use crate::analysis::ConservationReport;
use crate::error::Result;
use crate::physics::{self, crosses_axis, OrbitConfig, RunSummary, StateSink};
use crate::trajectory::Trajectory;
use crate::types::StateVector;

/// How angular momentum is evaluated per sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AngularMomentumModel {
    /// `|r|·m·|v|`. Equals the true value only where `r ⟂ v`, so it swings
    /// over an eccentric orbit even when the integrator is exact.
    #[default]
    MagnitudeProduct,
    /// `m·(r_x·v_y − r_y·v_x)`, signed. Conserved to round-off by the
    /// semi-implicit scheme.
    CrossProduct,
}

impl AngularMomentumModel {
    /// Angular momentum of a body of `mass` at `state` (kg·m²/s).
    pub fn evaluate(self, state: &StateVector, mass: f64) -> f64 {
        match self {
            Self::MagnitudeProduct => state.radius() * mass * state.speed(),
            Self::CrossProduct => mass * state.pos.perp_dot(state.vel),
        }
    }
}

/// How perihelion passages are detected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PerihelionRule {
    /// The sample completing every odd-numbered crossing of the x axis. Only
    /// lands on perihelion when the run starts at aphelion on the x axis.
    #[default]
    OddAxisCrossings,
    /// Every interior local minimum of `|r|`, wherever the run starts.
    RadialMinimum,
}

/// Options for drift diagnostics. Masses and G come from the run's
/// [`OrbitConfig`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DriftOptions {
    pub angular_momentum: AngularMomentumModel,
    pub perihelion: PerihelionRule,
}

/// `½·m·|v|² − G·M·m/|r|` (J).
pub fn mechanical_energy(state: &StateVector, mass: f64, gm: f64) -> f64 {
    0.5 * mass * state.vel.length_squared() - gm * mass / state.radius()
}

/// One detected perihelion passage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Perihelion {
    /// Seconds since the start of the run.
    pub time: f64,
    /// Distance to the primary (m).
    pub distance: f64,
}

/// Per-sample conserved quantities plus perihelion passages.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DriftSeries {
    pub times: Vec<f64>,
    pub angular_momentum: Vec<f64>,
    pub mechanical_energy: Vec<f64>,
    pub perihelia: Vec<Perihelion>,
}

impl DriftSeries {
    /// Diagnostics over a stored trajectory of `config`.
    pub fn from_trajectory(
        trajectory: &Trajectory,
        config: &OrbitConfig,
        options: &DriftOptions,
    ) -> Self {
        let mut acc = DriftAccumulator::new(config, options);
        for state in trajectory.states() {
            acc.record(state);
        }
        acc.finish()
    }

    /// Integrate `config` and compute the diagnostics on the fly, without
    /// keeping the trajectory.
    ///
    /// # Errors
    /// Same as [`physics::propagate`].
    pub fn stream(config: &OrbitConfig, options: &DriftOptions) -> Result<(Self, RunSummary)> {
        let mut acc = DriftAccumulator::new(config, options);
        let summary = physics::propagate(config, &mut acc)?;
        Ok((acc.finish(), summary))
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Spread of the mechanical energy over every sample.
    pub fn energy_report(&self) -> Option<ConservationReport> {
        ConservationReport::from_values(self.mechanical_energy.iter().copied())
    }

    /// Spread of the angular momentum over every sample.
    pub fn angular_momentum_report(&self) -> Option<ConservationReport> {
        ConservationReport::from_values(self.angular_momentum.iter().copied())
    }

    /// Spread of the detected perihelion distances.
    pub fn perihelion_report(&self) -> Option<ConservationReport> {
        ConservationReport::from_values(self.perihelia.iter().map(|p| p.distance))
    }

    /// `(E_last − E_first) / |E_first|`, or `None` with fewer than two samples.
    pub fn energy_drift(&self) -> Option<f64> {
        match self.mechanical_energy.as_slice() {
            [first, .., last] => Some((last - first) / first.abs()),
            _ => None,
        }
    }

    /// Write one tab-separated row per sample: time, angular momentum, energy.
    ///
    /// # Errors
    /// Propagates write and flush failures.
    pub fn write_table<W: Write>(&self, mut out: W) -> Result<()> {
        writeln!(out, "time\tangular_momentum\tmechanical_energy")?;
        for ((t, l), e) in self
            .times
            .iter()
            .zip(&self.angular_momentum)
            .zip(&self.mechanical_energy)
        {
            writeln!(out, "{t}\t{l}\t{e}")?;
        }
        out.flush()?;
        Ok(())
    }

    /// Write one tab-separated row per perihelion passage: time, distance.
    ///
    /// # Errors
    /// Propagates write and flush failures.
    pub fn write_perihelia<W: Write>(&self, mut out: W) -> Result<()> {
        writeln!(out, "time\tdistance")?;
        for p in &self.perihelia {
            writeln!(out, "{}\t{}", p.time, p.distance)?;
        }
        out.flush()?;
        Ok(())
    }
}

/// Incremental [`DriftSeries`] builder fed one sample at a time.
#[derive(Clone, Debug)]
pub struct DriftAccumulator {
    options: DriftOptions,
    mass: f64,
    gm: f64,
    previous: Option<StateVector>,
    before_previous: Option<StateVector>,
    crossings: u32,
    series: DriftSeries,
}

impl DriftAccumulator {
    pub fn new(config: &OrbitConfig, options: &DriftOptions) -> Self {
        Self {
            options: *options,
            mass: config.secondary_mass,
            gm: config.gm(),
            previous: None,
            before_previous: None,
            crossings: 0,
            series: DriftSeries::default(),
        }
    }

    pub fn finish(self) -> DriftSeries {
        self.series
    }

    fn detect_perihelion(&mut self, state: &StateVector) -> Option<Perihelion> {
        match self.options.perihelion {
            PerihelionRule::OddAxisCrossings => {
                let prev = self.previous?;
                if !crosses_axis(prev.pos.y, state.pos.y) {
                    return None;
                }
                self.crossings += 1;
                (self.crossings % 2 == 1).then(|| Perihelion {
                    time: state.time,
                    distance: state.radius(),
                })
            }
            PerihelionRule::RadialMinimum => {
                let (before, prev) = (self.before_previous?, self.previous?);
                let r = prev.radius();
                (r < before.radius() && r <= state.radius()).then(|| Perihelion {
                    time: prev.time,
                    distance: r,
                })
            }
        }
    }
}

impl StateSink for DriftAccumulator {
    fn record(&mut self, state: &StateVector) {
        self.series.times.push(state.time);
        self.series
            .angular_momentum
            .push(self.options.angular_momentum.evaluate(state, self.mass));
        self.series
            .mechanical_energy
            .push(mechanical_energy(state, self.mass, self.gm));

        if let Some(perihelion) = self.detect_perihelion(state) {
            debug!(
                passage = self.series.perihelia.len() + 1,
                time = perihelion.time,
                distance = perihelion.distance,
                "Perihelion passage"
            );
            self.series.perihelia.push(perihelion);
        }

        self.before_previous = self.previous;
        self.previous = Some(*state);
    }
}
