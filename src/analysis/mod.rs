//! Empirical checks of Kepler's first and second laws over a finished run.
//!
//! Analyzers borrow a [`Trajectory`](crate::trajectory::Trajectory) and never
//! mutate it. Point queries take a fractional position in percent; the
//! `report` methods fold those queries into a [`ConservationReport`].

mod focal;
mod report;
mod sweep;

pub use focal::{FocalDistanceAnalyzer, FocalSample};
pub use report::{ConservationReport, Sampling};
pub use sweep::{heron_area, AreaSweepAnalyzer, SweepSample};

/// One `(time, value)` pair of a plotted series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesPoint {
    /// Seconds since the start of the run.
    pub time: f64,
    pub value: f64,
}
