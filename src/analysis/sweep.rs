//! Kepler's second law: the radius vector sweeps equal areas in equal times.
//!
//! Each step contributes the triangle spanned by two consecutive positions
//! and the primary. Its area comes from Heron's formula over the three side
//! lengths. For long, thin triangles Heron loses a few digits to
//! cancellation, which puts a floor of roughly 1e-12 under the relative
//! deviation no matter how small the step.

use glam::DVec2;

use super::report::{ConservationReport, Sampling};
use super::SeriesPoint;
use crate::error::Result;
use crate::trajectory::Trajectory;

/// Area swept between sample `index` and `index + 1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepSample {
    pub index: usize,
    pub point_a: DVec2,
    pub point_b: DVec2,
    /// m², never negative.
    pub triangle_area: f64,
}

/// Area of the triangle `a`, `b`, `c` from its side lengths.
pub fn heron_area(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    let ab = a.distance(b);
    let bc = b.distance(c);
    let ca = c.distance(a);
    let s = (ab + bc + ca) / 2.0;
    // Rounding can push a degenerate triangle slightly negative
    (s * (s - ab) * (s - bc) * (s - ca)).max(0.0).sqrt()
}

/// Swept-area queries over one trajectory.
#[derive(Clone, Copy, Debug)]
pub struct AreaSweepAnalyzer<'a> {
    trajectory: &'a Trajectory,
}

impl<'a> AreaSweepAnalyzer<'a> {
    pub fn new(trajectory: &'a Trajectory) -> Self {
        Self { trajectory }
    }

    fn sweep(&self, index: usize) -> SweepSample {
        let states = self.trajectory.states();
        let point_a = states[index].pos;
        let point_b = states[index + 1].pos;
        SweepSample {
            index,
            point_a,
            point_b,
            triangle_area: heron_area(point_a, point_b, DVec2::ZERO),
        }
    }

    /// Triangle swept during the step starting at `fraction` percent of the run.
    ///
    /// # Errors
    /// [`KeplerError::IndexOutOfRange`](crate::KeplerError::IndexOutOfRange)
    /// when `fraction` maps to the last sample (there is no following step)
    /// or lies outside `[0, 100)`.
    pub fn swept_area(&self, fraction: f64) -> Result<SweepSample> {
        let index = self.trajectory.index_with_margin(fraction, 1)?;
        Ok(self.sweep(index))
    }

    /// Area swept during every step, stamped with the step's start time.
    pub fn instantaneous_series(&self) -> Vec<SeriesPoint> {
        let states = self.trajectory.states();
        (0..states.len().saturating_sub(1))
            .map(|i| SeriesPoint {
                time: states[i].time,
                value: self.sweep(i).triangle_area,
            })
            .collect()
    }

    /// Running total of swept area against time, starting from zero at the
    /// first sample. Plotted against time it is a straight line when the
    /// second law holds.
    pub fn cumulative_area(&self) -> Vec<SeriesPoint> {
        let states = self.trajectory.states();
        let Some(first) = states.first() else {
            return Vec::new();
        };

        let origin = SeriesPoint {
            time: first.time,
            value: 0.0,
        };
        std::iter::once(origin)
            .chain(states.windows(2).scan(0.0, |total, pair| {
                *total += heron_area(pair[0].pos, pair[1].pos, DVec2::ZERO);
                Some(SeriesPoint {
                    time: pair[1].time,
                    value: *total,
                })
            }))
            .collect()
    }

    /// Spread of the per-step swept area over `sampling`.
    ///
    /// # Errors
    /// Invalid sampling, or a sampled fraction that maps to the last sample.
    pub fn report(&self, sampling: &Sampling) -> Result<ConservationReport> {
        ConservationReport::evaluate(|f| self.swept_area(f).map(|s| s.triangle_area), sampling)
    }
}
