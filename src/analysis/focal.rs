//! Kepler's first law: the sum of distances to both foci is constant.

use glam::DVec2;

use super::report::{ConservationReport, Sampling};
use super::SeriesPoint;
use crate::error::Result;
use crate::geometry::FocusPair;
use crate::trajectory::Trajectory;

/// Distances from one trajectory sample to both foci.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocalSample {
    pub index: usize,
    pub point: DVec2,
    pub distance_to_primary: f64,
    pub distance_to_secondary: f64,
    /// Approaches twice the semi-major axis for a well-resolved ellipse.
    pub sum: f64,
}

/// Focal-distance queries over one trajectory.
#[derive(Clone, Copy, Debug)]
pub struct FocalDistanceAnalyzer<'a> {
    trajectory: &'a Trajectory,
    foci: FocusPair,
}

impl<'a> FocalDistanceAnalyzer<'a> {
    /// Analyzer using the trajectory's cached foci.
    pub fn new(trajectory: &'a Trajectory) -> Self {
        Self::with_foci(trajectory, *trajectory.foci())
    }

    /// Analyzer using externally supplied foci.
    pub fn with_foci(trajectory: &'a Trajectory, foci: FocusPair) -> Self {
        Self { trajectory, foci }
    }

    pub fn foci(&self) -> &FocusPair {
        &self.foci
    }

    /// Point at `fraction` percent of the run and its focal distances.
    ///
    /// # Errors
    /// [`KeplerError::IndexOutOfRange`](crate::KeplerError::IndexOutOfRange)
    /// unless `fraction` is in `[0, 100)`.
    pub fn at(&self, fraction: f64) -> Result<FocalSample> {
        let index = self.trajectory.index_at(fraction)?;
        let point = self.trajectory.states()[index].pos;
        Ok(self.measure(index, point))
    }

    fn measure(&self, index: usize, point: DVec2) -> FocalSample {
        let distance_to_primary = point.distance(self.foci.primary);
        let distance_to_secondary = point.distance(self.foci.secondary);
        FocalSample {
            index,
            point,
            distance_to_primary,
            distance_to_secondary,
            sum: distance_to_primary + distance_to_secondary,
        }
    }

    /// Focal-distance sum at every sample, against time.
    pub fn series(&self) -> Vec<SeriesPoint> {
        self.trajectory
            .states()
            .iter()
            .enumerate()
            .map(|(i, s)| SeriesPoint {
                time: s.time,
                value: self.measure(i, s.pos).sum,
            })
            .collect()
    }

    /// Spread of the focal-distance sum over `sampling`.
    ///
    /// # Errors
    /// Invalid sampling or an empty trajectory.
    pub fn report(&self, sampling: &Sampling) -> Result<ConservationReport> {
        ConservationReport::evaluate(|f| self.at(f).map(|s| s.sum), sampling)
    }
}
