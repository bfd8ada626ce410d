//! Orbit geometry derived from a trajectory's coordinate extrema.
//!
//! The primary focus is the origin. The ellipse's centre is estimated as the
//! middle of the trajectory's bounding box, and reflecting the origin through
//! that centre gives the second focus. The estimate is only as good as the
//! bounding box: coarse sampling or an orbit that does not close shifts it.

use glam::DVec2;

use crate::error::{KeplerError, Result};
use crate::physics::RunStatus;
use crate::trajectory::Trajectory;

/// Axis-aligned bounding box of all recorded positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extremes {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Extremes {
    /// Bounding box of `positions`, or `None` when there are none.
    pub fn of<I>(positions: I) -> Option<Self>
    where
        I: IntoIterator<Item = DVec2>,
    {
        positions.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Self {
                    x_min: p.x,
                    x_max: p.x,
                    y_min: p.y,
                    y_max: p.y,
                },
                Some(e) => Self {
                    x_min: e.x_min.min(p.x),
                    x_max: e.x_max.max(p.x),
                    y_min: e.y_min.min(p.y),
                    y_max: e.y_max.max(p.y),
                },
            })
        })
    }

    /// Geometric centre of the box.
    pub fn center(&self) -> DVec2 {
        DVec2::new(
            (self.x_min + self.x_max) * 0.5,
            (self.y_min + self.y_max) * 0.5,
        )
    }
}

/// The two foci of the orbital ellipse.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocusPair {
    /// The primary body, fixed at the origin.
    pub primary: DVec2,
    /// Derived second focus.
    pub secondary: DVec2,
}

impl FocusPair {
    /// Distance between the foci (2·a·e for a Keplerian ellipse).
    pub fn separation(&self) -> f64 {
        self.primary.distance(self.secondary)
    }
}

/// Second focus from the trajectory's extrema:
/// `(x_min + x_max, y_min + y_max)`.
///
/// No validation is done; an empty trajectory yields a degenerate pair with
/// both foci at the origin. See [`checked_second_focus`].
pub fn second_focus(trajectory: &Trajectory) -> FocusPair {
    let secondary = Extremes::of(trajectory.states().iter().map(|s| s.pos))
        .map_or(DVec2::ZERO, |e| DVec2::new(e.x_min + e.x_max, e.y_min + e.y_max));

    FocusPair {
        primary: DVec2::ZERO,
        secondary,
    }
}

/// [`second_focus`], refusing trajectories whose extrema cannot be trusted.
///
/// # Errors
/// [`KeplerError::EmptyTrajectory`] without samples and
/// [`KeplerError::NonConvergentOrbit`] when the run hit its iteration cap
/// before closing.
pub fn checked_second_focus(trajectory: &Trajectory) -> Result<FocusPair> {
    if trajectory.is_empty() {
        return Err(KeplerError::EmptyTrajectory);
    }
    if trajectory.status() == RunStatus::NonConvergent {
        return Err(KeplerError::NonConvergentOrbit {
            steps: trajectory.len() - 1,
        });
    }
    Ok(second_focus(trajectory))
}
