//! Orbit termination policies.
//!
//! Fixed-size steps almost never land on the exact starting point again, so
//! "one revolution done" has to be decided by a heuristic. Each heuristic is a
//! named variant here rather than an inline conditional in the run loop. All
//! of them look only at the first two samples, the previous sample and a
//! running counter, which keeps the integration loop streaming.

use crate::types::StateVector;

/// How a run decides it is complete.
///
/// Every policy is additionally guarded by the iteration cap in
/// [`OrbitConfig`](super::OrbitConfig).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TerminationPolicy {
    #[default]
    /// Stop once the new position falls inside the half-open bracket spanned
    /// by the first two samples, component-wise. Detects the return to the
    /// starting neighbourhood after one revolution.
    BoundingRevisit,
    /// Stop after `crossings` sign changes of `y`. Two crossings make one
    /// revolution.
    AxisCrossing { crossings: u32 },
    /// Run until the iteration cap without testing for closure.
    FixedSteps,
}

impl TerminationPolicy {
    /// Axis-crossing policy covering `revolutions` full orbits.
    pub const fn revolutions(revolutions: u32) -> Self {
        Self::AxisCrossing {
            crossings: revolutions * 2,
        }
    }
}

/// How a finished run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStatus {
    /// The termination policy was satisfied.
    Closed,
    /// A [`TerminationPolicy::FixedSteps`] run used its whole budget, as intended.
    StepBudgetSpent,
    /// The iteration cap was hit before the policy was satisfied. The
    /// trajectory is partial.
    NonConvergent,
}

impl RunStatus {
    pub fn is_converged(self) -> bool {
        !matches!(self, Self::NonConvergent)
    }
}

/// Whether `y` changed sign (or landed exactly on zero) between two samples.
#[inline]
pub fn crosses_axis(prev_y: f64, y: f64) -> bool {
    (prev_y < 0.0 && y >= 0.0) || (prev_y > 0.0 && y <= 0.0)
}

/// `value` lies in the half-open interval starting at `from` and extending
/// toward `to`.
#[inline]
fn within_bracket(value: f64, from: f64, to: f64) -> bool {
    if to >= from {
        from <= value && value < to
    } else {
        to < value && value <= from
    }
}

/// Running state of a termination policy during one integration run.
#[derive(Clone, Debug)]
pub struct TerminationTracker {
    policy: TerminationPolicy,
    first: Option<StateVector>,
    second: Option<StateVector>,
    previous: Option<StateVector>,
    crossings: u32,
}

impl TerminationTracker {
    pub fn new(policy: TerminationPolicy) -> Self {
        Self {
            policy,
            first: None,
            second: None,
            previous: None,
            crossings: 0,
        }
    }

    /// Number of axis crossings seen so far, whatever the policy.
    pub fn crossings(&self) -> u32 {
        self.crossings
    }

    /// Feed the next sample; returns `true` when the run is complete.
    ///
    /// The initial condition must be observed first.
    pub fn observe(&mut self, state: &StateVector) -> bool {
        if let Some(prev) = self.previous
            && crosses_axis(prev.pos.y, state.pos.y)
        {
            self.crossings += 1;
        }

        let done = match self.policy {
            TerminationPolicy::BoundingRevisit => match (self.first, self.second) {
                (Some(s0), Some(s1)) => {
                    within_bracket(state.pos.x, s0.pos.x, s1.pos.x)
                        && within_bracket(state.pos.y, s0.pos.y, s1.pos.y)
                }
                _ => false,
            },
            TerminationPolicy::AxisCrossing { crossings } => self.crossings >= crossings,
            TerminationPolicy::FixedSteps => false,
        };

        if self.first.is_none() {
            self.first = Some(*state);
        } else if self.second.is_none() {
            self.second = Some(*state);
        }
        self.previous = Some(*state);

        done
    }
}
