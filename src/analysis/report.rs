//! Relative-deviation statistic over a sampled scalar series.

use crate::error::{KeplerError, Result};

/// Fractional positions (percent of the run) at which a series is sampled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sampling {
    /// Increment between fractions. Default: 0.2.
    pub step: f64,
    /// First fraction. Default: 0.
    pub start: f64,
    /// Exclusive upper bound. Default: 100.
    pub end: f64,
}

impl Default for Sampling {
    fn default() -> Self {
        Self {
            step: 0.2,
            start: 0.0,
            end: 100.0,
        }
    }
}

impl Sampling {
    /// Most fractions a single report may evaluate.
    pub const MAX_SAMPLES: f64 = 1e7;

    /// # Errors
    /// [`KeplerError::InvalidParameter`] for a non-positive step, an empty
    /// range, or a step so fine that it exceeds [`Self::MAX_SAMPLES`].
    pub fn validate(&self) -> Result<()> {
        if !(self.step > 0.0 && self.step.is_finite()) {
            return Err(KeplerError::InvalidParameter {
                name: "step",
                value: self.step,
                reason: "sampling step must be positive and finite",
            });
        }
        if !(self.start.is_finite() && self.end.is_finite() && self.start < self.end) {
            return Err(KeplerError::InvalidParameter {
                name: "end",
                value: self.end,
                reason: "sampling range must be non-empty",
            });
        }
        if (self.end - self.start) / self.step > Self::MAX_SAMPLES {
            return Err(KeplerError::InvalidParameter {
                name: "step",
                value: self.step,
                reason: "sampling step yields more than 1e7 samples",
            });
        }
        Ok(())
    }

    /// `start, start + step, …` while below `end`.
    ///
    /// Each fraction is computed as `start + k·step` so rounding does not
    /// accumulate.
    pub fn fractions(&self) -> impl Iterator<Item = f64> + use<> {
        let Self { step, start, end } = *self;
        (0u64..)
            .map(move |k| start + k as f64 * step)
            .take_while(move |&f| f < end)
    }
}

/// Spread of a conserved quantity over a sampled run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConservationReport {
    pub minimum: f64,
    pub maximum: f64,
    /// `((max − min) / 2) / (max − (max − min) / 2)`: half the range over the
    /// midpoint. Zero when the series is constant.
    pub relative_deviation: f64,
    /// Number of values that went into the report.
    pub samples: usize,
}

impl ConservationReport {
    /// Sample `generator` at every fraction of `sampling`, keeping only the
    /// running minimum and maximum.
    ///
    /// # Errors
    /// Invalid sampling, or the first error returned by `generator`.
    pub fn evaluate<F>(mut generator: F, sampling: &Sampling) -> Result<Self>
    where
        F: FnMut(f64) -> Result<f64>,
    {
        sampling.validate()?;

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut samples = 0;

        for fraction in sampling.fractions() {
            let value = generator(fraction)?;
            min = min.min(value);
            max = max.max(value);
            samples += 1;
        }

        Ok(Self::from_extremes(min, max, samples))
    }

    /// Report over an already materialized series, or `None` if it is empty.
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let (min, max, samples) = values.into_iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0),
            |(min, max, n), v| (min.min(v), max.max(v), n + 1),
        );
        (samples > 0).then(|| Self::from_extremes(min, max, samples))
    }

    fn from_extremes(minimum: f64, maximum: f64, samples: usize) -> Self {
        let half_range = (maximum - minimum).abs() / 2.0;
        let midpoint = maximum - half_range;
        let relative_deviation = if half_range == 0.0 {
            0.0
        } else {
            (half_range / midpoint).abs()
        };

        Self {
            minimum,
            maximum,
            relative_deviation,
            samples,
        }
    }

    /// Midpoint of the sampled range.
    pub fn midpoint(&self) -> f64 {
        (self.minimum + self.maximum) / 2.0
    }
}
