//! Validated time samples.

use crate::errors::{ExothermError, ExothermResult};
use crate::quantity::Quantity;
use crate::units::Dimension;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Relative tolerance used when checking that samples are evenly spaced.
pub const UNIFORM_STEP_TOLERANCE: f64 = 1e-9;

/// Strictly increasing time samples, stored in seconds.
///
/// Construction rejects empty and non-monotonic samples. Uniform spacing is
/// only required by consumers that step through time, so it is checked by
/// [`TimeAxis::step`] rather than at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Array1<f64>", into = "Array1<f64>")]
pub struct TimeAxis {
    values: Array1<f64>,
}

impl TimeAxis {
    /// Creates an axis from samples in seconds.
    pub fn new(values: Array1<f64>) -> ExothermResult<Self> {
        if values.is_empty() {
            return Err(ExothermError::EmptyTimeAxis);
        }
        if let Some(bad) = values.iter().position(|v| !v.is_finite()) {
            return Err(ExothermError::invalid_parameter(
                "time sample",
                values[bad],
                "must be finite",
            ));
        }
        for index in 1..values.len() {
            if values[index] <= values[index - 1] {
                return Err(ExothermError::NonMonotonicTimeAxis {
                    index,
                    value: values[index],
                    previous: values[index - 1],
                });
            }
        }
        Ok(Self { values })
    }

    /// Creates an axis from samples expressed in `unit`.
    pub fn from_values(values: &[f64], unit: &str) -> ExothermResult<Self> {
        let factor = Quantity::new(1.0, unit)?.require(Dimension::TIME, "time axis")?;
        Self::new(values.iter().map(|v| v * factor).collect())
    }

    /// `count` samples starting at `start`, `step` apart.
    pub fn uniform(start: Quantity, step: Quantity, count: usize) -> ExothermResult<Self> {
        let start = start.require(Dimension::TIME, "time axis start")?;
        let step = step.require(Dimension::TIME, "time axis step")?;
        if step <= 0.0 {
            return Err(ExothermError::invalid_parameter(
                "time step",
                step,
                "must be positive",
            ));
        }
        Self::new(Array1::from_iter((0..count).map(|i| start + step * i as f64)))
    }

    /// Samples in seconds.
    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; kept for symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The uniform spacing in seconds, taken from the first two samples.
    ///
    /// # Errors
    ///
    /// Fails if there are fewer than two samples, or if any later spacing
    /// differs from the first by more than [`UNIFORM_STEP_TOLERANCE`]
    /// (relative).
    pub fn step(&self) -> ExothermResult<f64> {
        if self.values.len() < 2 {
            return Err(ExothermError::invalid_parameter(
                "time axis length",
                self.values.len() as f64,
                "at least two samples are needed to define a step",
            ));
        }
        let step = self.values[1] - self.values[0];
        for (index, pair) in self.values.windows(2).into_iter().enumerate().skip(1) {
            let found = pair[1] - pair[0];
            if (found - step).abs() > UNIFORM_STEP_TOLERANCE * step.abs() {
                return Err(ExothermError::NonUniformTimeAxis {
                    index,
                    expected: step,
                    found,
                });
            }
        }
        Ok(step)
    }
}

impl TryFrom<Array1<f64>> for TimeAxis {
    type Error = ExothermError;

    fn try_from(values: Array1<f64>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl From<TimeAxis> for Array1<f64> {
    fn from(axis: TimeAxis) -> Self {
        axis.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn hours_are_converted_to_seconds() {
        let axis = TimeAxis::from_values(&[0.0, 1.0, 2.0, 3.0], "h").unwrap();
        assert_eq!(axis.len(), 4);
        assert_eq!(axis.values(), &array![0.0, 3600.0, 7200.0, 10800.0]);
        assert_relative_eq!(axis.step().unwrap(), 3600.0);
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(
            TimeAxis::new(Array1::zeros(0)),
            Err(ExothermError::EmptyTimeAxis)
        );
    }

    #[test]
    fn rejects_non_monotonic() {
        let err = TimeAxis::new(array![0.0, 2.0, 1.0]).unwrap_err();
        assert_eq!(
            err,
            ExothermError::NonMonotonicTimeAxis {
                index: 2,
                value: 1.0,
                previous: 2.0
            }
        );
        assert!(TimeAxis::new(array![0.0, 0.0]).is_err());
    }

    #[test]
    fn rejects_wrong_unit() {
        assert!(matches!(
            TimeAxis::from_values(&[0.0, 1.0], "K"),
            Err(ExothermError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn non_uniform_step() {
        let axis = TimeAxis::new(array![0.0, 1.0, 2.0, 4.0]).unwrap();
        assert!(matches!(
            axis.step(),
            Err(ExothermError::NonUniformTimeAxis { index: 2, .. })
        ));
    }

    #[test]
    fn single_sample_has_no_step() {
        let axis = TimeAxis::new(array![5.0]).unwrap();
        assert!(axis.step().is_err());
    }

    #[test]
    fn uniform_constructor() {
        let axis = TimeAxis::uniform(
            Quantity::seconds(10.0),
            Quantity::new(1.0, "min").unwrap(),
            3,
        )
        .unwrap();
        assert_eq!(axis.values(), &array![10.0, 70.0, 130.0]);
        assert!(TimeAxis::uniform(Quantity::seconds(0.0), Quantity::seconds(1.0), 0).is_err());
    }
}
