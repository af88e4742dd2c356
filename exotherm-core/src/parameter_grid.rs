//! Outer-product grids of physical parameter combinations.
//!
//! A sweep over rotation period, reference radiative timescale, nightside
//! temperature and albedo is realised as one grid holding every combination
//! of the four input vectors. The grid has the named shape
//!
//! $$(n_{P_{rot}}, n_{t_{1000}}, n_{T_n}, n_{A})$$
//!
//! and its cells are flattened in row-major order (albedo varies fastest)
//! into a single parameter-combination axis. Every field in the workspace
//! uses that flat `cell` index as its parameter axis; [`ParameterGrid`]
//! converts between flat and multi-dimensional indices.

use crate::errors::{ExothermError, ExothermResult};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four swept parameters, in grid axis order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterAxis {
    RotationPeriod = 0,
    RadiativeTimescale = 1,
    NightsideTemperature = 2,
    Albedo = 3,
}

impl ParameterAxis {
    pub const ALL: [ParameterAxis; 4] = [
        ParameterAxis::RotationPeriod,
        ParameterAxis::RadiativeTimescale,
        ParameterAxis::NightsideTemperature,
        ParameterAxis::Albedo,
    ];
}

impl From<ParameterAxis> for usize {
    fn from(axis: ParameterAxis) -> usize {
        axis as usize
    }
}

impl fmt::Display for ParameterAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParameterAxis::RotationPeriod => "rotation period",
            ParameterAxis::RadiativeTimescale => "radiative timescale at 1000 K",
            ParameterAxis::NightsideTemperature => "nightside temperature",
            ParameterAxis::Albedo => "albedo",
        };
        write!(f, "{name}")
    }
}

/// The parameter values of a single grid cell, in SI units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterCell {
    /// Rotation period (s).
    pub rotation_period: f64,
    /// Radiative timescale at 1000 K (s).
    pub radiative_timescale: f64,
    /// Nightside floor temperature (K).
    pub nightside_temperature: f64,
    /// Bond albedo.
    pub albedo: f64,
}

/// Full outer product of the four parameter vectors.
///
/// Values are validated on construction:
///
/// - every vector is non-empty
/// - rotation periods are finite and non-zero (negative means retrograde)
/// - radiative timescales are finite and positive
/// - nightside temperatures are finite and non-negative
/// - albedos lie in `[0, 1]`
///
/// Deserialisation goes through the same checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ParameterGridFields")]
pub struct ParameterGrid {
    rotation_periods: Array1<f64>,
    radiative_timescales: Array1<f64>,
    nightside_temperatures: Array1<f64>,
    albedos: Array1<f64>,
}

#[derive(Deserialize)]
struct ParameterGridFields {
    rotation_periods: Array1<f64>,
    radiative_timescales: Array1<f64>,
    nightside_temperatures: Array1<f64>,
    albedos: Array1<f64>,
}

impl TryFrom<ParameterGridFields> for ParameterGrid {
    type Error = ExothermError;

    fn try_from(fields: ParameterGridFields) -> Result<Self, Self::Error> {
        Self::new(
            fields.rotation_periods,
            fields.radiative_timescales,
            fields.nightside_temperatures,
            fields.albedos,
        )
    }
}

impl ParameterGrid {
    /// Builds the grid from SI magnitudes: seconds, seconds, kelvin, and
    /// dimensionless albedo.
    pub fn new(
        rotation_periods: Array1<f64>,
        radiative_timescales: Array1<f64>,
        nightside_temperatures: Array1<f64>,
        albedos: Array1<f64>,
    ) -> ExothermResult<Self> {
        check_each(
            &rotation_periods,
            ParameterAxis::RotationPeriod,
            "must be finite and non-zero",
            |v| v.is_finite() && v != 0.0,
        )?;
        check_each(
            &radiative_timescales,
            ParameterAxis::RadiativeTimescale,
            "must be positive",
            |v| v.is_finite() && v > 0.0,
        )?;
        check_each(
            &nightside_temperatures,
            ParameterAxis::NightsideTemperature,
            "must be non-negative",
            |v| v.is_finite() && v >= 0.0,
        )?;
        check_each(
            &albedos,
            ParameterAxis::Albedo,
            "must lie in [0, 1]",
            |v| (0.0..=1.0).contains(&v),
        )?;

        let grid = Self {
            rotation_periods,
            radiative_timescales,
            nightside_temperatures,
            albedos,
        };
        log::debug!(
            "Parameter grid of shape {:?} ({} cells)",
            grid.shape(),
            grid.n_cells()
        );
        Ok(grid)
    }

    /// `(len(prot), len(t1000), len(Tn), len(albedo))`.
    pub fn shape(&self) -> [usize; 4] {
        [
            self.rotation_periods.len(),
            self.radiative_timescales.len(),
            self.nightside_temperatures.len(),
            self.albedos.len(),
        ]
    }

    /// Number of parameter combinations.
    pub fn n_cells(&self) -> usize {
        self.shape().iter().product()
    }

    /// The input vector for one axis.
    pub fn axis_values(&self, axis: ParameterAxis) -> &Array1<f64> {
        match axis {
            ParameterAxis::RotationPeriod => &self.rotation_periods,
            ParameterAxis::RadiativeTimescale => &self.radiative_timescales,
            ParameterAxis::NightsideTemperature => &self.nightside_temperatures,
            ParameterAxis::Albedo => &self.albedos,
        }
    }

    /// Flat cell index of a multi-index.
    pub fn flat_index(&self, index: [usize; 4]) -> ExothermResult<usize> {
        let shape = self.shape();
        if index.iter().zip(shape.iter()).any(|(i, n)| i >= n) {
            return Err(ExothermError::shape_mismatch(
                "parameter grid index",
                &shape,
                &index,
            ));
        }
        Ok(index
            .iter()
            .zip(shape.iter())
            .fold(0, |flat, (i, n)| flat * n + i))
    }

    /// Multi-index `[prot, t1000, Tn, albedo]` of a flat cell index.
    pub fn multi_index(&self, cell: usize) -> ExothermResult<[usize; 4]> {
        let shape = self.shape();
        if cell >= self.n_cells() {
            return Err(ExothermError::shape_mismatch(
                "parameter grid cell",
                &[self.n_cells()],
                &[cell],
            ));
        }
        let mut index = [0; 4];
        let mut rest = cell;
        for axis in (0..4).rev() {
            index[axis] = rest % shape[axis];
            rest /= shape[axis];
        }
        Ok(index)
    }

    pub fn cell(&self, cell: usize) -> ExothermResult<ParameterCell> {
        let [p, t, n, a] = self.multi_index(cell)?;
        Ok(ParameterCell {
            rotation_period: self.rotation_periods[p],
            radiative_timescale: self.radiative_timescales[t],
            nightside_temperature: self.nightside_temperatures[n],
            albedo: self.albedos[a],
        })
    }

    /// Every cell in flat order.
    pub fn cells(&self) -> impl Iterator<Item = ParameterCell> + '_ {
        let [np, nt, nn, na] = self.shape();
        (0..np).flat_map(move |p| {
            (0..nt).flat_map(move |t| {
                (0..nn).flat_map(move |n| {
                    (0..na).map(move |a| ParameterCell {
                        rotation_period: self.rotation_periods[p],
                        radiative_timescale: self.radiative_timescales[t],
                        nightside_temperature: self.nightside_temperatures[n],
                        albedo: self.albedos[a],
                    })
                })
            })
        })
    }

    /// The value of `axis` in every cell, as a vector of length `n_cells`.
    ///
    /// This is the explicit broadcast of one input vector over the grid.
    pub fn broadcast(&self, axis: ParameterAxis) -> Array1<f64> {
        let shape = self.shape();
        let axis_index = usize::from(axis);
        let inner: usize = shape[axis_index + 1..].iter().product();
        let values = self.axis_values(axis);
        Array1::from_shape_fn(self.n_cells(), |cell| {
            values[(cell / inner) % shape[axis_index]]
        })
    }

    /// Flat index of the rotation period used by each cell.
    ///
    /// Lets consumers compute rotation-dependent quantities once per distinct
    /// period instead of once per cell.
    pub fn rotation_index(&self, cell: usize) -> usize {
        let [_, nt, nn, na] = self.shape();
        cell / (nt * nn * na)
    }
}

fn check_each(
    values: &Array1<f64>,
    axis: ParameterAxis,
    reason: &str,
    valid: impl Fn(f64) -> bool,
) -> ExothermResult<()> {
    if values.is_empty() {
        return Err(ExothermError::invalid_parameter(
            &axis.to_string(),
            f64::NAN,
            "at least one value is required",
        ));
    }
    match values.iter().find(|v| !valid(**v)) {
        Some(bad) => Err(ExothermError::invalid_parameter(
            &axis.to_string(),
            *bad,
            reason,
        )),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn grid_2x3x1x2() -> ParameterGrid {
        ParameterGrid::new(
            array![1.0, 2.0],
            array![10.0, 20.0, 30.0],
            array![500.0],
            array![0.0, 0.5],
        )
        .unwrap()
    }

    #[test]
    fn shape_and_cell_count() {
        let grid = grid_2x3x1x2();
        assert_eq!(grid.shape(), [2, 3, 1, 2]);
        assert_eq!(grid.n_cells(), 12);
        assert_eq!(grid.cells().count(), 12);
    }

    #[test]
    fn albedo_varies_fastest() {
        let grid = grid_2x3x1x2();
        let first = grid.cell(0).unwrap();
        let second = grid.cell(1).unwrap();
        assert_eq!(first.albedo, 0.0);
        assert_eq!(second.albedo, 0.5);
        assert_eq!(first.radiative_timescale, second.radiative_timescale);
        assert_eq!(grid.cell(2).unwrap().radiative_timescale, 20.0);
        assert_eq!(grid.cell(6).unwrap().rotation_period, 2.0);
    }

    #[test]
    fn flat_and_multi_index_agree() {
        let grid = grid_2x3x1x2();
        for cell in 0..grid.n_cells() {
            let index = grid.multi_index(cell).unwrap();
            assert_eq!(grid.flat_index(index).unwrap(), cell);
        }
        assert_eq!(grid.multi_index(11).unwrap(), [1, 2, 0, 1]);
        assert!(grid.flat_index([2, 0, 0, 0]).is_err());
        assert!(grid.multi_index(12).is_err());
    }

    #[test]
    fn cells_iterator_matches_cell_lookup() {
        let grid = grid_2x3x1x2();
        for (index, cell) in grid.cells().enumerate() {
            assert_eq!(cell, grid.cell(index).unwrap());
        }
    }

    #[test]
    fn broadcast_matches_cells() {
        let grid = grid_2x3x1x2();
        let timescales = grid.broadcast(ParameterAxis::RadiativeTimescale);
        let albedos = grid.broadcast(ParameterAxis::Albedo);
        for (index, cell) in grid.cells().enumerate() {
            assert_eq!(timescales[index], cell.radiative_timescale);
            assert_eq!(albedos[index], cell.albedo);
            assert_eq!(
                grid.rotation_index(index),
                grid.multi_index(index).unwrap()[0]
            );
        }
    }

    #[test]
    fn invalid_values_rejected() {
        let bad_albedo = ParameterGrid::new(array![1.0], array![1.0], array![0.0], array![1.2]);
        assert!(matches!(
            bad_albedo,
            Err(ExothermError::InvalidParameter { ref name, value, .. })
                if name == "albedo" && value == 1.2
        ));

        let bad_timescale = ParameterGrid::new(array![1.0], array![0.0], array![0.0], array![0.2]);
        assert!(bad_timescale.is_err());

        let bad_period = ParameterGrid::new(array![0.0], array![1.0], array![0.0], array![0.2]);
        assert!(bad_period.is_err());

        let bad_floor = ParameterGrid::new(array![1.0], array![1.0], array![-1.0], array![0.2]);
        assert!(bad_floor.is_err());

        let empty = ParameterGrid::new(Array1::zeros(0), array![1.0], array![0.0], array![0.2]);
        assert!(empty.is_err());
    }

    #[test]
    fn deserialisation_validates() {
        let grid = grid_2x3x1x2();
        let text = serde_json::to_string(&grid).unwrap();
        let back: ParameterGrid = serde_json::from_str(&text).unwrap();
        assert_eq!(back, grid);

        let mut value: serde_json::Value = serde_json::from_str(&text).unwrap();
        value["albedos"] = serde_json::to_value(array![0.2, 1.5]).unwrap();
        let err = serde_json::from_value::<ParameterGrid>(value).unwrap_err();
        assert!(err.to_string().contains("albedo"), "{err}");

        let mut value: serde_json::Value = serde_json::from_str(&text).unwrap();
        value["radiative_timescales"] = serde_json::to_value(array![-36000.0]).unwrap();
        assert!(serde_json::from_value::<ParameterGrid>(value).is_err());
    }
}
