//! Parameter vectors swept by the blackbody model.

use exotherm_core::errors::{ExothermError, ExothermResult};
use exotherm_core::parameter_grid::ParameterGrid;
use exotherm_core::quantity::Quantity;
use exotherm_core::units::registry::SECONDS_PER_HOUR;
use exotherm_core::units::Dimension;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Parameters for the blackbody thermal model
///
/// Each field is a vector; the model evaluates every combination of the
/// four vectors (see [`ParameterGrid`]).
///
/// ```toml
/// rotation_periods = ["5 h", "10 h"]
/// radiative_timescales = ["10 h"]
/// nightside_temperatures = ["1000 K"]
/// albedos = [0.2, 0.5]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlackbodyParameters {
    /// Planetary rotation periods, negative for retrograde spin
    /// unit: time
    /// default: [5 h]
    pub rotation_periods: Vec<Quantity>,

    /// Radiative relaxation timescale at a temperature of 1000 K
    /// unit: time
    /// default: [10 h]
    pub radiative_timescales: Vec<Quantity>,

    /// Minimum ("nightside") temperature, also the initial temperature
    /// unit: K
    /// default: [1000 K]
    pub nightside_temperatures: Vec<Quantity>,

    /// Bond albedos
    /// unit: dimensionless
    /// default: [0.2]
    pub albedos: Vec<f64>,
}

impl Default for BlackbodyParameters {
    fn default() -> Self {
        Self {
            rotation_periods: vec![Quantity::seconds(5.0 * SECONDS_PER_HOUR)],
            radiative_timescales: vec![Quantity::seconds(10.0 * SECONDS_PER_HOUR)],
            nightside_temperatures: vec![Quantity::kelvin(1000.0)],
            albedos: vec![0.2],
        }
    }
}

impl BlackbodyParameters {
    /// Checks units and values, and builds the outer-product grid.
    pub fn to_grid(&self) -> ExothermResult<ParameterGrid> {
        ParameterGrid::new(
            si_values(&self.rotation_periods, Dimension::TIME, "rotation period")?,
            si_values(
                &self.radiative_timescales,
                Dimension::TIME,
                "radiative timescale at 1000 K",
            )?,
            si_values(
                &self.nightside_temperatures,
                Dimension::TEMPERATURE,
                "nightside temperature",
            )?,
            Array1::from_vec(self.albedos.clone()),
        )
    }

    pub fn from_toml_str(text: &str) -> ExothermResult<Self> {
        toml::from_str(text).map_err(|e| ExothermError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> ExothermResult<String> {
        toml::to_string(self).map_err(|e| ExothermError::Config(e.to_string()))
    }
}

fn si_values(
    quantities: &[Quantity],
    dimension: Dimension,
    context: &str,
) -> ExothermResult<Array1<f64>> {
    quantities
        .iter()
        .map(|q| q.require(dimension, context))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_is_a_single_cell() {
        let grid = BlackbodyParameters::default().to_grid().unwrap();
        assert_eq!(grid.shape(), [1, 1, 1, 1]);
        let cell = grid.cell(0).unwrap();
        assert_eq!(cell.rotation_period, 18000.0);
        assert_eq!(cell.radiative_timescale, 36000.0);
        assert_eq!(cell.nightside_temperature, 1000.0);
        assert_eq!(cell.albedo, 0.2);
    }

    #[test]
    fn toml_fills_missing_fields_with_defaults() {
        let parameters = BlackbodyParameters::from_toml_str(
            r#"
            rotation_periods = ["5 h", "1 day"]
            albedos = [0.0, 0.3, 1.0]
            "#,
        )
        .unwrap();
        assert_eq!(parameters.rotation_periods[1].si_value(), 86400.0);
        assert_eq!(
            parameters.radiative_timescales,
            BlackbodyParameters::default().radiative_timescales
        );
        assert_eq!(parameters.to_grid().unwrap().shape(), [2, 1, 1, 3]);
    }

    #[test]
    fn toml_round_trip() {
        let parameters = BlackbodyParameters {
            nightside_temperatures: vec![Quantity::kelvin(0.0), Quantity::kelvin(800.0)],
            ..Default::default()
        };
        let text = parameters.to_toml_string().unwrap();
        assert_eq!(BlackbodyParameters::from_toml_str(&text).unwrap(), parameters);
    }

    #[test]
    fn wrong_units_rejected() {
        let parameters = BlackbodyParameters::from_toml_str(r#"rotation_periods = ["5 K"]"#)
            .unwrap();
        assert!(matches!(
            parameters.to_grid(),
            Err(ExothermError::DimensionMismatch { .. })
        ));

        assert!(matches!(
            BlackbodyParameters::from_toml_str(r#"rotation_periods = ["5 parsecs"]"#),
            Err(ExothermError::Config(_))
        ));
    }

    #[test]
    fn invalid_values_rejected() {
        let parameters = BlackbodyParameters {
            albedos: vec![1.5],
            ..Default::default()
        };
        assert!(matches!(
            parameters.to_grid(),
            Err(ExothermError::InvalidParameter { .. })
        ));

        let parameters = BlackbodyParameters {
            radiative_timescales: vec![],
            ..Default::default()
        };
        assert!(parameters.to_grid().is_err());
    }
}
