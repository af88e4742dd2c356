//! Blackbody surface-temperature model for irradiated, rotating planets.
//!
//! The model has two stages:
//!
//! - [`equilibrium`]: the instantaneous radiative-equilibrium temperature
//!   (to the fourth power) at every surface point, time and parameter cell
//! - [`relaxation`]: explicit time stepping of the surface temperature
//!   towards that equilibrium, with an overshoot guard
//!
//! [`BlackbodyThermalModel`] bundles both behind a set of
//! [`BlackbodyParameters`].

pub mod equilibrium;
pub mod parameters;
pub mod relaxation;

pub use equilibrium::{equilibrium_temperatures4, EquilibriumField4};
pub use parameters::BlackbodyParameters;
pub use relaxation::{evolve_temperatures, evolve_temperatures_on_grid};

use exotherm_core::body::PlanetaryBody;
use exotherm_core::errors::ExothermResult;
use exotherm_core::parameter_grid::ParameterGrid;
use exotherm_core::timeseries::TemperatureTimeSeries;
use serde::{Deserialize, Serialize};

/// Blackbody thermal model over a sweep of parameters
///
/// The parameter grid is built and validated once, when the model is
/// created, and reused for every body the model is applied to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BlackbodyParameters", into = "BlackbodyParameters")]
pub struct BlackbodyThermalModel {
    parameters: BlackbodyParameters,
    grid: ParameterGrid,
}

impl BlackbodyThermalModel {
    pub fn from_parameters(parameters: BlackbodyParameters) -> ExothermResult<Self> {
        let grid = parameters.to_grid()?;
        Ok(Self { parameters, grid })
    }

    pub fn parameters(&self) -> &BlackbodyParameters {
        &self.parameters
    }

    pub fn grid(&self) -> &ParameterGrid {
        &self.grid
    }

    /// $T_{eq}^4$ for `body` over every parameter cell.
    pub fn equilibrium<B: PlanetaryBody + ?Sized>(
        &self,
        body: &B,
    ) -> ExothermResult<EquilibriumField4> {
        equilibrium_temperatures4(body, &self.grid)
    }

    /// Surface-temperature history of `body` over every parameter cell.
    pub fn evolve<B: PlanetaryBody + ?Sized>(
        &self,
        body: &B,
    ) -> ExothermResult<TemperatureTimeSeries> {
        evolve_temperatures_on_grid(body, &self.grid)
    }
}

impl TryFrom<BlackbodyParameters> for BlackbodyThermalModel {
    type Error = exotherm_core::errors::ExothermError;

    fn try_from(parameters: BlackbodyParameters) -> Result<Self, Self::Error> {
        Self::from_parameters(parameters)
    }
}

impl From<BlackbodyThermalModel> for BlackbodyParameters {
    fn from(model: BlackbodyThermalModel) -> Self {
        model.parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_parameters_give_a_single_cell() {
        let model = BlackbodyThermalModel::from_parameters(BlackbodyParameters::default()).unwrap();
        assert_eq!(model.grid().n_cells(), 1);
        assert_eq!(model.parameters(), &BlackbodyParameters::default());
    }

    #[test]
    fn deserialising_validates() {
        let model: BlackbodyThermalModel =
            serde_json::from_str(r#"{"albedos": [0.1, 0.2, 0.3]}"#).unwrap();
        assert_eq!(model.grid().shape(), [1, 1, 1, 3]);

        let invalid = serde_json::from_str::<BlackbodyThermalModel>(r#"{"albedos": [-0.1]}"#);
        assert!(invalid.is_err());
    }
}
