//! End-to-end runs described by a single configuration document.

use exotherm_blackbody::{BlackbodyParameters, BlackbodyThermalModel};
use exotherm_core::errors::{ExothermError, ExothermResult};
use exotherm_core::surface::SurfaceGrid;
use exotherm_core::timeseries::TemperatureTimeSeries;
use exotherm_orbit::{orbit_sampling, KeplerianBody, KeplerianOrbitParameters};
use serde::{Deserialize, Serialize};

/// Resolution of the regular latitude/longitude grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceResolution {
    /// default: 18
    pub n_lat: usize,
    /// default: 36
    pub n_lon: usize,
}

impl Default for SurfaceResolution {
    fn default() -> Self {
        Self {
            n_lat: 18,
            n_lon: 36,
        }
    }
}

/// How many time samples to take, in samples per orbit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitSampling {
    /// default: 100
    pub steps_per_orbit: usize,
    /// default: 1
    pub n_orbits: usize,
}

impl Default for OrbitSampling {
    fn default() -> Self {
        Self {
            steps_per_orbit: 100,
            n_orbits: 1,
        }
    }
}

/// Everything needed to evolve one planet
///
/// ```toml
/// [orbit]
/// semi_major_axis = "0.03 AU"
/// eccentricity = 0.2
///
/// [thermal]
/// rotation_periods = ["5 h"]
/// albedos = [0.2, 0.4]
///
/// [surface]
/// n_lat = 9
/// n_lon = 18
///
/// [sampling]
/// steps_per_orbit = 50
/// n_orbits = 2
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub orbit: KeplerianOrbitParameters,
    pub thermal: BlackbodyParameters,
    pub surface: SurfaceResolution,
    pub sampling: OrbitSampling,
}

impl SimulationConfig {
    pub fn from_toml_str(text: &str) -> ExothermResult<Self> {
        toml::from_str(text).map_err(|e| ExothermError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> ExothermResult<String> {
        toml::to_string(self).map_err(|e| ExothermError::Config(e.to_string()))
    }

    /// Builds the body described by the orbit, surface and sampling sections.
    pub fn body(&self) -> ExothermResult<KeplerianBody> {
        let times = orbit_sampling(
            self.orbit.orbital_period,
            self.sampling.steps_per_orbit,
            self.sampling.n_orbits,
        )?;
        let surface = SurfaceGrid::regular(self.surface.n_lat, self.surface.n_lon)?;
        KeplerianBody::new(self.orbit.clone(), times, surface)
    }

    /// Builds the body and model and evolves the surface temperatures.
    pub fn run(&self) -> ExothermResult<TemperatureTimeSeries> {
        let body = self.body()?;
        let model = BlackbodyThermalModel::from_parameters(self.thermal.clone())?;
        log::info!(
            "Running {} parameter cell(s) for {} orbit(s)",
            model.grid().n_cells(),
            self.sampling.n_orbits
        );
        model.evolve(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use exotherm_core::body::PlanetaryBody;

    #[test]
    fn sections_default_independently() {
        let config = SimulationConfig::from_toml_str(
            r#"
            [sampling]
            steps_per_orbit = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.sampling.steps_per_orbit, 10);
        assert_eq!(config.sampling.n_orbits, 1);
        assert_eq!(config.surface, SurfaceResolution::default());
        assert_eq!(config.thermal, BlackbodyParameters::default());
    }

    #[test]
    fn round_trip() {
        let config = SimulationConfig::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(SimulationConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn bad_documents_are_config_errors() {
        assert!(matches!(
            SimulationConfig::from_toml_str("[orbit]\neccentricity = \"high\""),
            Err(ExothermError::Config(_))
        ));
    }

    #[test]
    fn run_from_toml() {
        let config = SimulationConfig::from_toml_str(
            r#"
            [orbit]
            semi_major_axis = "0.03 AU"
            orbital_period = "2 day"

            [thermal]
            rotation_periods = ["5 h", "-5 h"]
            albedos = [0.2, 0.4]

            [surface]
            n_lat = 6
            n_lon = 12

            [sampling]
            steps_per_orbit = 24
            n_orbits = 2
            "#,
        )
        .unwrap();

        let body = config.body().unwrap();
        assert_eq!(body.times().len(), 48);
        assert_relative_eq!(body.times().step().unwrap(), 7200.0);

        let series = config.run().unwrap();
        assert_eq!(series.len(), 48);
        assert_eq!(series.parameter_grid().shape(), [2, 1, 1, 2]);
        assert_eq!(series.surface_shape(), (6, 12));

        let (min, max) = series.bounds();
        assert_eq!(min, 1000.0);
        assert!(max > 1000.0);

        assert!(series.values().iter().all(|t| t.is_finite()));
    }

    #[test]
    fn wrong_units_surface_as_errors() {
        let config = SimulationConfig::from_toml_str(
            r#"
            [thermal]
            radiative_timescales = ["10 K"]
            "#,
        )
        .unwrap();
        assert!(matches!(
            config.run(),
            Err(ExothermError::DimensionMismatch { .. })
        ));
    }
}
