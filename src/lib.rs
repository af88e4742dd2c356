//! Surface temperatures of irradiated, rotating planets.
//!
//! The workspace is split into
//!
//! - [`exotherm_core`]: units, named axes, parameter grids and the
//!   [`PlanetaryBody`](prelude::PlanetaryBody) trait
//! - [`exotherm_orbit`]: a Keplerian [`PlanetaryBody`](prelude::PlanetaryBody)
//! - [`exotherm_blackbody`]: the equilibrium and radiative relaxation model
//!
//! [`simulation::SimulationConfig`] ties them together from one TOML document.
//!
//! ```
//! use exotherm::prelude::*;
//!
//! let times = TimeAxis::from_values(&[0.0, 1.0, 2.0, 3.0], "h").unwrap();
//! let surface = SurfaceGrid::regular(9, 18).unwrap();
//! let body = KeplerianBody::new(KeplerianOrbitParameters::default(), times, surface).unwrap();
//!
//! let series = evolve_temperatures(&body, &BlackbodyParameters::default()).unwrap();
//! assert_eq!(series.len(), 4);
//! assert!(series.frame(0).unwrap().iter().all(|&t| t == 1000.0));
//! ```

pub mod simulation;

pub use exotherm_blackbody;
pub use exotherm_core;
pub use exotherm_orbit;

pub mod prelude {
    pub use crate::simulation::{OrbitSampling, SimulationConfig, SurfaceResolution};
    pub use exotherm_blackbody::{
        equilibrium_temperatures4, evolve_temperatures, evolve_temperatures_on_grid,
        BlackbodyParameters, BlackbodyThermalModel, EquilibriumField4,
    };
    pub use exotherm_core::{
        ExothermError, ExothermResult, ParameterAxis, ParameterGrid, PlanetaryBody, Quantity,
        SurfaceGrid, TemperatureTimeSeries, TimeAxis,
    };
    pub use exotherm_orbit::{orbit_sampling, KeplerianBody, KeplerianOrbitParameters};
}
