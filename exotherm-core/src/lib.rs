//! Core types for simulating the surface temperatures of irradiated,
//! rotating planets.
//!
//! - [`units`] and [`quantity`]: dimensioned values checked at interface boundaries
//! - [`time_axis`], [`surface`], [`parameter_grid`]: the named axes every field is indexed by
//! - [`body`]: the [`PlanetaryBody`](body::PlanetaryBody) ephemeris collaborator
//! - [`timeseries`]: the write-once surface-temperature output

pub mod body;
pub mod errors;
pub mod parameter_grid;
pub mod quantity;
pub mod surface;
pub mod time_axis;
pub mod timeseries;
pub mod units;

pub use body::PlanetaryBody;
pub use errors::{ExothermError, ExothermResult};
pub use parameter_grid::{ParameterAxis, ParameterCell, ParameterGrid};
pub use quantity::Quantity;
pub use surface::SurfaceGrid;
pub use time_axis::TimeAxis;
pub use timeseries::{TemperatureSeriesWriter, TemperatureTimeSeries};
