//! Unit parsing, normalization, and conversion for thermal-model quantities.
//!
//! Every physical input to the model (rotation periods, timescales,
//! temperatures, stellar and orbital sizes) carries a unit string that is
//! parsed once at the interface boundary and converted to canonical SI
//! magnitudes (kelvin for temperature, radians for angle).
//!
//! ```
//! use exotherm_core::units::Unit;
//!
//! let u1 = Unit::parse("W/m^2").unwrap();
//! let u2 = Unit::parse("W / m ^ 2").unwrap();
//! assert_eq!(u1, u2);
//!
//! let au = Unit::parse("AU").unwrap();
//! let rsun = Unit::parse("R_sun").unwrap();
//! assert!((au.factor_to(&rsun).unwrap() - 215.03).abs() < 0.01);
//! ```
//!
//! # Supported units
//!
//! | Kind | Symbols |
//! |------|---------|
//! | Length | `m` (SI prefixes), `AU`, `R_sun`, `R_jup`, `R_earth` |
//! | Time | `s` (SI prefixes), `min`, `h`, `day`, `yr` |
//! | Temperature | `K` |
//! | Angle | `rad`, `deg` |
//! | Power, energy, mass | `W`, `J`, `g` (SI prefixes), `kg` |
//!
//! # Module Structure
//!
//! - [`dimension`]: Physical dimension exponents (M, L, T, Θ, A)
//! - [`registry`]: Known units with conversion factors
//! - [`parser`]: Unit string parsing with normalization
//! - [`conversion`]: the [`Unit`] type and conversion factors

pub mod conversion;
pub mod dimension;
pub mod parser;
pub mod registry;

pub use conversion::Unit;
pub use dimension::Dimension;
pub use parser::{ParseError, ParsedUnit};
pub use registry::{UnitInfo, UnitRegistry, UNIT_REGISTRY};
