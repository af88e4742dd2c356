//! Keplerian ephemerides implementing [`PlanetaryBody`](exotherm_core::body::PlanetaryBody).
//!
//! The thermal models only consume the `PlanetaryBody` trait; this crate
//! provides a reference implementation for a planet on a fixed two-body
//! orbit, plus the sampling helpers used to lay out animation frames.

pub mod body;
pub mod kepler;

pub use body::{orbit_sampling, KeplerianBody, KeplerianOrbitParameters};
