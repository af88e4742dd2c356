//! The ephemeris collaborator consumed by the thermal model.
//!
//! The thermal model never propagates orbits. Everything it needs about the
//! star, the orbit and the planet's surface comes through [`PlanetaryBody`].
//! Accessors return [`Quantity`] values so that units are checked where they
//! cross into the numerical core; the array-valued ephemeris functions return
//! radians.

use crate::errors::{ExothermError, ExothermResult};
use crate::quantity::Quantity;
use crate::surface::SurfaceGrid;
use crate::time_axis::TimeAxis;
use crate::units::Dimension;
use ndarray::Array1;

/// A planet on a (possibly eccentric) orbit around a star, with a
/// latitude/longitude surface grid and a set of time samples.
pub trait PlanetaryBody {
    /// Radius of the host star (length).
    fn stellar_radius(&self) -> Quantity;

    /// Effective temperature of the host star (temperature).
    fn stellar_effective_temperature(&self) -> Quantity;

    /// Orbital semi-major axis (length).
    fn semi_major_axis(&self) -> Quantity;

    /// Orbital eccentricity, expected in `[0, 1)`.
    fn eccentricity(&self) -> f64;

    /// Time samples at which the surface temperature is evaluated.
    fn times(&self) -> &TimeAxis;

    /// Latitude/longitude grid of the planet's surface.
    fn surface(&self) -> &SurfaceGrid;

    /// True anomaly (rad) at each sample of `times`.
    fn true_anomaly(&self, times: &TimeAxis) -> ExothermResult<Array1<f64>>;

    /// Longitude (rad) of the sub-stellar point at each sample of `times`,
    /// for a planet spinning with `rotation_period`.
    fn substellar_longitude(
        &self,
        times: &TimeAxis,
        rotation_period: Quantity,
    ) -> ExothermResult<Array1<f64>>;
}

/// Orbital and stellar constants of a body, validated and in SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalConstants {
    /// Stellar radius (m).
    pub stellar_radius: f64,
    /// Stellar effective temperature (K).
    pub stellar_effective_temperature: f64,
    /// Semi-major axis (m).
    pub semi_major_axis: f64,
    pub eccentricity: f64,
}

impl OrbitalConstants {
    /// Reads and validates the scalar properties of `body`.
    ///
    /// # Errors
    ///
    /// Dimension mismatches on any accessor, non-positive sizes or
    /// temperatures, and eccentricities outside `[0, 1)`.
    pub fn from_body<B: PlanetaryBody + ?Sized>(body: &B) -> ExothermResult<Self> {
        let stellar_radius = body
            .stellar_radius()
            .require(Dimension::LENGTH, "stellar radius")?;
        let stellar_effective_temperature = body
            .stellar_effective_temperature()
            .require(Dimension::TEMPERATURE, "stellar effective temperature")?;
        let semi_major_axis = body
            .semi_major_axis()
            .require(Dimension::LENGTH, "semi-major axis")?;
        let eccentricity = body.eccentricity();

        positive("stellar radius", stellar_radius)?;
        positive("stellar effective temperature", stellar_effective_temperature)?;
        positive("semi-major axis", semi_major_axis)?;
        if !(0.0..1.0).contains(&eccentricity) {
            return Err(ExothermError::invalid_parameter(
                "eccentricity",
                eccentricity,
                "must lie in [0, 1)",
            ));
        }

        Ok(Self {
            stellar_radius,
            stellar_effective_temperature,
            semi_major_axis,
            eccentricity,
        })
    }
}

fn positive(name: &str, value: f64) -> ExothermResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ExothermError::invalid_parameter(name, value, "must be positive"))
    }
}

/// Checks that an ephemeris array has one value per time sample.
pub fn check_ephemeris_len(
    context: &str,
    values: &Array1<f64>,
    times: &TimeAxis,
) -> ExothermResult<()> {
    if values.len() == times.len() {
        Ok(())
    } else {
        Err(ExothermError::shape_mismatch(
            context,
            &[times.len()],
            &[values.len()],
        ))
    }
}
