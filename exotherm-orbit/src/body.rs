//! A planet on a Keplerian orbit around a single star.

use crate::kepler;
use exotherm_core::body::PlanetaryBody;
use exotherm_core::errors::{ExothermError, ExothermResult};
use exotherm_core::quantity::Quantity;
use exotherm_core::surface::SurfaceGrid;
use exotherm_core::time_axis::TimeAxis;
use exotherm_core::units::registry::{ASTRONOMICAL_UNIT, SECONDS_PER_DAY, SOLAR_RADIUS};
use exotherm_core::units::Dimension;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Parameters of a [`KeplerianBody`]
///
/// Quantities are written as strings with units, e.g. `"0.05 AU"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeplerianOrbitParameters {
    /// Radius of the host star
    /// unit: length
    /// default: 1 R_sun
    pub stellar_radius: Quantity,

    /// Effective temperature of the host star
    /// unit: K
    /// default: 5772 K
    pub stellar_effective_temperature: Quantity,

    /// unit: length
    /// default: 0.05 AU
    pub semi_major_axis: Quantity,

    /// unit: dimensionless
    /// default: 0.0
    pub eccentricity: f64,

    /// Sidereal orbital period
    /// unit: time
    /// default: 3 day
    pub orbital_period: Quantity,

    /// Time at which the planet passes periapsis
    /// unit: time
    /// default: 0 s
    pub time_of_periapsis: Quantity,

    /// Sub-stellar longitude at `t = 0` for a planet at periapsis
    /// unit: angle
    /// default: 0 rad
    pub initial_substellar_longitude: Quantity,
}

impl Default for KeplerianOrbitParameters {
    fn default() -> Self {
        Self {
            stellar_radius: Quantity::metres(SOLAR_RADIUS),
            stellar_effective_temperature: Quantity::kelvin(5772.0),
            semi_major_axis: Quantity::metres(0.05 * ASTRONOMICAL_UNIT),
            eccentricity: 0.0,
            orbital_period: Quantity::seconds(3.0 * SECONDS_PER_DAY),
            time_of_periapsis: Quantity::seconds(0.0),
            initial_substellar_longitude: Quantity::radians(0.0),
        }
    }
}

/// A planet on a fixed Keplerian orbit, sampled at `times` on `surface`.
///
/// The sub-stellar longitude follows the orbital motion of the star as seen
/// from the planet, minus the planet's own spin:
///
/// $$ \lambda_{sub}(t) = \lambda_0 + \nu(t) - \frac{2 \pi t}{P_{rot}} \pmod{2\pi} $$
///
/// A negative rotation period describes retrograde spin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "KeplerianBodyFields")]
pub struct KeplerianBody {
    parameters: KeplerianOrbitParameters,
    times: TimeAxis,
    surface: SurfaceGrid,
}

#[derive(Deserialize)]
struct KeplerianBodyFields {
    parameters: KeplerianOrbitParameters,
    times: TimeAxis,
    surface: SurfaceGrid,
}

impl TryFrom<KeplerianBodyFields> for KeplerianBody {
    type Error = ExothermError;

    fn try_from(fields: KeplerianBodyFields) -> Result<Self, Self::Error> {
        Self::new(fields.parameters, fields.times, fields.surface)
    }
}

impl KeplerianBody {
    /// Validates `parameters` and binds them to a time axis and surface grid.
    pub fn new(
        parameters: KeplerianOrbitParameters,
        times: TimeAxis,
        surface: SurfaceGrid,
    ) -> ExothermResult<Self> {
        for (name, quantity, dimension) in [
            ("stellar radius", parameters.stellar_radius, Dimension::LENGTH),
            (
                "stellar effective temperature",
                parameters.stellar_effective_temperature,
                Dimension::TEMPERATURE,
            ),
            ("semi-major axis", parameters.semi_major_axis, Dimension::LENGTH),
            ("orbital period", parameters.orbital_period, Dimension::TIME),
        ] {
            let value = quantity.require(dimension, name)?;
            if !(value.is_finite() && value > 0.0) {
                return Err(ExothermError::invalid_parameter(name, value, "must be positive"));
            }
        }
        parameters
            .time_of_periapsis
            .require(Dimension::TIME, "time of periapsis")?;
        angle(
            parameters.initial_substellar_longitude,
            "initial sub-stellar longitude",
        )?;
        if !(0.0..1.0).contains(&parameters.eccentricity) {
            return Err(ExothermError::invalid_parameter(
                "eccentricity",
                parameters.eccentricity,
                "must lie in [0, 1)",
            ));
        }

        Ok(Self {
            parameters,
            times,
            surface,
        })
    }

    pub fn parameters(&self) -> &KeplerianOrbitParameters {
        &self.parameters
    }

    /// Star–planet distance (m) at each sample of `times`.
    pub fn separation(&self, times: &TimeAxis) -> ExothermResult<Array1<f64>> {
        let a = self.parameters.semi_major_axis.si_value();
        let e = self.parameters.eccentricity;
        Ok(self
            .true_anomaly(times)?
            .mapv(|nu| a * (1.0 - e * e) / (1.0 + e * nu.cos())))
    }

    fn mean_anomalies(&self, times: &TimeAxis) -> Array1<f64> {
        let period = self.parameters.orbital_period.si_value();
        let periapsis = self.parameters.time_of_periapsis.si_value();
        times
            .values()
            .mapv(|t| kepler::mean_anomaly(t, period, periapsis))
    }
}

impl PlanetaryBody for KeplerianBody {
    fn stellar_radius(&self) -> Quantity {
        self.parameters.stellar_radius
    }

    fn stellar_effective_temperature(&self) -> Quantity {
        self.parameters.stellar_effective_temperature
    }

    fn semi_major_axis(&self) -> Quantity {
        self.parameters.semi_major_axis
    }

    fn eccentricity(&self) -> f64 {
        self.parameters.eccentricity
    }

    fn times(&self) -> &TimeAxis {
        &self.times
    }

    fn surface(&self) -> &SurfaceGrid {
        &self.surface
    }

    fn true_anomaly(&self, times: &TimeAxis) -> ExothermResult<Array1<f64>> {
        let e = self.parameters.eccentricity;
        Ok(self
            .mean_anomalies(times)
            .mapv(|m| kepler::true_anomaly(m, e)))
    }

    fn substellar_longitude(
        &self,
        times: &TimeAxis,
        rotation_period: Quantity,
    ) -> ExothermResult<Array1<f64>> {
        let rotation_period = rotation_period.require(Dimension::TIME, "rotation period")?;
        if !(rotation_period.is_finite() && rotation_period != 0.0) {
            return Err(ExothermError::invalid_parameter(
                "rotation period",
                rotation_period,
                "must be finite and non-zero",
            ));
        }
        let initial = self.parameters.initial_substellar_longitude.si_value();
        let nu = self.true_anomaly(times)?;

        let mut longitude = times.values().mapv(|t| -TAU * t / rotation_period);
        longitude += &nu;
        Ok(longitude.mapv_into(|lon| (lon + initial).rem_euclid(TAU)))
    }
}

fn angle(quantity: Quantity, context: &str) -> ExothermResult<f64> {
    if quantity.dimension().is_angular() {
        Ok(quantity.si_value())
    } else {
        Err(ExothermError::DimensionMismatch {
            context: context.to_string(),
            expected: Dimension::ANGLE,
            found: quantity.dimension(),
        })
    }
}

/// `steps_per_orbit * n_orbits` uniformly spaced samples starting at zero,
/// `period / steps_per_orbit` apart.
///
/// This is the sampling used to render one animation frame per step.
pub fn orbit_sampling(
    period: Quantity,
    steps_per_orbit: usize,
    n_orbits: usize,
) -> ExothermResult<TimeAxis> {
    if steps_per_orbit == 0 {
        return Err(ExothermError::invalid_parameter(
            "steps per orbit",
            0.0,
            "must be positive",
        ));
    }
    let step = period * (1.0 / steps_per_orbit as f64);
    TimeAxis::uniform(Quantity::seconds(0.0), step, steps_per_orbit * n_orbits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    fn body(parameters: KeplerianOrbitParameters, times: TimeAxis) -> KeplerianBody {
        KeplerianBody::new(parameters, times, SurfaceGrid::regular(3, 6).unwrap()).unwrap()
    }

    fn one_orbit(parameters: &KeplerianOrbitParameters) -> TimeAxis {
        orbit_sampling(parameters.orbital_period, 8, 1).unwrap()
    }

    #[test]
    fn circular_orbit_has_constant_separation() {
        let parameters = KeplerianOrbitParameters::default();
        let times = one_orbit(&parameters);
        let body = body(parameters.clone(), times.clone());
        for r in body.separation(&times).unwrap() {
            assert_abs_diff_eq!(r, 0.05 * ASTRONOMICAL_UNIT, epsilon = 1e-3);
        }
    }

    #[test]
    fn eccentric_orbit_apsides() {
        let parameters = KeplerianOrbitParameters {
            eccentricity: 0.3,
            ..Default::default()
        };
        let times = one_orbit(&parameters);
        let body = body(parameters.clone(), times.clone());
        let a = parameters.semi_major_axis.si_value();
        let r = body.separation(&times).unwrap();

        // Samples 0 and 4 sit on periapsis and apoapsis
        assert_abs_diff_eq!(r[0], a * 0.7, epsilon = 1e-3);
        assert_abs_diff_eq!(r[4], a * 1.3, epsilon = 1e-3);
        assert!(r.iter().all(|&v| v >= a * 0.7 - 1e-3 && v <= a * 1.3 + 1e-3));
    }

    #[test]
    fn synchronous_rotation_keeps_substellar_point_fixed() {
        let parameters = KeplerianOrbitParameters {
            initial_substellar_longitude: Quantity::radians(1.0),
            ..Default::default()
        };
        let times = one_orbit(&parameters);
        let body = body(parameters.clone(), times.clone());
        let longitude = body
            .substellar_longitude(&times, parameters.orbital_period)
            .unwrap();
        for lon in longitude {
            assert_abs_diff_eq!(lon, 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn substellar_longitude_is_wrapped() {
        let parameters = KeplerianOrbitParameters::default();
        let times = TimeAxis::from_values(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0], "h").unwrap();
        let body = body(parameters, times.clone());
        let five_hours = Quantity::new(5.0, "h").unwrap();
        let longitude = body.substellar_longitude(&times, five_hours).unwrap();
        assert!(longitude.iter().all(|&lon| (0.0..TAU).contains(&lon)));

        let retrograde = body
            .substellar_longitude(&times, five_hours * -1.0)
            .unwrap();
        // Prograde spin moves the point westward, retrograde eastward
        assert!(retrograde[1] > PI / 4.0 && retrograde[1] < PI);
        assert!(longitude[1] > PI);
    }

    #[test]
    fn invalid_inputs_rejected() {
        let times = TimeAxis::from_values(&[0.0, 1.0], "h").unwrap();
        let surface = SurfaceGrid::regular(2, 2).unwrap();

        let eccentric = KeplerianOrbitParameters {
            eccentricity: 1.0,
            ..Default::default()
        };
        assert!(KeplerianBody::new(eccentric, times.clone(), surface.clone()).is_err());

        let wrong_unit = KeplerianOrbitParameters {
            semi_major_axis: Quantity::kelvin(1.0),
            ..Default::default()
        };
        assert!(matches!(
            KeplerianBody::new(wrong_unit, times.clone(), surface.clone()),
            Err(ExothermError::DimensionMismatch { .. })
        ));

        let body = KeplerianBody::new(Default::default(), times.clone(), surface).unwrap();
        assert!(body
            .substellar_longitude(&times, Quantity::seconds(0.0))
            .is_err());
        assert!(body
            .substellar_longitude(&times, Quantity::kelvin(5.0))
            .is_err());
    }

    #[test]
    fn sampling() {
        let times = orbit_sampling(Quantity::new(2.0, "day").unwrap(), 4, 3).unwrap();
        assert_eq!(times.len(), 12);
        assert_abs_diff_eq!(times.step().unwrap(), 0.5 * SECONDS_PER_DAY);
        assert!(orbit_sampling(Quantity::seconds(1.0), 0, 1).is_err());
    }

    #[test]
    fn parameters_from_json() {
        let parameters: KeplerianOrbitParameters =
            serde_json::from_str(r#"{"semi_major_axis": "0.1 AU", "eccentricity": 0.2}"#)
                .unwrap();
        assert_abs_diff_eq!(
            parameters.semi_major_axis.si_value(),
            0.1 * ASTRONOMICAL_UNIT,
            epsilon = 1e-3
        );
        assert_eq!(parameters.eccentricity, 0.2);
        assert_eq!(
            parameters.orbital_period,
            KeplerianOrbitParameters::default().orbital_period
        );
    }

    #[test]
    fn body_deserialisation_validates() {
        let times = TimeAxis::from_values(&[0.0, 1.0], "h").unwrap();
        let body = body(KeplerianOrbitParameters::default(), times);
        let text = serde_json::to_string(&body).unwrap();
        assert_eq!(serde_json::from_str::<KeplerianBody>(&text).unwrap(), body);

        let mut value: serde_json::Value = serde_json::from_str(&text).unwrap();
        value["parameters"]["eccentricity"] = serde_json::json!(1.2);
        let err = serde_json::from_value::<KeplerianBody>(value).unwrap_err();
        assert!(err.to_string().contains("eccentricity"), "{err}");

        let mut value: serde_json::Value = serde_json::from_str(&text).unwrap();
        value["parameters"]["semi_major_axis"] = serde_json::json!("-0.05 AU");
        assert!(serde_json::from_value::<KeplerianBody>(value).is_err());
    }
}
