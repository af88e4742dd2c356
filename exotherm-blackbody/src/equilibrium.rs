//! Instantaneous radiative-equilibrium temperatures.
//!
//! For a surface point at latitude $\theta$ and longitude $\phi$ the fourth
//! power of the equilibrium temperature is
//!
//! $$ T_{eq}^4 = (1 - A) \frac{R_\star^2 T_{eff}^4}{r^2} \max\left(0, \cos\theta \cos(\lambda_{sub} - \phi)\right) + T_n^4 $$
//!
//! with the star–planet separation
//!
//! $$ r = \frac{a (1 - e^2)}{1 + e \cos\nu} $$
//!
//! The sub-stellar longitude $\lambda_{sub}$ depends on the rotation period,
//! so the illumination pattern is evaluated once per distinct period and
//! shared by every grid cell with that period.

use exotherm_core::body::{check_ephemeris_len, OrbitalConstants, PlanetaryBody};
use exotherm_core::errors::{ExothermError, ExothermResult};
use exotherm_core::parameter_grid::{ParameterAxis, ParameterGrid};
use exotherm_core::quantity::Quantity;
use exotherm_core::surface::SurfaceGrid;
use exotherm_core::units::Dimension;
use ndarray::{Array1, Array3, Array4, ArrayView3, Axis, Zip};
use serde::{Deserialize, Serialize};

/// $T_{eq}^4$ (K⁴) with axes `(cell, time, lat, lon)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EquilibriumFieldFields")]
pub struct EquilibriumField4 {
    values: Array4<f64>,
    grid: ParameterGrid,
}

#[derive(Deserialize)]
struct EquilibriumFieldFields {
    values: Array4<f64>,
    grid: ParameterGrid,
}

impl TryFrom<EquilibriumFieldFields> for EquilibriumField4 {
    type Error = ExothermError;

    fn try_from(fields: EquilibriumFieldFields) -> Result<Self, Self::Error> {
        Self::new(fields.values, fields.grid)
    }
}

impl EquilibriumField4 {
    /// Wraps precomputed values.
    ///
    /// # Errors
    ///
    /// The cell axis must have one entry per cell of `grid`, the field must
    /// hold at least one time sample and surface point, and every value must
    /// be finite and non-negative.
    pub fn new(values: Array4<f64>, grid: ParameterGrid) -> ExothermResult<Self> {
        let (n_cells, n_times, n_lat, n_lon) = values.dim();
        if n_cells != grid.n_cells() {
            return Err(ExothermError::shape_mismatch(
                "equilibrium field cells",
                &[grid.n_cells()],
                &[n_cells],
            ));
        }
        if n_times == 0 || n_lat == 0 || n_lon == 0 {
            return Err(ExothermError::shape_mismatch(
                "equilibrium field",
                &[n_cells, 1, 1, 1],
                &[n_cells, n_times, n_lat, n_lon],
            ));
        }
        if let Some(&bad) = values.iter().find(|v| !(v.is_finite() && **v >= 0.0)) {
            return Err(ExothermError::invalid_parameter(
                "equilibrium temperature^4",
                bad,
                "must be finite and non-negative",
            ));
        }
        Ok(Self { values, grid })
    }

    pub fn values(&self) -> &Array4<f64> {
        &self.values
    }

    pub fn parameter_grid(&self) -> &ParameterGrid {
        &self.grid
    }

    /// `(n_cells, n_times, n_lat, n_lon)`.
    pub fn dim(&self) -> (usize, usize, usize, usize) {
        self.values.dim()
    }

    /// The field of one parameter cell, axes `(time, lat, lon)`.
    pub fn cell(&self, cell: usize) -> Option<ArrayView3<'_, f64>> {
        (cell < self.grid.n_cells()).then(|| self.values.index_axis(Axis(0), cell))
    }

    /// Every cell at time index `t`, axes `(cell, lat, lon)`.
    pub fn at_time(&self, t: usize) -> Option<ArrayView3<'_, f64>> {
        (t < self.values.len_of(Axis(1))).then(|| self.values.index_axis(Axis(1), t))
    }

    /// Equilibrium temperatures (K), i.e. the fourth root of every entry.
    pub fn temperatures(&self) -> Array4<f64> {
        self.values.mapv(|teq4| teq4.powf(0.25))
    }

    pub fn into_values(self) -> Array4<f64> {
        self.values
    }
}

/// $R_\star^2 T_{eff}^4$, with dimension L²Θ⁴.
pub fn stellar_luminosity_proxy(
    stellar_radius: Quantity,
    stellar_effective_temperature: Quantity,
) -> ExothermResult<Quantity> {
    stellar_radius.require(Dimension::LENGTH, "stellar radius")?;
    stellar_effective_temperature.require(Dimension::TEMPERATURE, "stellar effective temperature")?;
    let luminosity = stellar_radius.powi(2) * stellar_effective_temperature.powi(4);
    luminosity.require(Dimension::LUMINOSITY_PROXY, "stellar luminosity")?;
    Ok(luminosity)
}

/// Star–planet separation at each true anomaly, in the units of
/// `semi_major_axis`.
pub fn orbital_separation(
    semi_major_axis: f64,
    eccentricity: f64,
    true_anomaly: &Array1<f64>,
) -> Array1<f64> {
    let semi_latus_rectum = semi_major_axis * (1.0 - eccentricity * eccentricity);
    true_anomaly.mapv(|nu| semi_latus_rectum / (1.0 + eccentricity * nu.cos()))
}

/// Cosine of the stellar zenith angle at every surface point and sub-stellar
/// longitude, axes `(time, lat, lon)`.
///
/// Night-side points are set to exactly zero.
pub fn illumination(surface: &SurfaceGrid, substellar_longitude: &Array1<f64>) -> Array3<f64> {
    let (n_lat, n_lon) = surface.shape();
    let mut alpha = Array3::zeros((substellar_longitude.len(), n_lat, n_lon));
    for (mut frame, &sub) in alpha.outer_iter_mut().zip(substellar_longitude.iter()) {
        Zip::from(&mut frame)
            .and(surface.latitudes())
            .and(surface.longitudes())
            .for_each(|a, &lat, &lon| *a = (lat.cos() * (sub - lon).cos()).max(0.0));
    }
    alpha
}

/// Computes $T_{eq}^4$ for every parameter cell of `grid` at every time
/// sample and surface point of `body`.
///
/// # Errors
///
/// Fails on dimension mismatches in the body's accessors, an eccentricity
/// outside `[0, 1)`, and ephemeris arrays whose length differs from the
/// number of time samples.
pub fn equilibrium_temperatures4<B: PlanetaryBody + ?Sized>(
    body: &B,
    grid: &ParameterGrid,
) -> ExothermResult<EquilibriumField4> {
    let constants = OrbitalConstants::from_body(body)?;
    let times = body.times();
    let surface = body.surface();

    let luminosity =
        stellar_luminosity_proxy(body.stellar_radius(), body.stellar_effective_temperature())?;
    // l / r² must come out in K⁴ for the sum with Tn⁴ to make sense
    let flux_scale = (luminosity / Quantity::metres(1.0).powi(2))
        .require(Dimension::TEMPERATURE4, "incident stellar flux")?;

    let true_anomaly = body.true_anomaly(times)?;
    check_ephemeris_len("true anomaly", &true_anomaly, times)?;
    let separation = orbital_separation(
        constants.semi_major_axis,
        constants.eccentricity,
        &true_anomaly,
    );
    let flux = separation.mapv(|r| flux_scale / (r * r));
    log::debug!(
        "Incident flux between {:e} and {:e} K^4 over {} samples",
        flux.fold(f64::INFINITY, |a, &b| a.min(b)),
        flux.fold(f64::NEG_INFINITY, |a, &b| a.max(b)),
        flux.len()
    );

    let illuminations = grid
        .axis_values(ParameterAxis::RotationPeriod)
        .iter()
        .map(|&period| {
            let longitude = body.substellar_longitude(times, Quantity::seconds(period))?;
            check_ephemeris_len("sub-stellar longitude", &longitude, times)?;
            Ok(illumination(surface, &longitude))
        })
        .collect::<ExothermResult<Vec<_>>>()?;
    log::debug!(
        "Illumination evaluated for {} rotation period(s)",
        illuminations.len()
    );

    let (n_lat, n_lon) = surface.shape();
    let mut values = Array4::zeros((grid.n_cells(), times.len(), n_lat, n_lon));
    for (index, (cell, mut field)) in grid.cells().zip(values.outer_iter_mut()).enumerate() {
        let alpha = &illuminations[grid.rotation_index(index)];
        let absorbed = 1.0 - cell.albedo;
        let floor = cell.nightside_temperature.powi(4);
        for ((mut frame, alpha_t), &flux_t) in field
            .outer_iter_mut()
            .zip(alpha.outer_iter())
            .zip(flux.iter())
        {
            Zip::from(&mut frame)
                .and(&alpha_t)
                .for_each(|teq4, &a| *teq4 = absorbed * flux_t * a + floor);
        }
    }

    EquilibriumField4::new(values, grid.clone())
}
