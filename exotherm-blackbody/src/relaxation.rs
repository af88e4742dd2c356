//! Radiative relaxation towards the equilibrium temperature.
//!
//! Starting from the nightside temperature, each surface point relaxes
//! towards its instantaneous equilibrium temperature with a timescale that
//! shortens as the equilibrium temperature rises:
//!
//! $$ \tau = t_{1000} \left(\frac{(1000\,K)^4}{T_{eq}^4}\right)^{3/4} $$
//!
//! $$ \Delta T = \frac{1}{4} \frac{T_{eq}}{\tau} \left(1 - \frac{T^4}{T_{eq}^4}\right) \Delta t $$
//!
//! A step that would carry the temperature past $T_{eq}$ is replaced by
//! $T_{eq}$ itself.

use crate::equilibrium::{equilibrium_temperatures4, EquilibriumField4};
use crate::parameters::BlackbodyParameters;
use exotherm_core::body::PlanetaryBody;
use exotherm_core::errors::{ExothermError, ExothermResult};
use exotherm_core::parameter_grid::{ParameterAxis, ParameterGrid};
use exotherm_core::timeseries::{TemperatureSeriesWriter, TemperatureTimeSeries};
use ndarray::{Array3, Axis, Zip};

/// Temperature (K) at which the radiative timescale equals `t1000`.
pub const REFERENCE_TEMPERATURE: f64 = 1000.0;

/// Prefactor of the relaxation increment.
pub const RELAXATION_COEFFICIENT: f64 = 0.25;

/// Radiative timescale (in the units of `t1000`) for an equilibrium
/// temperature to the fourth power `teq4` (K⁴).
pub fn radiative_timescale(t1000: f64, teq4: f64) -> f64 {
    t1000 * (REFERENCE_TEMPERATURE.powi(4) / teq4).powf(0.75)
}

/// Result of relaxing a single surface point over one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelaxationStep {
    pub temperature: f64,
    /// The increment overshot equilibrium and was replaced by it.
    pub snapped: bool,
}

/// Advances `previous` (K) by one step of length `dt` (s) towards the
/// equilibrium `teq4` (K⁴).
///
/// Substituting $\tau$ into the increment cancels every power of $T_{eq}$
/// below the fourth:
///
/// $$ \Delta T = \frac{1}{4} \frac{(T_{eq}^4 - T^4) \Delta t}{t_{1000} \cdot (1000\,K)^3} $$
///
/// which is the form evaluated here. It stays finite as `teq4` approaches
/// zero, where $\tau$ itself diverges.
pub fn relaxation_step(previous: f64, teq4: f64, t1000: f64, dt: f64) -> RelaxationStep {
    let teq = teq4.powf(0.25);
    let increment = RELAXATION_COEFFICIENT * (teq4 - previous.powi(4)) * dt
        / (t1000 * REFERENCE_TEMPERATURE.powi(3));

    if increment.abs() > (previous - teq).abs() {
        RelaxationStep {
            temperature: teq,
            snapped: true,
        }
    } else {
        RelaxationStep {
            temperature: previous + increment,
            snapped: false,
        }
    }
}

/// Surface temperatures of `body` for every combination of `parameters`.
pub fn evolve_temperatures<B: PlanetaryBody + ?Sized>(
    body: &B,
    parameters: &BlackbodyParameters,
) -> ExothermResult<TemperatureTimeSeries> {
    let grid = parameters.to_grid()?;
    evolve_temperatures_on_grid(body, &grid)
}

/// Surface temperatures of `body` for every cell of an existing grid.
///
/// # Errors
///
/// The time axis must be uniformly spaced. A single time sample yields a
/// series holding only the initial state. Errors from
/// [`equilibrium_temperatures4`] are passed through. Nothing is computed
/// before every check has passed.
pub fn evolve_temperatures_on_grid<B: PlanetaryBody + ?Sized>(
    body: &B,
    grid: &ParameterGrid,
) -> ExothermResult<TemperatureTimeSeries> {
    let times = body.times();
    let dt = if times.len() > 1 { times.step()? } else { 0.0 };
    let (n_lat, n_lon) = body.surface().shape();
    log::info!(
        "Evolving {} parameter cell(s) over {} time sample(s) on a {}x{} surface",
        grid.n_cells(),
        times.len(),
        n_lat,
        n_lon
    );

    let equilibrium = equilibrium_temperatures4(body, grid)?;
    let series = relax(&equilibrium, dt)?;

    let (min, max) = series.bounds();
    log::info!("Evolution finished, temperatures span {min:.1} K to {max:.1} K");
    Ok(series)
}

/// Integrates the relaxation equation through an equilibrium field whose
/// time samples are `dt` seconds apart.
///
/// # Errors
///
/// `dt` must be finite and positive whenever the field holds more than one
/// time sample. The field's cell axis always matches its grid, see
/// [`EquilibriumField4::new`].
pub fn relax(equilibrium: &EquilibriumField4, dt: f64) -> ExothermResult<TemperatureTimeSeries> {
    let grid = equilibrium.parameter_grid();
    let (n_cells, n_times, n_lat, n_lon) = equilibrium.dim();
    if n_times > 1 && !(dt.is_finite() && dt > 0.0) {
        return Err(ExothermError::invalid_parameter(
            "time step",
            dt,
            "must be finite and positive",
        ));
    }
    let timescales = grid.broadcast(ParameterAxis::RadiativeTimescale);
    let nightside = grid.broadcast(ParameterAxis::NightsideTemperature);

    let initial = Array3::from_shape_fn((n_cells, n_lat, n_lon), |(cell, _, _)| nightside[cell]);
    let mut writer = TemperatureSeriesWriter::new(n_times, grid.clone(), initial)?;

    let mut total_snaps = 0;
    for t in 1..n_times {
        let target = equilibrium.values().index_axis(Axis(1), t);
        let snaps = writer.advance(|previous, mut next| {
            let mut snaps = 0usize;
            Zip::indexed(&mut next)
                .and(&previous)
                .and(&target)
                .for_each(|(cell, _, _), temperature, &prev, &teq4| {
                    let step = relaxation_step(prev, teq4, timescales[cell], dt);
                    *temperature = step.temperature;
                    snaps += usize::from(step.snapped);
                });
            snaps
        })?;
        log::trace!("Step {t}: {snaps} point(s) snapped to equilibrium");
        total_snaps += snaps;
    }
    log::debug!(
        "{total_snaps} of {} point updates were limited by the overshoot guard",
        n_cells * n_lat * n_lon * n_times.saturating_sub(1)
    );

    writer.finish()
}
