mod common;

use approx::assert_relative_eq;
use common::{hourly_body, surface, tidally_locked_body};
use exotherm_blackbody::equilibrium::{illumination, orbital_separation};
use exotherm_blackbody::{equilibrium_temperatures4, BlackbodyParameters};
use exotherm_core::body::PlanetaryBody;
use exotherm_core::quantity::Quantity;
use exotherm_core::time_axis::TimeAxis;
use exotherm_orbit::{KeplerianBody, KeplerianOrbitParameters};

#[test]
fn circular_orbit_separation_equals_semi_major_axis() {
    let body = hourly_body(&[0.0, 10.0, 20.0, 30.0, 40.0]);
    let a = body.semi_major_axis().si_value();
    let nu = body.true_anomaly(body.times()).unwrap();
    for r in orbital_separation(a, 0.0, &nu) {
        assert_eq!(r, a);
    }
}

#[test]
fn night_side_is_at_the_floor() {
    let body = hourly_body(&[0.0, 1.0, 2.0]);
    let parameters = BlackbodyParameters::default();
    let field = equilibrium_temperatures4(&body, &parameters.to_grid().unwrap()).unwrap();
    let floor = 1000.0_f64.powi(4);

    let longitude = body
        .substellar_longitude(body.times(), parameters.rotation_periods[0])
        .unwrap();
    let alpha = illumination(body.surface(), &longitude);
    let cell = field.cell(0).unwrap();
    for (index, &a) in alpha.indexed_iter() {
        if a == 0.0 {
            assert_eq!(cell[index], floor);
        } else {
            assert!(cell[index] >= floor);
        }
    }
}

#[test]
fn eccentric_orbit_is_hotter_at_periapsis() {
    let parameters = KeplerianOrbitParameters {
        eccentricity: 0.5,
        ..Default::default()
    };
    let period = parameters.orbital_period;
    let times = exotherm_orbit::orbit_sampling(period, 2, 1).unwrap();
    let body = KeplerianBody::new(parameters, times, surface()).unwrap();
    let grid = BlackbodyParameters {
        rotation_periods: vec![period],
        nightside_temperatures: vec![Quantity::kelvin(0.0)],
        ..Default::default()
    }
    .to_grid()
    .unwrap();

    let field = equilibrium_temperatures4(&body, &grid).unwrap();
    let peak = |t: usize| {
        field
            .at_time(t)
            .unwrap()
            .fold(f64::NEG_INFINITY, |a, &b| a.max(b))
    };
    // Flux scales as 1/r², r = a/2 at periapsis and 3a/2 at apoapsis
    assert!(peak(0) > peak(1));
    assert_relative_eq!(peak(0) / peak(1), 9.0, max_relative = 0.05);
}

#[test]
fn locked_planet_has_a_fixed_field() {
    let times = TimeAxis::from_values(&[0.0, 12.0, 24.0, 36.0], "h").unwrap();
    let (body, period) = tidally_locked_body(times);
    let grid = BlackbodyParameters {
        rotation_periods: vec![period],
        ..Default::default()
    }
    .to_grid()
    .unwrap();
    let field = equilibrium_temperatures4(&body, &grid).unwrap();
    let cell = field.cell(0).unwrap();
    let first = cell.index_axis(ndarray::Axis(0), 0);
    for frame in cell.outer_iter() {
        for (&a, &b) in frame.iter().zip(first.iter()) {
            assert_relative_eq!(a, b, max_relative = 1e-9);
        }
    }
}
