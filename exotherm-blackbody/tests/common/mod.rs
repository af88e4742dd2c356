#![allow(dead_code)]

use exotherm_core::quantity::Quantity;
use exotherm_core::surface::SurfaceGrid;
use exotherm_core::time_axis::TimeAxis;
use exotherm_orbit::{KeplerianBody, KeplerianOrbitParameters};

pub fn surface() -> SurfaceGrid {
    SurfaceGrid::regular(6, 12).unwrap()
}

pub fn hourly_body(hours: &[f64]) -> KeplerianBody {
    let times = TimeAxis::from_values(hours, "h").unwrap();
    KeplerianBody::new(KeplerianOrbitParameters::default(), times, surface()).unwrap()
}

/// Circular orbit whose rotation is locked to the orbit.
pub fn tidally_locked_body(times: TimeAxis) -> (KeplerianBody, Quantity) {
    let parameters = KeplerianOrbitParameters::default();
    let period = parameters.orbital_period;
    let body = KeplerianBody::new(parameters, times, surface()).unwrap();
    (body, period)
}
