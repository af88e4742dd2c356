//! Solution of Kepler's equation.
//!
//! The mean anomaly $M$ advances uniformly in time. The eccentric anomaly
//! $E$ satisfies
//!
//! $$ M = E - e \sin E $$
//!
//! which is solved by Newton iteration, and the true anomaly follows from
//!
//! $$ \nu = 2 \operatorname{atan2}\left(\sqrt{1+e}\,\sin\tfrac{E}{2},\ \sqrt{1-e}\,\cos\tfrac{E}{2}\right) $$

use std::f64::consts::{PI, TAU};

/// Newton iterations stop once the correction drops below this (rad).
pub const KEPLER_TOLERANCE: f64 = 1e-12;

/// Upper bound on Newton iterations.
pub const KEPLER_MAX_ITERATIONS: usize = 50;

/// Mean anomaly (rad) at time `t` for an orbit with the given period and
/// time of periapsis, wrapped to `[-π, π)`.
pub fn mean_anomaly(t: f64, orbital_period: f64, time_of_periapsis: f64) -> f64 {
    let m = TAU * (t - time_of_periapsis) / orbital_period;
    (m + PI).rem_euclid(TAU) - PI
}

/// Eccentric anomaly for `mean_anomaly` and eccentricity `e` in `[0, 1)`.
pub fn eccentric_anomaly(mean_anomaly: f64, e: f64) -> f64 {
    if e == 0.0 {
        return mean_anomaly;
    }
    // Starting from M stalls near periapsis for very eccentric orbits
    let mut anomaly = if e < 0.8 {
        mean_anomaly
    } else {
        PI.copysign(mean_anomaly)
    };

    for _ in 0..KEPLER_MAX_ITERATIONS {
        let f = anomaly - e * anomaly.sin() - mean_anomaly;
        let f_prime = 1.0 - e * anomaly.cos();
        let delta = f / f_prime;
        anomaly -= delta;
        if delta.abs() < KEPLER_TOLERANCE {
            return anomaly;
        }
    }
    log::warn!(
        "Kepler solver did not converge for M = {mean_anomaly}, e = {e}; using last iterate"
    );
    anomaly
}

/// True anomaly (rad) corresponding to an eccentric anomaly.
pub fn true_anomaly_from_eccentric(eccentric_anomaly: f64, e: f64) -> f64 {
    let half = eccentric_anomaly / 2.0;
    2.0 * ((1.0 + e).sqrt() * half.sin()).atan2((1.0 - e).sqrt() * half.cos())
}

/// True anomaly (rad) directly from the mean anomaly.
pub fn true_anomaly(mean_anomaly: f64, e: f64) -> f64 {
    true_anomaly_from_eccentric(eccentric_anomaly(mean_anomaly, e), e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn circular_orbit_true_anomaly_equals_mean_anomaly() {
        for m in [-3.0, -1.0, 0.0, 0.5, 2.5] {
            assert_abs_diff_eq!(true_anomaly(m, 0.0), m, epsilon = 1e-12);
        }
    }

    #[test]
    fn satisfies_keplers_equation() {
        for e in [0.1, 0.5, 0.9, 0.99] {
            for m in [-2.5, -0.1, 0.3, 1.7, 3.1] {
                let big_e = eccentric_anomaly(m, e);
                assert_abs_diff_eq!(big_e - e * big_e.sin(), m, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn apsides() {
        assert_abs_diff_eq!(true_anomaly(0.0, 0.6), 0.0);
        assert_abs_diff_eq!(true_anomaly(-PI, 0.6).abs(), PI, epsilon = 1e-12);
    }

    #[test]
    fn mean_anomaly_wraps() {
        assert_abs_diff_eq!(mean_anomaly(0.25, 1.0, 0.0), PI / 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(mean_anomaly(1.25, 1.0, 0.0), PI / 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(mean_anomaly(0.75, 1.0, 0.0), -PI / 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(mean_anomaly(0.0, 1.0, 0.25), -PI / 2.0, epsilon = 1e-12);
    }
}
