//! Latitude/longitude grids over a planetary surface.

use crate::errors::{ExothermError, ExothermResult};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Latitude and longitude of every surface point, in radians.
///
/// Both arrays share one `(n_lat, n_lon)` shape, so surface fields are
/// indexed `[[lat_index, lon_index]]` everywhere in the workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SurfaceGridFields")]
pub struct SurfaceGrid {
    latitudes: Array2<f64>,
    longitudes: Array2<f64>,
}

#[derive(Deserialize)]
struct SurfaceGridFields {
    latitudes: Array2<f64>,
    longitudes: Array2<f64>,
}

impl TryFrom<SurfaceGridFields> for SurfaceGrid {
    type Error = ExothermError;

    fn try_from(fields: SurfaceGridFields) -> Result<Self, Self::Error> {
        Self::new(fields.latitudes, fields.longitudes)
    }
}

impl SurfaceGrid {
    /// Creates a grid from explicit latitude and longitude arrays in radians.
    ///
    /// # Errors
    ///
    /// Returns [`ExothermError::ShapeMismatch`] if the shapes differ or the
    /// grid is empty.
    pub fn new(latitudes: Array2<f64>, longitudes: Array2<f64>) -> ExothermResult<Self> {
        if latitudes.shape() != longitudes.shape() {
            return Err(ExothermError::shape_mismatch(
                "surface grid longitudes",
                latitudes.shape(),
                longitudes.shape(),
            ));
        }
        if latitudes.is_empty() {
            return Err(ExothermError::shape_mismatch(
                "surface grid",
                &[1, 1],
                latitudes.shape(),
            ));
        }
        Ok(Self {
            latitudes,
            longitudes,
        })
    }

    /// Outer product of a latitude axis and a longitude axis (radians).
    pub fn from_axes(latitudes: &Array1<f64>, longitudes: &Array1<f64>) -> ExothermResult<Self> {
        let shape = (latitudes.len(), longitudes.len());
        let lat = Array2::from_shape_fn(shape, |(i, _)| latitudes[i]);
        let lon = Array2::from_shape_fn(shape, |(_, j)| longitudes[j]);
        Self::new(lat, lon)
    }

    /// A global grid of cell centres: `n_lat` bands between the poles and
    /// `n_lon` meridians starting at longitude 0.
    pub fn regular(n_lat: usize, n_lon: usize) -> ExothermResult<Self> {
        let dlat = PI / n_lat as f64;
        let dlon = 2.0 * PI / n_lon as f64;
        let lat = Array1::from_iter((0..n_lat).map(|i| -PI / 2.0 + dlat * (i as f64 + 0.5)));
        let lon = Array1::from_iter((0..n_lon).map(|j| dlon * j as f64));
        Self::from_axes(&lat, &lon)
    }

    pub fn latitudes(&self) -> &Array2<f64> {
        &self.latitudes
    }

    pub fn longitudes(&self) -> &Array2<f64> {
        &self.longitudes
    }

    /// `(n_lat, n_lon)`.
    pub fn shape(&self) -> (usize, usize) {
        self.latitudes.dim()
    }

    pub fn len(&self) -> usize {
        self.latitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latitudes.is_empty()
    }
}
