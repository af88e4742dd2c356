//! Surface-temperature time series.
//!
//! A [`TemperatureTimeSeries`] stores one temperature field per time sample
//! in a single pre-allocated array with the axis order
//! `(time, cell, latitude, longitude)`, in kelvin. It is assembled frame by
//! frame through a [`TemperatureSeriesWriter`], which only ever exposes the
//! previous frame read-only and the next frame mutably, and is immutable
//! once [`TemperatureSeriesWriter::finish`] returns.

use crate::errors::{ExothermError, ExothermResult};
use crate::parameter_grid::ParameterGrid;
use ndarray::{Array3, Array4, ArrayView2, ArrayView3, ArrayViewMut3, Axis};
use serde::{Deserialize, Serialize};

/// Write-once builder for a [`TemperatureTimeSeries`].
#[derive(Debug)]
pub struct TemperatureSeriesWriter {
    values: Array4<f64>,
    grid: ParameterGrid,
    written: usize,
}

impl TemperatureSeriesWriter {
    /// Allocates storage for `n_times` frames and writes `initial` as frame 0.
    ///
    /// `initial` must have shape `(n_cells, n_lat, n_lon)`.
    pub fn new(n_times: usize, grid: ParameterGrid, initial: Array3<f64>) -> ExothermResult<Self> {
        if n_times == 0 {
            return Err(ExothermError::EmptyTimeAxis);
        }
        let (n_cells, n_lat, n_lon) = initial.dim();
        if n_cells != grid.n_cells() {
            return Err(ExothermError::shape_mismatch(
                "initial temperature field cells",
                &[grid.n_cells()],
                &[n_cells],
            ));
        }

        let mut values = Array4::zeros((n_times, n_cells, n_lat, n_lon));
        values.index_axis_mut(Axis(0), 0).assign(&initial);

        Ok(Self {
            values,
            grid,
            written: 1,
        })
    }

    /// Number of frames written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn is_complete(&self) -> bool {
        self.written == self.values.len_of(Axis(0))
    }

    /// Computes the next frame from the previous one.
    ///
    /// `step` receives the last written frame and the (zeroed) frame to fill,
    /// both shaped `(n_cells, n_lat, n_lon)`. Its return value is passed
    /// through.
    ///
    /// # Errors
    ///
    /// Fails if every frame has already been written.
    pub fn advance<R, F>(&mut self, step: F) -> ExothermResult<R>
    where
        F: FnOnce(ArrayView3<'_, f64>, ArrayViewMut3<'_, f64>) -> R,
    {
        let t = self.written;
        let n_times = self.values.len_of(Axis(0));
        if t >= n_times {
            return Err(ExothermError::shape_mismatch(
                "temperature series frames",
                &[n_times],
                &[t + 1],
            ));
        }

        let (head, mut tail) = self.values.view_mut().split_at(Axis(0), t);
        let previous = head.index_axis(Axis(0), t - 1);
        let next = tail.index_axis_mut(Axis(0), 0);
        let result = step(previous, next);

        self.written += 1;
        Ok(result)
    }

    /// Freezes the series.
    ///
    /// # Errors
    ///
    /// Fails if any frame has not been written.
    pub fn finish(self) -> ExothermResult<TemperatureTimeSeries> {
        if !self.is_complete() {
            return Err(ExothermError::shape_mismatch(
                "temperature series frames",
                &[self.values.len_of(Axis(0))],
                &[self.written],
            ));
        }
        Ok(TemperatureTimeSeries {
            values: self.values,
            grid: self.grid,
        })
    }
}

/// Surface temperatures (K) for every time sample and parameter combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureTimeSeries {
    values: Array4<f64>,
    grid: ParameterGrid,
}

impl TemperatureTimeSeries {
    /// Number of frames, equal to the number of time samples.
    pub fn len(&self) -> usize {
        self.values.len_of(Axis(0))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn parameter_grid(&self) -> &ParameterGrid {
        &self.grid
    }

    /// `(n_lat, n_lon)` of every frame.
    pub fn surface_shape(&self) -> (usize, usize) {
        let (_, _, n_lat, n_lon) = self.values.dim();
        (n_lat, n_lon)
    }

    /// The whole series, axes `(time, cell, lat, lon)`.
    pub fn values(&self) -> &Array4<f64> {
        &self.values
    }

    /// Temperatures of every cell at time index `t`, axes `(cell, lat, lon)`.
    pub fn frame(&self, t: usize) -> Option<ArrayView3<'_, f64>> {
        (t < self.len()).then(|| self.values.index_axis(Axis(0), t))
    }

    /// Surface temperatures of one cell at time index `t`.
    pub fn cell_frame(&self, t: usize, cell: usize) -> Option<ArrayView2<'_, f64>> {
        let frame = self.frame(t)?;
        (cell < self.grid.n_cells()).then(|| frame.index_axis_move(Axis(0), cell))
    }

    /// The full history of one cell, axes `(time, lat, lon)`.
    pub fn cell_series(&self, cell: usize) -> Option<ArrayView3<'_, f64>> {
        (cell < self.grid.n_cells()).then(|| self.values.index_axis(Axis(1), cell))
    }

    /// Frames in time order.
    pub fn frames(&self) -> impl ExactSizeIterator<Item = ArrayView3<'_, f64>> {
        self.values.outer_iter()
    }

    /// Smallest and largest temperature anywhere in the series.
    ///
    /// Renderers use this to fix one colour scale for a whole animation.
    pub fn bounds(&self) -> (f64, f64) {
        self.values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    pub fn into_values(self) -> Array4<f64> {
        self.values
    }
}
