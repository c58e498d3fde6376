//! Extracted 2-D slices and their rendered form.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, GridResult};

/// A 2-D (y, x) slice of the concentration field with its coordinates.
///
/// `values[row * row_size + col]` is the value at `(x_coords[col], y_coords[row])`,
/// where `row_size = x_coords.len()` and `col_size = y_coords.len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSlice {
    x_coords: Vec<f64>,
    y_coords: Vec<f64>,
    values: Vec<f64>,
}

impl GridSlice {
    /// Build a slice, checking that `values` covers exactly `x.len() * y.len()` cells.
    pub fn new(x_coords: Vec<f64>, y_coords: Vec<f64>, values: Vec<f64>) -> GridResult<Self> {
        let expected = x_coords.len() * y_coords.len();
        if values.len() != expected {
            return Err(GridError::DataRead(format!(
                "slice has {} values, expected {} ({} x {})",
                values.len(),
                expected,
                y_coords.len(),
                x_coords.len()
            )));
        }

        Ok(Self {
            x_coords,
            y_coords,
            values,
        })
    }

    /// Number of cells per row (size of the `x` dimension).
    pub fn row_size(&self) -> usize {
        self.x_coords.len()
    }

    /// Number of rows (size of the `y` dimension).
    pub fn col_size(&self) -> usize {
        self.y_coords.len()
    }

    pub fn x_coords(&self) -> &[f64] {
        &self.x_coords
    }

    pub fn y_coords(&self) -> &[f64] {
        &self.y_coords
    }

    /// Row-major cell values, y outer and x inner.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at (`row`, `col`), or `None` outside the slice.
    pub fn value_at(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.col_size() || col >= self.row_size() {
            return None;
        }
        self.values.get(row * self.row_size() + col).copied()
    }
}

/// One cell of a rendered grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub x: f64,
    pub y: f64,
    pub concentration: f64,
}

/// Rows of cells in stored y order, each row in stored x order.
pub type RenderedGrid = Vec<Vec<GridCell>>;
