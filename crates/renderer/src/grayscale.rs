//! Linear grayscale normalization of a slice.
//!
//! Each value maps to `floor(255 * (v - min) / (max - min))`, clamped to
//! `[0, 255]`. Pixels keep the row-major layout of the slice, so the raster
//! is `row_size` pixels wide and `col_size` pixels tall with no row padding.
//!
//! Policies for inputs the formula does not cover:
//! - constant slice (`max == min`): every pixel is 0
//! - non-finite values (NaN fill values, infinities) are ignored when finding
//!   min/max and render as 0; a slice with no finite values is all 0

use grid_common::{GridError, GridResult, GridSlice};
use tracing::debug;

use crate::png::encode_grayscale_png;

/// An 8-bit single-channel raster, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayscaleRaster {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl GrayscaleRaster {
    /// Pixel at (`row`, `col`).
    pub fn pixel(&self, row: usize, col: usize) -> Option<u8> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.pixels.get(row * self.width + col).copied()
    }
}

/// Normalize a slice to 8-bit grayscale.
///
/// Fails with `EmptySlice` when the slice has no cells.
pub fn to_grayscale(slice: &GridSlice) -> GridResult<GrayscaleRaster> {
    if slice.is_empty() {
        return Err(GridError::EmptySlice);
    }

    let values = slice.values();
    let pixels = match finite_range(values) {
        Some((min, max)) if max > min => {
            let range = max - min;
            values.iter().map(|&v| normalize(v, min, range)).collect()
        }
        _ => {
            debug!(cells = values.len(), "Degenerate value range, rendering all zero");
            vec![0u8; values.len()]
        }
    };

    Ok(GrayscaleRaster {
        width: slice.row_size(),
        height: slice.col_size(),
        pixels,
    })
}

/// Normalize and encode a slice as a grayscale PNG.
pub fn render_png(slice: &GridSlice) -> GridResult<Vec<u8>> {
    let raster = to_grayscale(slice)?;
    encode_grayscale_png(&raster.pixels, raster.width, raster.height).map_err(GridError::Internal)
}

/// Min and max over the finite values, or `None` if there are none.
fn finite_range(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((min, max)) => Some((min.min(v), max.max(v))),
        })
}

#[inline]
fn normalize(value: f64, min: f64, range: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    // (max - min) / range is exactly 1.0, so the maximum always lands on 255
    let scaled = ((value - min) / range * 255.0).floor();
    scaled.clamp(0.0, 255.0) as u8
}
