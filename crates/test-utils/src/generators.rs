//! Test data generators for synthetic concentration fields.
//!
//! These generators create predictable, verifiable test data patterns
//! that can be used across the test suite.

/// Creates a 4-D (time, z, y, x) volume where every cell encodes its own indices.
///
/// Cell value is `t * 1_000_000 + z * 10_000 + row * 100 + col`, so any slice
/// can be checked against the indices it was read from. Sizes must stay
/// below 100 along y and x for the encoding to be unambiguous.
pub fn create_indexed_volume(time: usize, z: usize, height: usize, width: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(time * z * height * width);
    for t in 0..time {
        for k in 0..z {
            for row in 0..height {
                for col in 0..width {
                    data.push((t * 1_000_000 + k * 10_000 + row * 100 + col) as f64);
                }
            }
        }
    }
    data
}

/// Value stored by [`create_indexed_volume`] at the given indices.
pub fn indexed_value(t: usize, z: usize, row: usize, col: usize) -> f64 {
    (t * 1_000_000 + z * 10_000 + row * 100 + col) as f64
}

/// Creates a plume-shaped concentration field.
///
/// Values peak at `peak` in the grid center and fall off with distance,
/// reaching roughly zero at the corners.
pub fn create_plume_grid(width: usize, height: usize, peak: f64) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    let center_x = width as f64 / 2.0;
    let center_y = height as f64 / 2.0;
    let max_dist = (center_x * center_x + center_y * center_y).sqrt().max(1.0);

    for row in 0..height {
        for col in 0..width {
            let dx = col as f64 - center_x;
            let dy = row as f64 - center_y;
            let dist = (dx * dx + dy * dy).sqrt();
            data.push(peak * (1.0 - dist / max_dist).max(0.0));
        }
    }
    data
}

/// Creates evenly spaced coordinates starting at `origin`.
pub fn create_axis(len: usize, origin: f64, step: f64) -> Vec<f64> {
    (0..len).map(|i| origin + i as f64 * step).collect()
}

/// Creates a grid filled with a constant value.
///
/// Useful for testing the degenerate-range rendering path.
pub fn create_constant_grid(width: usize, height: usize, value: f64) -> Vec<f64> {
    vec![value; width * height]
}

/// Creates a grid with NaN values at specified positions.
///
/// Useful for testing fill-value handling.
///
/// # Arguments
///
/// * `width` - Number of columns
/// * `height` - Number of rows
/// * `nan_positions` - List of (col, row) positions that should be NaN
///
/// # Returns
///
/// A `Vec<f64>` with NaN at specified positions and `col + row` elsewhere.
pub fn create_grid_with_nans(
    width: usize,
    height: usize,
    nan_positions: &[(usize, usize)],
) -> Vec<f64> {
    let mut data: Vec<f64> = (0..height)
        .flat_map(|row| (0..width).map(move |col| (col + row) as f64))
        .collect();
    for &(col, row) in nan_positions {
        if col < width && row < height {
            data[row * width + col] = f64::NAN;
        }
    }
    data
}
