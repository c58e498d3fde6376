//! Request validation and hyperslab extraction.

use grid_common::{GridError, GridResult, GridSlice, SliceRequest};
use netcdf_parser::GriddedDataset;
use tracing::debug;

/// Name of the field variable served by the API.
pub const FIELD_VARIABLE: &str = "concentration";
/// Name of the x coordinate variable (and dimension).
pub const X_VARIABLE: &str = "x";
/// Name of the y coordinate variable (and dimension).
pub const Y_VARIABLE: &str = "y";

const TIME_DIMENSION: &str = "time";
const Z_DIMENSION: &str = "z";

/// Extract the `(time, z)` slice described by `request`.
///
/// Checks run in a fixed order and the first failure wins: the time bound,
/// the z bound, then the presence of `x`, `y` and `concentration`. No data is
/// read until all checks pass.
pub fn extract(dataset: &dyn GriddedDataset, request: &SliceRequest) -> GridResult<GridSlice> {
    let time_size = dataset.dimension_size(TIME_DIMENSION)?;
    if request.time_index >= time_size {
        return Err(GridError::out_of_bounds("t", request.time_index, time_size));
    }

    let z_size = dataset.dimension_size(Z_DIMENSION)?;
    if request.z_index >= z_size {
        return Err(GridError::out_of_bounds("z", request.z_index, z_size));
    }

    for name in [X_VARIABLE, Y_VARIABLE, FIELD_VARIABLE] {
        if !dataset.has_variable(name) {
            return Err(GridError::MissingVariable(name.to_string()));
        }
    }

    let row_size = dataset.dimension_size(X_VARIABLE)?;
    let col_size = dataset.dimension_size(Y_VARIABLE)?;

    let x_coords = dataset.read_variable_1d(X_VARIABLE, row_size)?;
    let y_coords = dataset.read_variable_1d(Y_VARIABLE, col_size)?;
    let values = dataset.read_slice_4d(
        FIELD_VARIABLE,
        [request.time_index, request.z_index, 0, 0],
        [1, 1, col_size, row_size],
    )?;

    debug!(
        t = request.time_index,
        z = request.z_index,
        rows = col_size,
        cols = row_size,
        "Extracted slice"
    );

    GridSlice::new(x_coords, y_coords, values)
}
