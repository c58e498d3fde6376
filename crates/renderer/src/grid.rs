//! Coordinate-tagged grid output for JSON responses.

use grid_common::{GridCell, GridSlice, RenderedGrid};
use serde::Serialize;

/// Body of a successful `/get-data` response.
#[derive(Debug, Clone, Serialize)]
pub struct ConcentrationResponse {
    pub concentration_data: RenderedGrid,
}

impl From<&GridSlice> for ConcentrationResponse {
    fn from(slice: &GridSlice) -> Self {
        Self {
            concentration_data: to_grid(slice),
        }
    }
}

/// Pair every cell with its x/y coordinate.
///
/// Outer rows follow the stored y order, inner cells the stored x order.
/// There is one row per y coordinate, so a zero-width slice yields that many
/// empty rows.
pub fn to_grid(slice: &GridSlice) -> RenderedGrid {
    let row_size = slice.row_size();

    slice
        .y_coords()
        .iter()
        .enumerate()
        .map(|(row_index, &y)| {
            let start = row_index * row_size;
            slice
                .x_coords()
                .iter()
                .zip(&slice.values()[start..start + row_size])
                .map(|(&x, &concentration)| GridCell {
                    x,
                    y,
                    concentration,
                })
                .collect()
        })
        .collect()
}
