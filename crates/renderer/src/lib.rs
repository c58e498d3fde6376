//! Rendering of extracted concentration slices.
//!
//! Two output shapes:
//! - Coordinate-tagged grid for JSON responses (`grid`)
//! - Linearly normalized 8-bit grayscale raster (`grayscale`), encoded as PNG (`png`)

pub mod grayscale;
pub mod grid;
pub mod png;

pub use grayscale::{render_png, to_grayscale, GrayscaleRaster};
pub use grid::{to_grid, ConcentrationResponse};
