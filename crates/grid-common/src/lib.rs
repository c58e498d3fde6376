//! Common types shared across the slice-api workspace.

pub mod error;
pub mod grid;
pub mod request;

pub use error::{GridError, GridResult};
pub use grid::{GridCell, GridSlice, RenderedGrid};
pub use request::{parse_index, SliceRequest};
