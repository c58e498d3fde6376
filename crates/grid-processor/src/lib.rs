//! Slice extraction for 4-D gridded concentration data.
//!
//! Given an opened dataset and a `(time, z)` request, this crate validates the
//! indices and reads the coordinate vectors and the 2-D field slice.
//!
//! # Architecture
//!
//! ```text
//! SliceRequest { time_index, z_index }
//!      │
//!      ▼
//! extract(dataset, request)
//!      │
//!      ├─► time_index < size("time")      else OutOfBounds("t")
//!      ├─► z_index    < size("z")         else OutOfBounds("z")
//!      ├─► variables x, y, concentration  else MissingVariable
//!      │
//!      ├─► read x (row_size), y (col_size)
//!      └─► read concentration[t, z, 0.., 0..]
//!               │
//!               ▼
//!          GridSlice → renderer
//! ```
//!
//! No interpolation, resampling or unit conversion happens here; stored
//! values pass through unchanged.

pub mod extract;

pub use extract::{extract, FIELD_VARIABLE, X_VARIABLE, Y_VARIABLE};
