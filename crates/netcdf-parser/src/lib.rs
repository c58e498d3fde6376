//! Read-only access to 4-D gridded NetCDF datasets.
//!
//! The dataset is opened once at startup and shared by every request.
//! [`GriddedDataset`] is the interface the rest of the workspace depends on;
//! [`NetCdfDataset`] implements it on top of the native netcdf library.
//!
//! # Expected Layout
//!
//! The served files carry a field variable over `(time, z, y, x)` and 1-D
//! coordinate variables `x(x)` and `y(y)`. Nothing here enforces that layout;
//! the slice extractor validates it per request.

pub mod dataset;
pub mod error;
pub mod metadata;
pub mod native;

pub use dataset::GriddedDataset;
pub use error::{NetCdfError, NetCdfResult};
pub use metadata::{DatasetInfo, VariableInfo};
pub use native::{silence_hdf5_errors, NetCdfDataset};
