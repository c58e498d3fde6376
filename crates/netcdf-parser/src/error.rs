//! Error types for NetCDF dataset access.

use grid_common::GridError;
use thiserror::Error;

/// Result type for NetCDF parser operations.
pub type NetCdfResult<T> = Result<T, NetCdfError>;

/// Error types for NetCDF dataset access.
#[derive(Error, Debug)]
pub enum NetCdfError {
    /// File could not be opened or is not a NetCDF file
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    /// Named dimension is absent
    #[error("Missing dimension: {0}")]
    DimensionNotFound(String),

    /// Named variable is absent
    #[error("Missing variable: {0}")]
    VariableNotFound(String),

    /// The library failed while reading values or metadata
    #[error("Failed to read {name}: {message}")]
    ReadFailed { name: String, message: String },

    /// A read returned a different number of elements than requested
    #[error("Shape mismatch reading {name}: expected {expected} values, got {actual}")]
    ShapeMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
}

impl NetCdfError {
    pub fn read_failed(name: impl Into<String>, message: impl ToString) -> Self {
        Self::ReadFailed {
            name: name.into(),
            message: message.to_string(),
        }
    }
}

impl From<NetCdfError> for GridError {
    fn from(err: NetCdfError) -> Self {
        match err {
            NetCdfError::DimensionNotFound(name) => GridError::MissingDimension(name),
            NetCdfError::VariableNotFound(name) => GridError::MissingVariable(name),
            other => GridError::DataRead(other.to_string()),
        }
    }
}
