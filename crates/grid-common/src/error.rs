//! Error types for slice requests.

use thiserror::Error;

/// Result type alias using GridError.
pub type GridResult<T> = Result<T, GridError>;

/// Failure of a single slice request.
///
/// Every variant is reported to the client as `{"error": "<message>"}`; the
/// variant only decides the HTTP status.
#[derive(Debug, Error)]
pub enum GridError {
    // === Request Errors ===
    #[error("Invalid or missing parameter '{0}': expected a non-negative integer")]
    InvalidParameter(String),

    #[error("Index out of bounds for '{param}': {index} >= {size}")]
    OutOfBounds {
        param: String,
        index: usize,
        size: usize,
    },

    // === Dataset Errors ===
    #[error("Required variable not found in dataset: {0}")]
    MissingVariable(String),

    #[error("Required dimension not found in dataset: {0}")]
    MissingDimension(String),

    #[error("Failed to read data: {0}")]
    DataRead(String),

    // === Rendering Errors ===
    #[error("Cannot render an empty slice")]
    EmptySlice,

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl GridError {
    /// Create an InvalidParameter error.
    pub fn invalid_parameter(param: impl Into<String>) -> Self {
        Self::InvalidParameter(param.into())
    }

    /// Create an OutOfBounds error.
    pub fn out_of_bounds(param: impl Into<String>, index: usize, size: usize) -> Self {
        Self::OutOfBounds {
            param: param.into(),
            index,
            size,
        }
    }

    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            GridError::InvalidParameter(_) | GridError::OutOfBounds { .. } => 400,

            GridError::MissingVariable(_)
            | GridError::MissingDimension(_)
            | GridError::DataRead(_)
            | GridError::EmptySlice
            | GridError::Internal(_) => 500,
        }
    }

    /// Whether the failure was caused by the request rather than the server.
    pub fn is_client_error(&self) -> bool {
        self.http_status_code() < 500
    }
}

impl From<serde_json::Error> for GridError {
    fn from(err: serde_json::Error) -> Self {
        GridError::Internal(format!("JSON error: {}", err))
    }
}
