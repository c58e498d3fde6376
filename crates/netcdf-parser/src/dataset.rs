//! The read-only dataset interface used by the slice extractor.

use std::collections::BTreeMap;

use crate::error::NetCdfResult;
use crate::metadata::{DatasetInfo, VariableInfo};

/// Read access to a gridded dataset opened once for the process lifetime.
///
/// Implementations must be safe to share between request handlers. Calls may
/// block on file I/O, so async callers should run them on a blocking thread.
pub trait GriddedDataset: Send + Sync {
    /// Size of the named dimension.
    fn dimension_size(&self, name: &str) -> NetCdfResult<usize>;

    /// Whether a variable with this name exists.
    fn has_variable(&self, name: &str) -> bool;

    /// Read the first `length` values of a 1-D variable.
    fn read_variable_1d(&self, name: &str, length: usize) -> NetCdfResult<Vec<f64>>;

    /// Read a 4-D hyperslab as a flat row-major sequence (last axis fastest).
    fn read_slice_4d(
        &self,
        name: &str,
        start: [usize; 4],
        count: [usize; 4],
    ) -> NetCdfResult<Vec<f64>>;

    /// All dimensions with their sizes.
    fn list_dimensions(&self) -> NetCdfResult<BTreeMap<String, usize>>;

    /// All variables with their type, dimensions and attributes.
    fn list_variables(&self) -> NetCdfResult<BTreeMap<String, VariableInfo>>;

    fn info(&self) -> NetCdfResult<DatasetInfo> {
        Ok(DatasetInfo {
            dimensions: self.list_dimensions()?,
            variables: self.list_variables()?,
        })
    }
}
