//! Native NetCDF dataset access using the netcdf library.
//!
//! # Concurrency
//!
//! libnetcdf and HDF5 are not guaranteed to be thread-safe, so the open file
//! handle lives behind a `std::sync::Mutex` and each read takes it for the
//! duration of one variable read. Reads block the calling thread, so callers on
//! a tokio runtime should prefer `tokio::task::spawn_blocking`, but a read from
//! inside an async task is still valid.
//!
//! A panic while the handle is held poisons the lock. Later reads then fail
//! with [`NetCdfError::ReadFailed`] instead of touching a file in an unknown
//! state.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, Once};

use netcdf::types::{FloatType, IntType, NcVariableType};
use netcdf::AttributeValue;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::dataset::GriddedDataset;
use crate::error::{NetCdfError, NetCdfResult};
use crate::metadata::VariableInfo;

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints verbose error messages to stderr even when errors
/// are handled gracefully by the Rust code (e.g., when probing attributes).
/// Call early in `main()`, before any NetCDF operation. Safe to call more than once.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and we're passing null pointers
        // to disable error output, which is a documented valid use.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// A NetCDF file opened read-only for the lifetime of the process.
pub struct NetCdfDataset {
    path: PathBuf,
    file: Mutex<netcdf::File>,
}

impl NetCdfDataset {
    /// Open a NetCDF file in read-only mode.
    pub fn open<P: AsRef<Path>>(path: P) -> NetCdfResult<Self> {
        silence_hdf5_errors();

        let path = path.as_ref();
        let file = netcdf::open(path).map_err(|e| {
            NetCdfError::InvalidFormat(format!("Failed to open NetCDF {}: {}", path.display(), e))
        })?;

        info!(
            path = %path.display(),
            dimensions = file.dimensions().count(),
            variables = file.variables().count(),
            "Opened NetCDF dataset"
        );

        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Take the file handle for a read of `name`.
    fn lock(&self, name: &str) -> NetCdfResult<MutexGuard<'_, netcdf::File>> {
        self.file.lock().map_err(|_| {
            warn!(path = %self.path.display(), name, "NetCDF handle lock poisoned");
            NetCdfError::read_failed(name, "dataset lock poisoned")
        })
    }
}

impl GriddedDataset for NetCdfDataset {
    fn dimension_size(&self, name: &str) -> NetCdfResult<usize> {
        let file = self.lock(name)?;
        file.dimension(name)
            .map(|d| d.len())
            .ok_or_else(|| NetCdfError::DimensionNotFound(name.to_string()))
    }

    fn has_variable(&self, name: &str) -> bool {
        self.lock(name)
            .map(|file| file.variable(name).is_some())
            .unwrap_or(false)
    }

    fn read_variable_1d(&self, name: &str, length: usize) -> NetCdfResult<Vec<f64>> {
        let file = self.lock(name)?;
        let var = file
            .variable(name)
            .ok_or_else(|| NetCdfError::VariableNotFound(name.to_string()))?;

        let mut values: Vec<f64> = var
            .get_values(..)
            .map_err(|e| NetCdfError::read_failed(name, e))?;

        if values.len() < length {
            return Err(NetCdfError::ShapeMismatch {
                name: name.to_string(),
                expected: length,
                actual: values.len(),
            });
        }
        values.truncate(length);

        Ok(values)
    }

    fn read_slice_4d(
        &self,
        name: &str,
        start: [usize; 4],
        count: [usize; 4],
    ) -> NetCdfResult<Vec<f64>> {
        let expected: usize = count.iter().product();
        if expected == 0 {
            return Ok(Vec::new());
        }

        let file = self.lock(name)?;
        let var = file
            .variable(name)
            .ok_or_else(|| NetCdfError::VariableNotFound(name.to_string()))?;

        let extents = (
            start[0]..start[0] + count[0],
            start[1]..start[1] + count[1],
            start[2]..start[2] + count[2],
            start[3]..start[3] + count[3],
        );
        let values: Vec<f64> = var
            .get_values(extents)
            .map_err(|e| NetCdfError::read_failed(name, e))?;

        if values.len() != expected {
            return Err(NetCdfError::ShapeMismatch {
                name: name.to_string(),
                expected,
                actual: values.len(),
            });
        }

        debug!(variable = name, ?start, ?count, "Read hyperslab");
        Ok(values)
    }

    fn list_dimensions(&self) -> NetCdfResult<BTreeMap<String, usize>> {
        let file = self.lock("dimensions")?;
        Ok(file.dimensions().map(|d| (d.name(), d.len())).collect())
    }

    fn list_variables(&self) -> NetCdfResult<BTreeMap<String, VariableInfo>> {
        let file = self.lock("variables")?;
        let mut variables = BTreeMap::new();

        for var in file.variables() {
            let name = var.name();
            let mut attributes = BTreeMap::new();
            for attr in var.attributes() {
                let value = attr
                    .value()
                    .map_err(|e| NetCdfError::read_failed(format!("{}:{}", name, attr.name()), e))?;
                attributes.insert(attr.name().to_string(), attribute_to_json(value));
            }

            let info = VariableInfo {
                var_type: type_name(&var.vartype()).to_string(),
                dimensions: var.dimensions().iter().map(|d| d.name()).collect(),
                attributes,
            };
            variables.insert(name, info);
        }

        Ok(variables)
    }
}

// =============================================================================
// Internal helpers
// =============================================================================

/// CDL name of a variable type.
fn type_name(vartype: &NcVariableType) -> &'static str {
    match vartype {
        NcVariableType::Int(IntType::I8) => "byte",
        NcVariableType::Int(IntType::U8) => "ubyte",
        NcVariableType::Int(IntType::I16) => "short",
        NcVariableType::Int(IntType::U16) => "ushort",
        NcVariableType::Int(IntType::I32) => "int",
        NcVariableType::Int(IntType::U32) => "uint",
        NcVariableType::Int(IntType::I64) => "int64",
        NcVariableType::Int(IntType::U64) => "uint64",
        NcVariableType::Float(FloatType::F32) => "float",
        NcVariableType::Float(FloatType::F64) => "double",
        NcVariableType::Char => "char",
        NcVariableType::String => "string",
        _ => "user-defined",
    }
}

/// Attribute value as JSON: scalars as numbers, arrays as arrays, text as strings.
#[allow(unreachable_patterns)]
fn attribute_to_json(value: AttributeValue) -> Value {
    match value {
        AttributeValue::Uchar(v) => json!(v),
        AttributeValue::Uchars(v) => json!(v),
        AttributeValue::Schar(v) => json!(v),
        AttributeValue::Schars(v) => json!(v),
        AttributeValue::Ushort(v) => json!(v),
        AttributeValue::Ushorts(v) => json!(v),
        AttributeValue::Short(v) => json!(v),
        AttributeValue::Shorts(v) => json!(v),
        AttributeValue::Uint(v) => json!(v),
        AttributeValue::Uints(v) => json!(v),
        AttributeValue::Int(v) => json!(v),
        AttributeValue::Ints(v) => json!(v),
        AttributeValue::Ulonglong(v) => json!(v),
        AttributeValue::Ulonglongs(v) => json!(v),
        AttributeValue::Longlong(v) => json!(v),
        AttributeValue::Longlongs(v) => json!(v),
        AttributeValue::Float(v) => json!(v),
        AttributeValue::Floats(v) => json!(v),
        AttributeValue::Double(v) => json!(v),
        AttributeValue::Doubles(v) => json!(v),
        AttributeValue::Str(v) => json!(v),
        AttributeValue::Strs(v) => json!(v),
        _ => Value::Null,
    }
}
