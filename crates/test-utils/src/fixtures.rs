//! Common test fixtures for slice-api tests.
//!
//! A [`GridFixture`] describes a complete `(time, z, y, x)` dataset. It can be
//! served from memory via [`crate::MemoryDataset`] or written to a real NetCDF
//! file with [`write_netcdf_fixture`].

use std::path::{Path, PathBuf};

use crate::generators::{create_axis, create_indexed_volume};

/// Name of the field variable.
pub const FIELD: &str = "concentration";

/// A complete in-memory description of a gridded dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct GridFixture {
    pub time: usize,
    pub z: usize,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Row-major (time, z, y, x) field values.
    pub values: Vec<f64>,
    /// Units attribute written on the field variable.
    pub units: String,
}

impl GridFixture {
    /// The reference dataset: `time=2, z=1, y=2, x=3`, `x=[0,1,2]`, `y=[10,20]`.
    ///
    /// The slice at `(t=0, z=0)` is `[[1,2,3],[4,5,6]]`; at `(t=1, z=0)` it is
    /// `[[6,5,4],[3,2,1]]`.
    pub fn scenario() -> Self {
        Self {
            time: 2,
            z: 1,
            x: vec![0.0, 1.0, 2.0],
            y: vec![10.0, 20.0],
            values: vec![
                1.0, 2.0, 3.0, 4.0, 5.0, 6.0, //
                6.0, 5.0, 4.0, 3.0, 2.0, 1.0,
            ],
            units: "kg m-3".to_string(),
        }
    }

    /// A dataset whose cell values encode their indices (see `indexed_value`).
    pub fn indexed(time: usize, z: usize, height: usize, width: usize) -> Self {
        Self {
            time,
            z,
            x: create_axis(width, -50.0, 0.5),
            y: create_axis(height, 25.0, 0.25),
            values: create_indexed_volume(time, z, height, width),
            units: "ppb".to_string(),
        }
    }

    /// A dataset where every `(t, z)` slice is the same 2-D field.
    pub fn from_slice(x: Vec<f64>, y: Vec<f64>, slice: Vec<f64>) -> Self {
        Self {
            time: 1,
            z: 1,
            x,
            y,
            values: slice,
            units: "1".to_string(),
        }
    }

    pub fn width(&self) -> usize {
        self.x.len()
    }

    pub fn height(&self) -> usize {
        self.y.len()
    }

    /// The expected slice values at `(t, z)`.
    pub fn slice(&self, t: usize, z: usize) -> &[f64] {
        let plane = self.width() * self.height();
        let offset = (t * self.z + z) * plane;
        &self.values[offset..offset + plane]
    }
}

/// Write a fixture as a NetCDF file with dimensions `time, z, y, x`,
/// coordinate variables `x(x)`, `y(y)` and a float field `concentration(time, z, y, x)`.
pub fn write_netcdf_fixture(fixture: &GridFixture, path: &Path) -> Result<(), netcdf::Error> {
    let mut file = netcdf::create(path)?;

    file.add_dimension("time", fixture.time)?;
    file.add_dimension("z", fixture.z)?;
    file.add_dimension("y", fixture.height())?;
    file.add_dimension("x", fixture.width())?;

    let mut x = file.add_variable::<f64>("x", &["x"])?;
    x.put_attribute("units", "m")?;
    x.put_values(&fixture.x, ..)?;

    let mut y = file.add_variable::<f64>("y", &["y"])?;
    y.put_attribute("units", "m")?;
    y.put_values(&fixture.y, ..)?;

    let stored: Vec<f32> = fixture.values.iter().map(|&v| v as f32).collect();
    let mut field = file.add_variable::<f32>(FIELD, &["time", "z", "y", "x"])?;
    field.put_attribute("units", fixture.units.as_str())?;
    field.put_attribute("long_name", "tracer concentration")?;
    field.put_values(&stored, ..)?;

    Ok(())
}

/// Write a fixture into a fresh temp directory and return both.
///
/// The directory is removed when the returned `TempDir` is dropped.
pub fn temp_netcdf_fixture(fixture: &GridFixture) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("fixture.nc");
    write_netcdf_fixture(fixture, &path).expect("write NetCDF fixture");
    (dir, path)
}
