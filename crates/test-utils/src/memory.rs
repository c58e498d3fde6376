//! In-memory implementation of [`GriddedDataset`].

use std::collections::BTreeMap;

use netcdf_parser::{GriddedDataset, NetCdfError, NetCdfResult, VariableInfo};
use serde_json::json;

use crate::fixtures::{GridFixture, FIELD};

struct MemoryVariable {
    info: VariableInfo,
    values: Vec<f64>,
}

/// A dataset held entirely in memory, for handler and extractor tests.
#[derive(Default)]
pub struct MemoryDataset {
    dimensions: BTreeMap<String, usize>,
    variables: BTreeMap<String, MemoryVariable>,
}

impl MemoryDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dimension(mut self, name: &str, size: usize) -> Self {
        self.dimensions.insert(name.to_string(), size);
        self
    }

    /// Add a `double` variable over the named dimensions.
    pub fn with_variable(mut self, name: &str, dimensions: &[&str], values: Vec<f64>) -> Self {
        self.variables.insert(
            name.to_string(),
            MemoryVariable {
                info: VariableInfo::new("double", dimensions),
                values,
            },
        );
        self
    }

    pub fn without_variable(mut self, name: &str) -> Self {
        self.variables.remove(name);
        self
    }

    pub fn without_dimension(mut self, name: &str) -> Self {
        self.dimensions.remove(name);
        self
    }

    /// Build the standard `time, z, y, x` layout from a fixture.
    pub fn from_fixture(fixture: &GridFixture) -> Self {
        let mut dataset = Self::new()
            .with_dimension("time", fixture.time)
            .with_dimension("z", fixture.z)
            .with_dimension("y", fixture.height())
            .with_dimension("x", fixture.width())
            .with_variable("x", &["x"], fixture.x.clone())
            .with_variable("y", &["y"], fixture.y.clone())
            .with_variable(FIELD, &["time", "z", "y", "x"], fixture.values.clone());

        if let Some(field) = dataset.variables.get_mut(FIELD) {
            field.info.var_type = "float".to_string();
            field
                .info
                .attributes
                .insert("units".to_string(), json!(fixture.units));
        }
        dataset
    }

    /// The reference dataset from [`GridFixture::scenario`].
    pub fn scenario() -> Self {
        Self::from_fixture(&GridFixture::scenario())
    }

    fn variable(&self, name: &str) -> NetCdfResult<&MemoryVariable> {
        self.variables
            .get(name)
            .ok_or_else(|| NetCdfError::VariableNotFound(name.to_string()))
    }

    fn shape(&self, var: &MemoryVariable) -> NetCdfResult<Vec<usize>> {
        var.info
            .dimensions
            .iter()
            .map(|d| self.dimension_size(d))
            .collect()
    }
}

impl GriddedDataset for MemoryDataset {
    fn dimension_size(&self, name: &str) -> NetCdfResult<usize> {
        self.dimensions
            .get(name)
            .copied()
            .ok_or_else(|| NetCdfError::DimensionNotFound(name.to_string()))
    }

    fn has_variable(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    fn read_variable_1d(&self, name: &str, length: usize) -> NetCdfResult<Vec<f64>> {
        let var = self.variable(name)?;
        if var.values.len() < length {
            return Err(NetCdfError::ShapeMismatch {
                name: name.to_string(),
                expected: length,
                actual: var.values.len(),
            });
        }
        Ok(var.values[..length].to_vec())
    }

    fn read_slice_4d(
        &self,
        name: &str,
        start: [usize; 4],
        count: [usize; 4],
    ) -> NetCdfResult<Vec<f64>> {
        let var = self.variable(name)?;
        let shape = self.shape(var)?;
        if shape.len() != 4 {
            return Err(NetCdfError::read_failed(
                name,
                format!("expected 4 dimensions, found {}", shape.len()),
            ));
        }
        for axis in 0..4 {
            if start[axis] + count[axis] > shape[axis] {
                return Err(NetCdfError::read_failed(
                    name,
                    format!("hyperslab exceeds dimension {} of size {}", axis, shape[axis]),
                ));
            }
        }

        let mut out = Vec::with_capacity(count.iter().product());
        for t in start[0]..start[0] + count[0] {
            for k in start[1]..start[1] + count[1] {
                for row in start[2]..start[2] + count[2] {
                    let base = ((t * shape[1] + k) * shape[2] + row) * shape[3];
                    let from = base + start[3];
                    let to = from + count[3];
                    let cells = var.values.get(from..to).ok_or_else(|| NetCdfError::ShapeMismatch {
                        name: name.to_string(),
                        expected: shape.iter().product(),
                        actual: var.values.len(),
                    })?;
                    out.extend_from_slice(cells);
                }
            }
        }
        Ok(out)
    }

    fn list_dimensions(&self) -> NetCdfResult<BTreeMap<String, usize>> {
        Ok(self.dimensions.clone())
    }

    fn list_variables(&self) -> NetCdfResult<BTreeMap<String, VariableInfo>> {
        Ok(self
            .variables
            .iter()
            .map(|(name, var)| (name.clone(), var.info.clone()))
            .collect())
    }
}
