//! Dataset metadata as reported by `/get-info`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Dimension sizes and variable descriptions of an opened dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub dimensions: BTreeMap<String, usize>,
    pub variables: BTreeMap<String, VariableInfo>,
}

/// Description of a single variable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariableInfo {
    /// CDL type name (`float`, `double`, `int`, ...)
    #[serde(rename = "type")]
    pub var_type: String,
    /// Dimension names in storage order
    pub dimensions: Vec<String>,
    pub attributes: BTreeMap<String, serde_json::Value>,
}

impl VariableInfo {
    pub fn new(var_type: impl Into<String>, dimensions: &[&str]) -> Self {
        Self {
            var_type: var_type.into(),
            dimensions: dimensions.iter().map(|d| d.to_string()).collect(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }
}
