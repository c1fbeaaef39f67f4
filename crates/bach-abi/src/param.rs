//! Type descriptors as they appear in JSON ABI definitions

use serde::{Deserialize, Serialize};

/// One parameter of a function, event or tuple.
///
/// Deserializes straight from a JSON ABI `inputs`/`outputs` entry; keys the
/// codec does not use (`internalType`, `indexed`) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Param {
    /// Parameter name, used for diagnostics and named tuple fields
    #[serde(default)]
    pub name: String,
    /// Canonical type signature, e.g. `uint256`, `address[]`, `tuple`
    #[serde(rename = "type")]
    pub kind: String,
    /// Tuple fields in declaration order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<Param>>,
}

impl Param {
    /// Create a descriptor for a non-tuple type
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            components: None,
        }
    }

    /// Create a descriptor for a tuple or an array of tuples
    pub fn tuple(name: impl Into<String>, kind: impl Into<String>, components: Vec<Param>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            components: Some(components),
        }
    }

    /// Tuple fields, empty when absent
    pub fn components(&self) -> &[Param] {
        self.components.as_deref().unwrap_or(&[])
    }
}
