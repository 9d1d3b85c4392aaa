use serde::{Deserialize, Serialize};

/// Presence constraints checked before value comparison.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FieldSet {
    /// Fields that must not be null or missing.
    pub scalar: Vec<String>,
    /// Fields that must hold a non-empty object.
    pub object: Vec<String>,
    /// Fields that must hold an array (empty allowed).
    pub array: Vec<String>,
}

