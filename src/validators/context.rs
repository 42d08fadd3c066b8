//! Validation context - data passed to validators

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Context provided to validators during validation
///
/// Holds the other field values of the object the validated value belongs to.
/// Chains pass the same context unchanged to every member.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationContext {
    /// Sibling field values, keyed by field name
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl ValidationContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context from a JSON object; any other value yields an empty context
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self { fields },
            _ => Self::default(),
        }
    }

    /// Builder-style field setter
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Get a field value
    pub fn get_field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Check if a field exists
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }
}
