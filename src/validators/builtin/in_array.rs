//! Haystack membership validator

use super::MessageTemplates;
use crate::chain::template::display_value;
use crate::validators::*;
use serde::Deserialize;
use serde_json::Value;

pub const NOT_IN_ARRAY: &str = "notInArray";

/// In-array validator configuration
#[derive(Debug, Clone, Default, Deserialize)]
struct InArrayConfig {
    /// Accepted values
    haystack: Vec<Value>,

    /// Compare JSON values exactly instead of by their text form
    #[serde(default)]
    strict: bool,
}

/// Accepts values found in a haystack
///
/// Without `strict`, `"1"` and `1` are considered equal.
#[derive(Debug, Clone)]
pub struct InArray {
    config: InArrayConfig,
    templates: MessageTemplates,
}

impl InArray {
    /// Create a validator with an empty haystack; it rejects everything until initialized
    pub fn new() -> Self {
        Self {
            config: InArrayConfig::default(),
            templates: MessageTemplates::new(&[(
                NOT_IN_ARRAY,
                "The input was not found in the haystack",
            )]),
        }
    }

    pub fn with_haystack(haystack: Vec<Value>) -> Self {
        let mut validator = Self::new();
        validator.config.haystack = haystack;
        validator
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.config.strict = strict;
        self
    }

    fn contains(&self, value: &Value) -> bool {
        self.config.haystack.iter().any(|candidate| {
            if self.config.strict {
                candidate == value
            } else {
                candidate == value || loose_eq(candidate, value)
            }
        })
    }
}

/// Scalars compare by text form; containers never compare loosely
fn loose_eq(a: &Value, b: &Value) -> bool {
    let scalar = |v: &Value| !matches!(v, Value::Array(_) | Value::Object(_));
    scalar(a) && scalar(b) && display_value(a) == display_value(b)
}

impl Default for InArray {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for InArray {
    fn validate(&self, value: &Value, _ctx: &ValidationContext) -> ValidationResult {
        if self.contains(value) {
            ValidationResult::Valid
        } else {
            self.templates.fail(NOT_IN_ARRAY, value, &[])
        }
    }

    fn name(&self) -> &str {
        "in_array"
    }

    fn validator_type(&self) -> ValidatorType {
        ValidatorType::Builtin
    }

    fn initialize(&mut self, options: &Value) -> Result<(), String> {
        self.config = serde_json::from_value(options.clone())
            .map_err(|e| format!("Invalid in_array config: {}", e))?;
        self.templates.apply_options(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_loose_membership() {
        let validator = InArray::with_haystack(vec![json!(1), json!("two"), json!(null)]);
        let ctx = ValidationContext::new();

        assert!(validator.validate(&json!(1), &ctx).is_valid());
        assert!(validator.validate(&json!("1"), &ctx).is_valid());
        assert!(validator.validate(&json!("two"), &ctx).is_valid());
        assert!(validator.validate(&json!(""), &ctx).is_valid());
        assert!(validator.validate(&json!("three"), &ctx).messages().contains_key(NOT_IN_ARRAY));
    }

    #[test]
    fn test_strict_membership() {
        let validator = InArray::with_haystack(vec![json!(1)]).strict(true);
        let ctx = ValidationContext::new();

        assert!(validator.validate(&json!(1), &ctx).is_valid());
        assert!(!validator.validate(&json!("1"), &ctx).is_valid());
    }

    #[test]
    fn test_initialize_requires_haystack() {
        let mut validator = InArray::new();
        assert!(validator.initialize(&json!({})).is_err());
        assert!(validator.initialize(&json!({ "haystack": ["a"], "strict": true })).is_ok());
        assert!(validator.validate(&json!("a"), &ValidationContext::new()).is_valid());
    }
}
