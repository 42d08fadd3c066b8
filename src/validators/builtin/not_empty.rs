//! Required-value validator

use super::MessageTemplates;
use crate::validators::*;
use serde_json::Value;

pub const IS_EMPTY: &str = "isEmpty";

/// Rejects null, empty strings, empty arrays and empty objects
#[derive(Debug, Clone)]
pub struct NotEmpty {
    templates: MessageTemplates,
}

impl NotEmpty {
    pub fn new() -> Self {
        Self {
            templates: MessageTemplates::new(&[(IS_EMPTY, "Value is required and can't be empty")]),
        }
    }
}

impl Default for NotEmpty {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for NotEmpty {
    fn validate(&self, value: &Value, _ctx: &ValidationContext) -> ValidationResult {
        let empty = match value {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::Object(fields) => fields.is_empty(),
            Value::Bool(_) | Value::Number(_) => false,
        };

        if empty {
            self.templates.fail(IS_EMPTY, value, &[])
        } else {
            ValidationResult::Valid
        }
    }

    fn name(&self) -> &str {
        "not_empty"
    }

    fn validator_type(&self) -> ValidatorType {
        ValidatorType::Builtin
    }

    fn initialize(&mut self, options: &Value) -> Result<(), String> {
        self.templates.apply_options(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_not_empty() {
        let validator = NotEmpty::new();
        let ctx = ValidationContext::new();

        for value in [json!("a"), json!(0), json!(false), json!([0]), json!({"a": 1})] {
            assert!(validator.validate(&value, &ctx).is_valid(), "{} should pass", value);
        }
        for value in [Value::Null, json!(""), json!([]), json!({})] {
            let result = validator.validate(&value, &ctx);
            assert!(result.messages().contains_key(IS_EMPTY), "{} should fail", value);
        }
    }
}
