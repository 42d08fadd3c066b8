//! Digits-only validator

use super::MessageTemplates;
use crate::validators::*;
use serde_json::Value;
use tracing::debug;

pub const NOT_DIGITS: &str = "notDigits";
pub const STRING_EMPTY: &str = "digitsStringEmpty";
pub const INVALID: &str = "digitsInvalid";

/// Accepts strings and numbers made of ASCII digits only
#[derive(Debug, Clone)]
pub struct Digits {
    templates: MessageTemplates,
}

impl Digits {
    pub fn new() -> Self {
        Self {
            templates: MessageTemplates::new(&[
                (NOT_DIGITS, "The input must contain only digits"),
                (STRING_EMPTY, "The input is an empty string"),
                (INVALID, "Invalid type given. String, integer or float expected"),
            ]),
        }
    }
}

impl Default for Digits {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for Digits {
    fn validate(&self, value: &Value, _ctx: &ValidationContext) -> ValidationResult {
        let text = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return self.templates.fail(INVALID, value, &[]),
        };

        if text.is_empty() {
            return self.templates.fail(STRING_EMPTY, value, &[]);
        }

        if text.chars().all(|c| c.is_ascii_digit()) {
            debug!("✅ Digits accepted value");
            ValidationResult::Valid
        } else {
            self.templates.fail(NOT_DIGITS, value, &[])
        }
    }

    fn name(&self) -> &str {
        "digits"
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

    fn check(value: Value) -> ValidationResult {
        Digits::new().validate(&value, &ValidationContext::new())
    }

    #[test]
    fn test_digits_accepted() {
        assert!(check(json!("0123")).is_valid());
        assert!(check(json!(42)).is_valid());
    }

    #[test]
    fn test_digits_rejected() {
        assert!(check(json!("12a")).messages().contains_key(NOT_DIGITS));
        assert!(check(json!(-5)).messages().contains_key(NOT_DIGITS));
        assert!(check(json!(1.5)).messages().contains_key(NOT_DIGITS));
        assert!(check(json!("")).messages().contains_key(STRING_EMPTY));
        assert!(check(json!(true)).messages().contains_key(INVALID));
        assert!(check(Value::Null).messages().contains_key(INVALID));
    }
}
