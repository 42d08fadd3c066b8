//! String length validator

use super::MessageTemplates;
use crate::validators::*;
use serde::Deserialize;
use serde_json::Value;

pub const INVALID: &str = "stringLengthInvalid";
pub const TOO_SHORT: &str = "stringLengthTooShort";
pub const TOO_LONG: &str = "stringLengthTooLong";

/// String length validator configuration
#[derive(Debug, Clone, Default, Deserialize)]
struct StringLengthConfig {
    /// Minimum length in characters (default: 0)
    #[serde(default)]
    min: usize,

    /// Maximum length in characters (default: unlimited)
    #[serde(default)]
    max: Option<usize>,
}

/// Accepts strings whose character count lies within `[min, max]`
#[derive(Debug, Clone)]
pub struct StringLength {
    config: StringLengthConfig,
    templates: MessageTemplates,
}

impl StringLength {
    pub fn new() -> Self {
        Self {
            config: StringLengthConfig::default(),
            templates: MessageTemplates::new(&[
                (INVALID, "Invalid type given. String expected"),
                (TOO_SHORT, "The input is less than %min% characters long"),
                (TOO_LONG, "The input is more than %max% characters long"),
            ]),
        }
    }

    /// Create a validator with explicit bounds
    pub fn with_bounds(min: usize, max: Option<usize>) -> Result<Self, String> {
        let mut validator = Self::new();
        validator.set_bounds(min, max)?;
        Ok(validator)
    }

    fn set_bounds(&mut self, min: usize, max: Option<usize>) -> Result<(), String> {
        if let Some(max) = max {
            if max < min {
                return Err(format!(
                    "The maximum must be greater than or equal to the minimum length, but {} < {}",
                    max, min
                ));
            }
        }
        self.config = StringLengthConfig { min, max };
        Ok(())
    }

    fn variables(&self, length: usize) -> Vec<(&'static str, String)> {
        vec![
            ("min", self.config.min.to_string()),
            (
                "max",
                self.config.max.map(|m| m.to_string()).unwrap_or_default(),
            ),
            ("length", length.to_string()),
        ]
    }
}

impl Default for StringLength {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for StringLength {
    fn validate(&self, value: &Value, _ctx: &ValidationContext) -> ValidationResult {
        let text = match value {
            Value::String(s) => s,
            _ => return self.templates.fail(INVALID, value, &[]),
        };

        let length = text.chars().count();
        if length < self.config.min {
            return self.templates.fail(TOO_SHORT, value, &self.variables(length));
        }
        if let Some(max) = self.config.max {
            if length > max {
                return self.templates.fail(TOO_LONG, value, &self.variables(length));
            }
        }
        ValidationResult::Valid
    }

    fn name(&self) -> &str {
        "string_length"
    }

    fn validator_type(&self) -> ValidatorType {
        ValidatorType::Builtin
    }

    fn initialize(&mut self, options: &Value) -> Result<(), String> {
        if !options.is_null() {
            let config: StringLengthConfig = serde_json::from_value(options.clone())
                .map_err(|e| format!("Invalid string_length config: {}", e))?;
            self.set_bounds(config.min, config.max)?;
        }
        self.templates.apply_options(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bounds() {
        let validator = StringLength::with_bounds(2, Some(4)).unwrap();
        let ctx = ValidationContext::new();

        assert!(validator.validate(&json!("ab"), &ctx).is_valid());
        assert!(validator.validate(&json!("äöüß"), &ctx).is_valid());

        let short = validator.validate(&json!("a"), &ctx);
        assert_eq!(
            short.messages().get(TOO_SHORT),
            Some("The input is less than 2 characters long")
        );

        let long = validator.validate(&json!("abcde"), &ctx);
        assert_eq!(
            long.messages().get(TOO_LONG),
            Some("The input is more than 4 characters long")
        );

        assert!(validator.validate(&json!(12), &ctx).messages().contains_key(INVALID));
    }

    #[test]
    fn test_initialize_from_options() {
        let mut validator = StringLength::new();
        validator
            .initialize(&json!({ "min": 3, "messages": { "stringLengthTooShort": "%length% < %min%" } }))
            .unwrap();

        let result = validator.validate(&json!("ab"), &ValidationContext::new());
        assert_eq!(result.messages().get(TOO_SHORT), Some("2 < 3"));
    }

    #[test]
    fn test_max_below_min_is_rejected() {
        assert!(StringLength::with_bounds(5, Some(2)).is_err());

        let mut validator = StringLength::new();
        assert!(validator.initialize(&json!({ "min": 5, "max": 2 })).is_err());
        assert!(validator.initialize(&json!({ "min": "five" })).is_err());
    }
}
