//! Regular expression validator

use super::MessageTemplates;
use crate::validators::*;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

pub const INVALID: &str = "regexInvalid";
pub const NOT_MATCH: &str = "regexNotMatch";
pub const ERROROUS: &str = "regexErrorous";

/// Regex validator configuration
#[derive(Debug, Clone, Deserialize)]
struct RegexConfig {
    /// Pattern the value must match
    pattern: String,
}

/// Accepts strings and numbers matching a regular expression
#[derive(Debug, Clone)]
pub struct RegexMatch {
    pattern: Option<Regex>,
    templates: MessageTemplates,
}

impl RegexMatch {
    /// Create an unconfigured validator; it rejects everything until initialized
    pub fn new() -> Self {
        Self {
            pattern: None,
            templates: MessageTemplates::new(&[
                (INVALID, "Invalid type given. String, integer or float expected"),
                (NOT_MATCH, "The input does not match against pattern '%pattern%'"),
                (ERROROUS, "There was an internal error while using the pattern '%pattern%'"),
            ]),
        }
    }

    /// Create a validator for `pattern`
    pub fn with_pattern(pattern: &str) -> Result<Self, String> {
        let mut validator = Self::new();
        validator.set_pattern(pattern)?;
        Ok(validator)
    }

    fn set_pattern(&mut self, pattern: &str) -> Result<(), String> {
        let regex = Regex::new(pattern)
            .map_err(|e| format!("Invalid pattern '{}': {}", pattern, e))?;
        self.pattern = Some(regex);
        Ok(())
    }

    fn variables(&self) -> [(&'static str, String); 1] {
        [(
            "pattern",
            self.pattern
                .as_ref()
                .map(|r| r.as_str().to_string())
                .unwrap_or_default(),
        )]
    }
}

impl Default for RegexMatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for RegexMatch {
    fn validate(&self, value: &Value, _ctx: &ValidationContext) -> ValidationResult {
        let text = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return self.templates.fail(INVALID, value, &[]),
        };

        let Some(pattern) = &self.pattern else {
            warn!("⚠️  Regex validator used without a pattern");
            return self.templates.fail(ERROROUS, value, &self.variables());
        };

        if pattern.is_match(&text) {
            ValidationResult::Valid
        } else {
            self.templates.fail(NOT_MATCH, value, &self.variables())
        }
    }

    fn name(&self) -> &str {
        "regex"
    }

    fn validator_type(&self) -> ValidatorType {
        ValidatorType::Builtin
    }

    fn initialize(&mut self, options: &Value) -> Result<(), String> {
        let config: RegexConfig = serde_json::from_value(options.clone())
            .map_err(|e| format!("Invalid regex config: {}", e))?;
        self.set_pattern(&config.pattern)?;
        self.templates.apply_options(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pattern_match() {
        let validator = RegexMatch::with_pattern(r"^\d{4}[A-Z]{2}$").unwrap();
        let ctx = ValidationContext::new();

        assert!(validator.validate(&json!("1234AB"), &ctx).is_valid());

        let result = validator.validate(&json!("12345"), &ctx);
        assert_eq!(
            result.messages().get(NOT_MATCH),
            Some(r"The input does not match against pattern '^\d{4}[A-Z]{2}$'")
        );
        assert!(validator.validate(&json!(null), &ctx).messages().contains_key(INVALID));
    }

    #[test]
    fn test_numbers_are_matched_as_text() {
        let validator = RegexMatch::with_pattern(r"^\d+$").unwrap();
        assert!(validator.validate(&json!(2024), &ValidationContext::new()).is_valid());
    }

    #[test]
    fn test_initialize() {
        let mut validator = RegexMatch::new();
        assert!(validator.initialize(&json!({})).is_err());
        assert!(validator.initialize(&json!({ "pattern": "(" })).is_err());
        assert!(validator.initialize(&json!({ "pattern": "^a" })).is_ok());
        assert!(validator.validate(&json!("abc"), &ValidationContext::new()).is_valid());
    }

    #[test]
    fn test_unconfigured_rejects() {
        let result = RegexMatch::new().validate(&json!("abc"), &ValidationContext::new());
        assert!(result.messages().contains_key(ERROROUS));
    }
}
