//! Closure-backed validator

use super::MessageTemplates;
use crate::validators::*;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

pub const CALLBACK_VALUE: &str = "callbackValue";

type CallbackFn = dyn Fn(&Value, &ValidationContext) -> bool + Send + Sync;

/// Validator delegating the decision to a closure
///
/// Not available by name in the registry since it needs code; register an
/// instance with [`ValidatorRegistry::register_validator`] to make it so.
#[derive(Clone)]
pub struct Callback {
    name: String,
    callback: Arc<CallbackFn>,
    templates: MessageTemplates,
}

impl Callback {
    pub fn new<F>(name: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&Value, &ValidationContext) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            callback: Arc::new(callback),
            templates: MessageTemplates::new(&[(CALLBACK_VALUE, "The input is not valid")]),
        }
    }

    /// Replace the failure message template
    pub fn with_message(mut self, template: impl Into<String>) -> Self {
        self.templates.put_template(CALLBACK_VALUE, template.into());
        self
    }
}

impl Validator for Callback {
    fn validate(&self, value: &Value, ctx: &ValidationContext) -> ValidationResult {
        if (self.callback)(value, ctx) {
            ValidationResult::Valid
        } else {
            self.templates.fail(CALLBACK_VALUE, value, &[])
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn validator_type(&self) -> ValidatorType {
        ValidatorType::Callback
    }

    fn initialize(&mut self, options: &Value) -> Result<(), String> {
        self.templates.apply_options(options)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("name", &self.name)
            .field("templates", &self.templates)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_callback_uses_context() {
        let validator = Callback::new("matches_confirmation", |value, ctx| {
            ctx.get_field("confirmation") == Some(value)
        })
        .with_message("'%value%' does not match the confirmation");

        let ctx = ValidationContext::new().with_field("confirmation", json!("hunter2"));
        assert!(validator.validate(&json!("hunter2"), &ctx).is_valid());

        let result = validator.validate(&json!("hunter3"), &ctx);
        assert_eq!(
            result.messages().get(CALLBACK_VALUE),
            Some("'hunter3' does not match the confirmation")
        );
        assert_eq!(validator.validator_type(), ValidatorType::Callback);
    }

    #[test]
    fn test_with_message_replaces_default() {
        let validator = Callback::new("never", |_, _| false).with_message("rejected");
        assert_eq!(validator.templates.template(CALLBACK_VALUE), Some("rejected"));

        let result = validator.validate(&json!(1), &ValidationContext::new());
        assert_eq!(result.messages().len(), 1);
        assert_eq!(result.messages().get(CALLBACK_VALUE), Some("rejected"));
    }
}
