//! Built-in validators

mod callback;
mod digits;
mod in_array;
mod not_empty;
mod pattern;
mod string_length;

pub use callback::Callback;
pub use digits::Digits;
pub use in_array::InArray;
pub use not_empty::NotEmpty;
pub use pattern::RegexMatch;
pub use string_length::StringLength;

use crate::chain::{MessageRenderer, TemplateRenderer};
use crate::validators::ValidationResult;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Message options shared by every built-in validator
#[derive(Debug, Default, Deserialize)]
struct MessageOptions {
    /// Replacement templates keyed by message key
    #[serde(default)]
    messages: HashMap<String, String>,

    /// Maximum rendered message length
    #[serde(default)]
    message_length: Option<usize>,

    /// Hide the value in rendered messages
    #[serde(default)]
    value_obscured: bool,
}

/// Message templates of one validator and the renderer applied to them
#[derive(Debug, Clone)]
pub(crate) struct MessageTemplates {
    templates: Vec<(&'static str, String)>,
    renderer: MessageRenderer,
}

impl MessageTemplates {
    pub(crate) fn new(defaults: &[(&'static str, &str)]) -> Self {
        Self {
            templates: defaults
                .iter()
                .map(|(key, template)| (*key, template.to_string()))
                .collect(),
            renderer: MessageRenderer::new(),
        }
    }

    /// Apply `messages`, `message_length` and `value_obscured` from an option map
    pub(crate) fn apply_options(&mut self, options: &Value) -> Result<(), String> {
        if options.is_null() {
            return Ok(());
        }

        let parsed: MessageOptions = serde_json::from_value(options.clone())
            .map_err(|e| format!("Invalid message options: {}", e))?;

        for (key, template) in parsed.messages {
            self.set_template(&key, template)?;
        }
        self.renderer
            .set_max_length(parsed.message_length)
            .map_err(|e| e.to_string())?;
        self.renderer.set_obscure_value(parsed.value_obscured);
        Ok(())
    }

    /// Replace the template for an existing message key
    pub(crate) fn set_template(&mut self, key: &str, template: String) -> Result<(), String> {
        match self.templates.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => {
                entry.1 = template;
                Ok(())
            }
            None => Err(format!("No message template exists for key '{}'", key)),
        }
    }

    /// Set the template for `key`, adding the key if it is new
    pub(crate) fn put_template(&mut self, key: &'static str, template: String) {
        match self.templates.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = template,
            None => self.templates.push((key, template)),
        }
    }

    pub(crate) fn template(&self, key: &str) -> Option<&str> {
        self.templates
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, t)| t.as_str())
    }

    /// Failure result carrying the rendered message for `key`
    pub(crate) fn fail(&self, key: &'static str, value: &Value, variables: &[(&str, String)]) -> ValidationResult {
        let template = self.template(key).unwrap_or(key);
        ValidationResult::invalid(key, self.renderer.render(template, value, variables))
    }
}
