//! Message template rendering
//!
//! Every message a validator or chain emits goes through a [`TemplateRenderer`].
//! The default [`MessageRenderer`] translates the template, substitutes
//! `%value%` and named `%variables%`, then truncates to a maximum length.

use crate::validators::ChainError;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Marker appended to truncated messages
pub const ELLIPSIS: &str = "...";

/// Smallest accepted maximum message length (room for the ellipsis)
pub const MIN_MESSAGE_LENGTH: usize = ELLIPSIS.len();

/// Renders a message template against a validated value
pub trait TemplateRenderer: Send + Sync {
    /// Render `template`, substituting `%value%` and every `%name%` in `variables`
    fn render(&self, template: &str, value: &Value, variables: &[(&str, String)]) -> String;
}

/// Looks up a translated form of a message template
pub trait Translator: Send + Sync {
    /// Return the translation, or `None` to keep the template as is
    fn translate(&self, template: &str) -> Option<String>;
}

impl Translator for HashMap<String, String> {
    fn translate(&self, template: &str) -> Option<String> {
        self.get(template).cloned()
    }
}

/// Default renderer: translation, substitution, obscuring and truncation
#[derive(Clone, Default)]
pub struct MessageRenderer {
    max_length: Option<usize>,
    obscure_value: bool,
    translator: Option<Arc<dyn Translator>>,
}

impl MessageRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum rendered length in characters, `None` for unlimited
    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    /// Set the maximum rendered length
    ///
    /// Lengths below [`MIN_MESSAGE_LENGTH`] cannot hold the ellipsis and are rejected.
    pub fn set_max_length(&mut self, max_length: Option<usize>) -> Result<(), ChainError> {
        if let Some(len) = max_length {
            if len < MIN_MESSAGE_LENGTH {
                return Err(ChainError::Config(format!(
                    "message length must be at least {}, got {}",
                    MIN_MESSAGE_LENGTH, len
                )));
            }
        }
        self.max_length = max_length;
        Ok(())
    }

    pub fn obscure_value(&self) -> bool {
        self.obscure_value
    }

    /// Replace `%value%` with asterisks instead of the value itself
    pub fn set_obscure_value(&mut self, obscure: bool) {
        self.obscure_value = obscure;
    }

    pub fn set_translator(&mut self, translator: Option<Arc<dyn Translator>>) {
        self.translator = translator;
    }

    pub fn has_translator(&self) -> bool {
        self.translator.is_some()
    }
}

impl TemplateRenderer for MessageRenderer {
    fn render(&self, template: &str, value: &Value, variables: &[(&str, String)]) -> String {
        let mut message = self
            .translator
            .as_ref()
            .and_then(|t| t.translate(template))
            .unwrap_or_else(|| template.to_string());

        if message.contains("%value%") {
            let shown = display_value(value);
            let shown = if self.obscure_value {
                "*".repeat(shown.chars().count())
            } else {
                shown
            };
            message = message.replace("%value%", &shown);
        }

        for (name, replacement) in variables {
            message = message.replace(&format!("%{}%", name), replacement);
        }

        match self.max_length {
            Some(max) if message.chars().count() > max => {
                let mut truncated: String = message.chars().take(max - ELLIPSIS.len()).collect();
                truncated.push_str(ELLIPSIS);
                truncated
            }
            _ => message,
        }
    }
}

impl fmt::Debug for MessageRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageRenderer")
            .field("max_length", &self.max_length)
            .field("obscure_value", &self.obscure_value)
            .field("translator", &self.translator.is_some())
            .finish()
    }
}

/// Text form of a value inside a message: strings raw, null empty, others as compact JSON
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
