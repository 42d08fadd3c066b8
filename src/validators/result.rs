//! Validation result types

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Outcome of running a validator (or a whole chain) against a value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "messages", rename_all = "snake_case")]
pub enum ValidationResult {
    /// The value passed
    Valid,

    /// The value failed; carries the failure messages (possibly empty)
    Invalid(Messages),
}

impl ValidationResult {
    /// Failure with a single keyed message
    pub fn invalid(key: impl Into<String>, text: impl Into<String>) -> Self {
        let mut messages = Messages::new();
        messages.insert(key, text);
        ValidationResult::Invalid(messages)
    }

    /// Check if result is Valid
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Failure messages, empty for a valid result
    pub fn messages(&self) -> Messages {
        match self {
            ValidationResult::Valid => Messages::new(),
            ValidationResult::Invalid(messages) => messages.clone(),
        }
    }

    /// Consume the result, yielding its failure messages
    pub fn into_messages(self) -> Messages {
        match self {
            ValidationResult::Valid => Messages::new(),
            ValidationResult::Invalid(messages) => messages,
        }
    }
}

/// Ordered mapping of message key to message text
///
/// Iteration order is insertion order. Inserting an existing key replaces the
/// text in place. Serializes as a JSON object with the same ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Messages {
    entries: Vec<(String, String)>,
}

impl Messages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a message, replacing the text of an existing key
    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        let key = key.into();
        let text = text.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = text,
            None => self.entries.push((key, text)),
        }
    }

    /// Append a message whose key is known not to be present yet
    pub(crate) fn push(&mut self, key: String, text: String) {
        self.entries.push((key, text));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, text)| text.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Message texts in order, without their keys
    pub fn texts(&self) -> Vec<&str> {
        self.entries.iter().map(|(_, v)| v.as_str()).collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Messages {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut messages = Messages::new();
        for (key, text) in iter {
            messages.insert(key, text);
        }
        messages
    }
}

impl IntoIterator for Messages {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for Messages {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, text) in &self.entries {
            map.serialize_entry(key, text)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Messages {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MessagesVisitor;

        impl<'de> Visitor<'de> for MessagesVisitor {
            type Value = Messages;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a map of message keys to message texts")
            }

            fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Messages, M::Error> {
                let mut messages = Messages::new();
                while let Some((key, text)) = access.next_entry::<String, String>()? {
                    messages.insert(key, text);
                }
                Ok(messages)
            }
        }

        deserializer.deserialize_map(MessagesVisitor)
    }
}

/// Error type for chain configuration and validator lookup
///
/// A value failing validation is not an error; it is reported through
/// [`ValidationResult::Invalid`].
#[derive(Debug, Error)]
pub enum ChainError {
    /// Invalid configuration value supplied to a setter or option map
    #[error("Config error: {0}")]
    Config(String),

    /// No validator registered under this name
    #[error("Validator not found: {0}")]
    NotFound(String),

    /// A validator factory rejected its options
    #[error("Failed to initialize validator '{name}': {reason}")]
    Initialization { name: String, reason: String },

    /// Chain definition file could not be read
    #[error("Failed to read chain definitions: {0}")]
    Io(#[from] std::io::Error),

    /// Chain definition file could not be parsed
    #[error("Failed to parse chain definitions: {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_keep_insertion_order() {
        let mut messages = Messages::new();
        messages.insert("zeta", "last key first");
        messages.insert("alpha", "second");
        messages.insert("zeta", "replaced");

        assert_eq!(messages.len(), 2);
        assert_eq!(messages.keys().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
        assert_eq!(messages.texts(), vec!["replaced", "second"]);
    }

    #[test]
    fn test_push_appends() {
        let mut messages = Messages::new();
        messages.push("k-0".to_string(), "first".to_string());
        messages.push("k-1".to_string(), "second".to_string());

        assert_eq!(messages.keys().collect::<Vec<_>>(), vec!["k-0", "k-1"]);
        assert_eq!(messages.get("k-1"), Some("second"));
    }

    #[test]
    fn test_messages_serialize_as_ordered_object() {
        let messages: Messages = vec![("b", "one"), ("a", "two")].into_iter().collect();
        let json = serde_json::to_string(&messages).unwrap();
        assert_eq!(json, r#"{"b":"one","a":"two"}"#);

        let back: Messages = serde_json::from_str(&json).unwrap();
        assert_eq!(back.keys().collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[test]
    fn test_result_helpers() {
        let result = ValidationResult::invalid("notDigits", "The input must contain only digits");
        assert!(!result.is_valid());
        assert_eq!(result.messages().get("notDigits"), Some("The input must contain only digits"));

        assert!(ValidationResult::Valid.is_valid());
        assert!(ValidationResult::Valid.into_messages().is_empty());
    }
}
