//! Core validator traits and interfaces
//!
//! This module defines the fundamental abstractions for the validator framework.

use serde::{Deserialize, Serialize};

/// The core validator trait that all validators must implement.
///
/// Validation is synchronous: chains run their members one at a time and stop
/// at the first success, so a member must finish before the next one starts.
pub trait Validator: Send + Sync {
    /// Validate a value
    ///
    /// # Arguments
    /// * `value` - The value under validation
    /// * `ctx` - The validation context (sibling field values)
    ///
    /// # Returns
    /// * `ValidationResult::Valid` - The value passed
    /// * `ValidationResult::Invalid(messages)` - The value failed, with keyed messages
    fn validate(
        &self,
        value: &serde_json::Value,
        ctx: &super::ValidationContext,
    ) -> super::ValidationResult;

    /// Get validator name (for logging and debugging)
    fn name(&self) -> &str;

    /// Get validator type (builtin, callback, chain)
    fn validator_type(&self) -> ValidatorType;

    /// Initialize the validator with options
    ///
    /// Called once by the registry factory before the validator is shared
    fn initialize(&mut self, options: &serde_json::Value) -> Result<(), String> {
        let _ = options; // Default implementation ignores options
        Ok(())
    }
}

/// Kind of validator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidatorType {
    Builtin,
    Callback,
    Chain,
}

impl std::fmt::Display for ValidatorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidatorType::Builtin => write!(f, "builtin"),
            ValidatorType::Callback => write!(f, "callback"),
            ValidatorType::Chain => write!(f, "chain"),
        }
    }
}
