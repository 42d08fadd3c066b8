//! Validator framework
//!
//! This module provides the validator abstraction the chains compose, a set of
//! built-in validators, and a name-based registry used to attach validators
//! from option maps and configuration files.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │       Validator Registry                │
//! ├─────────────────────────────────────────┤
//! │  • Resolve validators by name           │
//! │  • Build them from option maps          │
//! │  • Hold shared instances (e.g. chains)  │
//! └────────┬────────────────────────────────┘
//!          │
//!          ├──> Built-in Validators (digits, regex, in_array, ...)
//!          ├──> Callback Validators
//!          └──> Chains
//! ```
//!
//! # Example Usage
//!
//! ```rust
//! use or_chain::validators::*;
//! use serde_json::json;
//!
//! let registry = ValidatorRegistry::new();
//! let digits = registry.resolve("digits", &json!({})).unwrap();
//!
//! let result = digits.validate(&json!("12ab"), &ValidationContext::new());
//! assert!(!result.is_valid());
//! ```

pub mod builtin;
pub mod context;
pub mod registry;
pub mod result;
pub mod traits;

// Re-export commonly used types
pub use context::ValidationContext;
pub use registry::{ValidatorFactory, ValidatorRegistry};
pub use result::{ChainError, Messages, ValidationResult};
pub use traits::{Validator, ValidatorType};
