//! # or-chain - OR-composed validator chains
//!
//! A chain runs its validators in priority order and accepts a value as soon
//! as any one of them accepts it. When every validator rejects the value, the
//! chain reports the collected failure messages, optionally joined by
//! configurable "or" messages.
//!
//! ## Features
//! - Priority ordering with first-attached-first-run tie breaking
//! - Short-circuit on the first accepting validator
//! - Plain and verbose failure message aggregation
//! - Name-based validator lookup with option maps
//! - TOML chain definitions

pub mod chain;
pub mod config;
pub mod validators;

pub use chain::{
    Chain, ChainConfig, EntryOptions, MessageRenderer, OrChain, Override, TemplateRenderer,
    VerboseOrChain,
};
pub use config::Config;
pub use validators::{
    ChainError, Messages, ValidationContext, ValidationResult, Validator, ValidatorRegistry,
};
