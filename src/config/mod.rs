//! Configuration module.
//!
//! This module loads TOML chain definition files and builds the declared
//! chains into a validator registry.

mod config;

pub use config::{ChainDefinition, Config, EntryDefinition};
