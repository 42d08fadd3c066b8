//! Chain definition files.
//!
//! Chains can be declared in TOML and built against a [`ValidatorRegistry`].
//! Every built chain is registered back into the registry under its own name,
//! so a chain may use any chain declared before it as a member.
//!
//! # Example TOML
//! ```toml
//! [[chains]]
//! name = "zip_or_po_box"
//! verbose = true
//! pre_message = "'%value%' is neither a zip code nor a PO box:"
//!
//! [[chains.validators]]
//! name = "regex"
//! options = { pattern = "^[0-9]{4}[A-Z]{2}$" }
//!
//! [[chains.validators]]
//! name = "regex"
//! leading_message = " nor "
//! options = { pattern = "^PO [0-9]+$" }
//! ```

use crate::chain::template::MIN_MESSAGE_LENGTH;
use crate::chain::{
    Aggregator, Chain, ChainConfig, EntryOptions, MessageRenderer, OrChain, Override,
    VerboseOrChain, DEFAULT_PRIORITY, DEFAULT_UNION_MESSAGE,
};
use crate::validators::{ChainError, Validator, ValidatorRegistry};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Main configuration structure
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub chains: Vec<ChainDefinition>,
}

/// One chain declaration
#[derive(Debug, Clone, Deserialize)]
pub struct ChainDefinition {
    /// Registry name of the chain
    pub name: String,

    /// Use verbose aggregation (pre, post and union messages)
    #[serde(default)]
    pub verbose: bool,

    /// `union_message`, `pre_message` and `post_message`
    #[serde(flatten)]
    pub messages: ChainConfig,

    /// Maximum rendered length of pre, post and union messages
    #[serde(default)]
    pub message_length: Option<usize>,

    /// Hide the value in pre, post and union messages
    #[serde(default)]
    pub value_obscured: bool,

    #[serde(default)]
    pub validators: Vec<EntryDefinition>,
}

/// One member of a declared chain
#[derive(Debug, Clone, Deserialize)]
pub struct EntryDefinition {
    /// Registry name of the validator
    pub name: String,

    #[serde(default = "default_show_messages")]
    pub show_messages: bool,

    /// Execution priority (default: 1); not allowed together with `front`
    #[serde(default)]
    pub priority: Option<i64>,

    /// Attach in front of every member declared before it
    #[serde(default)]
    pub front: bool,

    /// Union override before this member's messages; empty suppresses
    #[serde(default)]
    pub leading_message: Option<String>,

    /// Union override after this member's messages; empty suppresses
    #[serde(default)]
    pub trailing_message: Option<String>,

    /// Options passed to the validator factory
    #[serde(default)]
    pub options: serde_json::Value,
}

fn default_show_messages() -> bool {
    true
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ChainError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self, ChainError> {
        let config: Config = toml::from_str(contents)?;
        Ok(config)
    }

    /// Check names and settings before anything is built
    pub fn validate(&self) -> Result<(), ChainError> {
        let mut seen = HashSet::new();

        for chain in &self.chains {
            if chain.name.trim().is_empty() {
                return Err(ChainError::Config("chain name must not be empty".to_string()));
            }
            if !seen.insert(chain.name.as_str()) {
                return Err(ChainError::Config(format!(
                    "chain '{}' is declared more than once",
                    chain.name
                )));
            }
            chain.validate()?;
        }

        Ok(())
    }

    /// Build every chain in declaration order and register it by name
    ///
    /// Returns the number of chains registered. On error `registry` is left
    /// unchanged.
    pub fn register_chains(&self, registry: &mut ValidatorRegistry) -> Result<usize, ChainError> {
        self.validate()?;

        let mut staged = registry.clone();
        for definition in &self.chains {
            let chain = definition.build(&staged)?;
            staged.register_validator(&definition.name, chain);
        }
        *registry = staged;

        info!("✅ Registered {} chains", self.chains.len());
        Ok(self.chains.len())
    }
}

impl ChainDefinition {
    fn validate(&self) -> Result<(), ChainError> {
        if let Some(len) = self.message_length {
            if len < MIN_MESSAGE_LENGTH {
                return Err(ChainError::Config(format!(
                    "chain '{}': message_length must be at least {}, got {}",
                    self.name, MIN_MESSAGE_LENGTH, len
                )));
            }
        }

        for entry in &self.validators {
            if entry.name.trim().is_empty() {
                return Err(ChainError::Config(format!(
                    "chain '{}': validator name must not be empty",
                    self.name
                )));
            }
            if entry.front && entry.priority.is_some() {
                return Err(ChainError::Config(format!(
                    "chain '{}': validator '{}' sets both 'front' and 'priority'",
                    self.name, entry.name
                )));
            }
        }

        if !self.verbose
            && (self.messages.pre_message.is_some()
                || self.messages.post_message.is_some()
                || self.messages.union_message != DEFAULT_UNION_MESSAGE)
        {
            warn!(
                chain = %self.name,
                "⚠️  Message templates are only used by verbose chains"
            );
        }

        Ok(())
    }

    /// Build the chain, resolving members from `registry`
    pub fn build(&self, registry: &ValidatorRegistry) -> Result<Arc<dyn Validator>, ChainError> {
        debug!(chain = %self.name, verbose = self.verbose, "Building chain");

        if self.verbose {
            let mut chain = VerboseOrChain::with_config(self.messages.clone()).with_name(&self.name);

            let mut renderer = MessageRenderer::new();
            renderer.set_max_length(self.message_length)?;
            renderer.set_obscure_value(self.value_obscured);
            chain.set_renderer(Arc::new(renderer));

            self.attach_entries(&mut chain, registry)?;
            Ok(Arc::new(chain))
        } else {
            let mut chain = OrChain::new().with_name(&self.name);
            self.attach_entries(&mut chain, registry)?;
            Ok(Arc::new(chain))
        }
    }

    fn attach_entries<A: Aggregator>(
        &self,
        chain: &mut Chain<A>,
        registry: &ValidatorRegistry,
    ) -> Result<(), ChainError> {
        for entry in &self.validators {
            let validator = registry.resolve(&entry.name, &entry.options)?;
            let options = EntryOptions {
                show_messages: entry.show_messages,
                priority: entry.priority.unwrap_or(DEFAULT_PRIORITY),
                leading: Override::from_template(entry.leading_message.as_deref()),
                trailing: Override::from_template(entry.trailing_message.as_deref()),
            };

            if entry.front {
                chain.attach_front(validator, options)?;
            } else {
                chain.attach_with(validator, options);
            }
        }
        Ok(())
    }
}
