//! OR-composed validator chains
//!
//! A chain holds validators in priority order and accepts a value as soon as
//! one of them accepts it. When all of them reject it, the messages of the
//! members configured to report are aggregated into the chain's own failure
//! messages.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │       Chain<A: Aggregator>              │
//! ├─────────────────────────────────────────┤
//! │  EntryQueue   (priority desc, FIFO)     │
//! │  execute()    (stop at first success)   │
//! │  A::aggregate (on total failure)        │
//! └────────┬────────────────────────────────┘
//!          │
//!          ├──> PlainAggregator   (concatenate groups)
//!          └──> VerboseAggregator (pre / union / post messages)
//! ```
//!
//! # Example Usage
//!
//! ```rust
//! use or_chain::chain::{EntryOptions, Override, VerboseOrChain};
//! use or_chain::validators::{builtin, ValidationContext};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let mut chain = VerboseOrChain::new();
//! chain.attach(Arc::new(builtin::Digits::new()));
//! chain.attach_with(
//!     Arc::new(builtin::InArray::with_haystack(vec![json!("n/a")])),
//!     EntryOptions::default().with_leading(Override::Text(" nor ".into())),
//! );
//!
//! let result = chain.execute(&json!("abc"), &ValidationContext::new());
//! assert_eq!(result.messages().len(), 3);
//! ```

pub mod aggregate;
pub mod entry;
pub mod queue;
pub mod template;

pub use aggregate::{
    Aggregator, ChainConfig, MessageGroup, PlainAggregator, VerboseAggregator,
    DEFAULT_UNION_MESSAGE,
};
pub use entry::{EntryOptions, Override, ValidatorEntry, DEFAULT_PRIORITY};
pub use queue::EntryQueue;
pub use template::{MessageRenderer, TemplateRenderer, Translator};

use crate::validators::{
    ChainError, Messages, ValidationContext, ValidationResult, Validator, ValidatorRegistry,
    ValidatorType,
};
use parking_lot::RwLock;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Chain whose failure messages are the members' messages, concatenated
pub type OrChain = Chain<PlainAggregator>;

/// Chain whose failure messages carry pre, post and union messages
pub type VerboseOrChain = Chain<VerboseAggregator>;

/// Option keys consumed by the chain itself in `attach_by_name`/`prepend_by_name`
pub const OPTION_SHOW_MESSAGES: &str = "show_messages";
pub const OPTION_PRIORITY: &str = "priority";
pub const OPTION_LEADING_TEMPLATE: &str = "leading_message_template";
pub const OPTION_TRAILING_TEMPLATE: &str = "trailing_message_template";

const DEFAULT_CHAIN_NAME: &str = "or_chain";

/// Validator chain that passes when any member passes
pub struct Chain<A: Aggregator> {
    name: String,
    queue: EntryQueue,
    aggregator: A,
    plugins: Option<Arc<ValidatorRegistry>>,
    last_messages: RwLock<Messages>,
}

impl Chain<PlainAggregator> {
    /// Create an empty chain with plain message aggregation
    pub fn new() -> Self {
        Self::with_aggregator(PlainAggregator)
    }
}

impl Default for Chain<PlainAggregator> {
    fn default() -> Self {
        Self::new()
    }
}

impl Chain<VerboseAggregator> {
    /// Create an empty chain with verbose message aggregation
    pub fn new() -> Self {
        Self::with_aggregator(VerboseAggregator::default())
    }

    /// Create an empty verbose chain with the given templates
    pub fn with_config(config: ChainConfig) -> Self {
        Self::with_aggregator(VerboseAggregator::new(config))
    }

    /// Template inserted between two message groups by default
    pub fn union_message(&self) -> &str {
        &self.aggregator.config.union_message
    }

    /// Set the default union template; an empty template suppresses it
    pub fn set_union_message(&mut self, template: impl Into<String>) {
        self.aggregator.config.union_message = template.into();
    }

    pub fn pre_message(&self) -> Option<&str> {
        self.aggregator.config.pre_message.as_deref()
    }

    /// Set the template emitted before all groups; `None` omits it
    pub fn set_pre_message(&mut self, template: Option<String>) {
        self.aggregator.config.pre_message = template;
    }

    pub fn post_message(&self) -> Option<&str> {
        self.aggregator.config.post_message.as_deref()
    }

    /// Set the template emitted after all groups; `None` omits it
    pub fn set_post_message(&mut self, template: Option<String>) {
        self.aggregator.config.post_message = template;
    }

    pub fn chain_config(&self) -> &ChainConfig {
        self.aggregator.config()
    }

    pub fn renderer(&self) -> Arc<dyn TemplateRenderer> {
        Arc::clone(&self.aggregator.renderer)
    }

    /// Replace the renderer used for pre, post and union messages
    pub fn set_renderer(&mut self, renderer: Arc<dyn TemplateRenderer>) {
        self.aggregator.renderer = renderer;
    }
}

impl<A: Aggregator> Chain<A> {
    /// Create an empty chain using `aggregator` for failure messages
    pub fn with_aggregator(aggregator: A) -> Self {
        Self {
            name: DEFAULT_CHAIN_NAME.to_string(),
            queue: EntryQueue::new(),
            aggregator,
            plugins: None,
            last_messages: RwLock::new(Messages::new()),
        }
    }

    /// Builder-style name setter (used in logs and registry lookups)
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn aggregator(&self) -> &A {
        &self.aggregator
    }

    /// Attach a validator with default options
    pub fn attach(&mut self, validator: Arc<dyn Validator>) {
        self.attach_with(validator, EntryOptions::default());
    }

    /// Attach a validator with explicit options
    pub fn attach_with(&mut self, validator: Arc<dyn Validator>, options: EntryOptions) {
        debug!(
            chain = %self.name,
            validator = validator.name(),
            priority = options.priority,
            "Attaching validator"
        );
        self.queue.attach(validator, options);
    }

    /// Attach a validator that runs before every validator currently attached
    ///
    /// `options.priority` is ignored.
    pub fn attach_front(
        &mut self,
        validator: Arc<dyn Validator>,
        options: EntryOptions,
    ) -> Result<(), ChainError> {
        debug!(chain = %self.name, validator = validator.name(), "Attaching validator in front");
        self.queue.attach_front(validator, options)
    }

    /// Resolve a validator by name and attach it
    ///
    /// `show_messages`, `priority`, `leading_message_template` and
    /// `trailing_message_template` are taken out of `options`; everything else
    /// is passed to the validator factory. A lookup miss is returned unchanged.
    pub fn attach_by_name(&mut self, name: &str, options: &Value) -> Result<(), ChainError> {
        let (entry_options, validator_options) = split_options(options)?;
        let validator = self.plugin_registry().resolve(name, &validator_options)?;
        self.attach_with(validator, entry_options);
        Ok(())
    }

    /// Resolve a validator by name and attach it in front of every current entry
    pub fn prepend_by_name(&mut self, name: &str, options: &Value) -> Result<(), ChainError> {
        let (entry_options, validator_options) = split_options(options)?;
        let validator = self.plugin_registry().resolve(name, &validator_options)?;
        self.attach_front(validator, entry_options)
    }

    /// Attach every entry of `other`, keeping their priorities
    pub fn merge<B: Aggregator>(&mut self, other: &Chain<B>) {
        debug!(chain = %self.name, other = %other.name, entries = other.count(), "Merging chain");
        self.queue.merge(&other.queue);
    }

    /// Registry used by the by-name attach methods, created on first use
    pub fn plugin_registry(&mut self) -> Arc<ValidatorRegistry> {
        Arc::clone(
            self.plugins
                .get_or_insert_with(|| Arc::new(ValidatorRegistry::new())),
        )
    }

    pub fn set_plugin_registry(&mut self, plugins: Arc<ValidatorRegistry>) {
        self.plugins = Some(plugins);
    }

    pub fn count(&self) -> usize {
        self.queue.count()
    }

    /// Entries in execution order
    pub fn entries(&self) -> &[ValidatorEntry] {
        self.queue.entries()
    }

    /// Failure messages of the most recent `execute` call
    pub fn messages(&self) -> Messages {
        self.last_messages.read().clone()
    }

    /// Run the members in order until one accepts `value`
    pub fn execute(&self, value: &Value, ctx: &ValidationContext) -> ValidationResult {
        let mut groups = Vec::new();

        for (index, entry) in self.queue.entries().iter().enumerate() {
            match entry.validator.validate(value, ctx) {
                ValidationResult::Valid => {
                    debug!(
                        chain = %self.name,
                        validator = entry.validator.name(),
                        index,
                        "Validator accepted value"
                    );
                    *self.last_messages.write() = Messages::new();
                    return ValidationResult::Valid;
                }
                ValidationResult::Invalid(messages) => {
                    trace!(
                        chain = %self.name,
                        validator = entry.validator.name(),
                        index,
                        messages = messages.len(),
                        "Validator rejected value"
                    );
                    if entry.show_messages && !messages.is_empty() {
                        groups.push(MessageGroup {
                            entry_index: index,
                            messages,
                            leading: entry.leading.clone(),
                            trailing: entry.trailing.clone(),
                        });
                    }
                }
            }
        }

        let messages = self.aggregator.aggregate(&groups, value, self.count());
        debug!(
            chain = %self.name,
            entries = self.count(),
            groups = groups.len(),
            messages = messages.len(),
            "All validators rejected value"
        );
        *self.last_messages.write() = messages.clone();
        ValidationResult::Invalid(messages)
    }

    /// Shorthand for `execute(..).is_valid()`
    pub fn is_valid(&self, value: &Value, ctx: &ValidationContext) -> bool {
        self.execute(value, ctx).is_valid()
    }
}

impl<A: Aggregator> Validator for Chain<A> {
    fn validate(&self, value: &Value, ctx: &ValidationContext) -> ValidationResult {
        self.execute(value, ctx)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn validator_type(&self) -> ValidatorType {
        ValidatorType::Chain
    }
}

impl<A: Aggregator> Clone for Chain<A> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            queue: self.queue.clone(),
            aggregator: self.aggregator.clone(),
            plugins: self.plugins.clone(),
            last_messages: RwLock::new(self.last_messages.read().clone()),
        }
    }
}

impl<A: Aggregator> fmt::Debug for Chain<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("name", &self.name)
            .field("entries", &self.queue.entries())
            .field("aggregator", &self.aggregator)
            .field("plugins", &self.plugins.is_some())
            .finish()
    }
}

/// Split by-name options into entry options and the options forwarded to the factory
fn split_options(options: &Value) -> Result<(EntryOptions, Value), ChainError> {
    let mut remaining = match options {
        Value::Null => serde_json::Map::new(),
        Value::Object(map) => map.clone(),
        other => {
            return Err(ChainError::Config(format!(
                "validator options must be an object, got {}",
                other
            )))
        }
    };

    let mut entry = EntryOptions::default();

    if let Some(show) = remaining.remove(OPTION_SHOW_MESSAGES) {
        entry.show_messages = show.as_bool().ok_or_else(|| {
            ChainError::Config(format!("'{}' must be a boolean, got {}", OPTION_SHOW_MESSAGES, show))
        })?;
    }

    if let Some(priority) = remaining.remove(OPTION_PRIORITY) {
        entry.priority = priority.as_i64().ok_or_else(|| {
            ChainError::Config(format!("'{}' must be an integer, got {}", OPTION_PRIORITY, priority))
        })?;
    }

    entry.leading = override_option(&mut remaining, OPTION_LEADING_TEMPLATE)?;
    entry.trailing = override_option(&mut remaining, OPTION_TRAILING_TEMPLATE)?;

    Ok((entry, Value::Object(remaining)))
}

fn override_option(
    options: &mut serde_json::Map<String, Value>,
    key: &str,
) -> Result<Override, ChainError> {
    match options.remove(key) {
        None | Some(Value::Null) => Ok(Override::Defer),
        Some(Value::String(template)) => Ok(Override::from_template(Some(template.as_str()))),
        Some(other) => Err(ChainError::Config(format!(
            "'{}' must be a string or null, got {}",
            key, other
        ))),
    }
}
