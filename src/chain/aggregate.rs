//! Failure message aggregation
//!
//! When every member of a chain fails, the message groups collected from the
//! reporting members are flattened into one [`Messages`] collection. Every
//! emitted message gets a key unique to the aggregation call, so two members
//! using the same message key never overwrite each other downstream.

use super::entry::Override;
use super::template::{MessageRenderer, TemplateRenderer};
use crate::validators::Messages;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Union message used when no override applies
pub const DEFAULT_UNION_MESSAGE: &str = " or ";

/// Messages reported by one failed entry
#[derive(Debug, Clone, PartialEq)]
pub struct MessageGroup {
    /// Position of the source entry in execution order
    pub entry_index: usize,
    pub messages: Messages,
    pub leading: Override,
    pub trailing: Override,
}

/// Turns the collected message groups into the chain's failure messages
pub trait Aggregator: Clone + fmt::Debug + Send + Sync {
    /// Aggregate `groups` (in execution order) for a failed `value`;
    /// `entry_count` is the number of entries in the chain
    fn aggregate(&self, groups: &[MessageGroup], value: &Value, entry_count: usize) -> Messages;
}

/// Per-call key source: one random token plus a running counter
struct KeyGenerator {
    token: String,
    next: usize,
}

impl KeyGenerator {
    fn new() -> Self {
        Self {
            token: Uuid::new_v4().simple().to_string(),
            next: 0,
        }
    }

    fn next_key(&mut self) -> String {
        let key = format!("{}-{}", self.token, self.next);
        self.next += 1;
        key
    }
}

/// Concatenates every group's messages in order
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainAggregator;

impl Aggregator for PlainAggregator {
    fn aggregate(&self, groups: &[MessageGroup], _value: &Value, _entry_count: usize) -> Messages {
        let mut keys = KeyGenerator::new();
        let mut out = Messages::new();
        for group in groups {
            for (_, text) in group.messages.iter() {
                out.push(keys.next_key(), text.to_string());
            }
        }
        out
    }
}

/// Templates the verbose aggregator inserts around and between groups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Inserted between two groups when neither side overrides it; empty suppresses
    #[serde(default = "default_union_message")]
    pub union_message: String,

    /// Emitted before all groups when set
    #[serde(default)]
    pub pre_message: Option<String>,

    /// Emitted after all groups when set
    #[serde(default)]
    pub post_message: Option<String>,
}

fn default_union_message() -> String {
    DEFAULT_UNION_MESSAGE.to_string()
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            union_message: default_union_message(),
            pre_message: None,
            post_message: None,
        }
    }
}

/// Plain aggregation plus pre, post and union messages
#[derive(Clone)]
pub struct VerboseAggregator {
    pub(crate) config: ChainConfig,
    pub(crate) renderer: Arc<dyn TemplateRenderer>,
}

impl Default for VerboseAggregator {
    fn default() -> Self {
        Self::new(ChainConfig::default())
    }
}

impl VerboseAggregator {
    pub fn new(config: ChainConfig) -> Self {
        Self {
            config,
            renderer: Arc::new(MessageRenderer::new()),
        }
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn TemplateRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Pick the union template for the gap between `current` and `next`
    ///
    /// Trailing override of `current` wins over leading override of `next`,
    /// which wins over the configured default. `None` means emit nothing.
    fn resolve_union<'a>(&'a self, current: &'a MessageGroup, next: &'a MessageGroup) -> Option<&'a str> {
        let source = if !current.trailing.is_defer() {
            &current.trailing
        } else {
            &next.leading
        };

        match source {
            Override::Text(text) => Some(text.as_str()),
            Override::Suppress => None,
            Override::Defer if self.config.union_message.is_empty() => None,
            Override::Defer => Some(self.config.union_message.as_str()),
        }
    }
}

impl Aggregator for VerboseAggregator {
    fn aggregate(&self, groups: &[MessageGroup], value: &Value, entry_count: usize) -> Messages {
        let variables = [("count", entry_count.to_string())];
        let render = |template: &str| self.renderer.render(template, value, &variables);

        let mut keys = KeyGenerator::new();
        let mut out = Messages::new();

        if let Some(pre) = &self.config.pre_message {
            out.push(keys.next_key(), render(pre));
        }

        for (i, group) in groups.iter().enumerate() {
            for (_, text) in group.messages.iter() {
                out.push(keys.next_key(), text.to_string());
            }

            if let Some(next) = groups.get(i + 1) {
                if let Some(template) = self.resolve_union(group, next) {
                    out.push(keys.next_key(), render(template));
                }
            }
        }

        if let Some(post) = &self.config.post_message {
            out.push(keys.next_key(), render(post));
        }

        out
    }
}

impl fmt::Debug for VerboseAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerboseAggregator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
