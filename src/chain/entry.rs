//! Chain entries and their message overrides

use crate::validators::Validator;
use std::fmt;
use std::sync::Arc;

/// Priority given to entries attached without an explicit one
pub const DEFAULT_PRIORITY: i64 = 1;

/// Per-entry replacement for the union message next to its message group
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Override {
    /// No override; fall through to the next source
    #[default]
    Defer,
    /// Emit nothing at this position
    Suppress,
    /// Emit this template
    Text(String),
}

impl Override {
    /// Build from an optional template: absent defers, empty suppresses
    pub fn from_template(template: Option<&str>) -> Self {
        match template {
            None => Override::Defer,
            Some("") => Override::Suppress,
            Some(text) => Override::Text(text.to_string()),
        }
    }

    /// Template form of the override, the inverse of [`Override::from_template`]
    pub fn as_template(&self) -> Option<&str> {
        match self {
            Override::Defer => None,
            Override::Suppress => Some(""),
            Override::Text(text) => Some(text),
        }
    }

    pub fn is_defer(&self) -> bool {
        matches!(self, Override::Defer)
    }
}

/// How an entry is attached to a chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryOptions {
    /// Whether the entry's failure messages are reported
    pub show_messages: bool,
    /// Execution priority; higher runs first
    pub priority: i64,
    /// Override for the union message before this entry's group
    pub leading: Override,
    /// Override for the union message after this entry's group
    pub trailing: Override,
}

impl Default for EntryOptions {
    fn default() -> Self {
        Self {
            show_messages: true,
            priority: DEFAULT_PRIORITY,
            leading: Override::Defer,
            trailing: Override::Defer,
        }
    }
}

impl EntryOptions {
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_show_messages(mut self, show_messages: bool) -> Self {
        self.show_messages = show_messages;
        self
    }

    pub fn with_leading(mut self, leading: Override) -> Self {
        self.leading = leading;
        self
    }

    pub fn with_trailing(mut self, trailing: Override) -> Self {
        self.trailing = trailing;
        self
    }
}

/// One attached validator plus its execution metadata
#[derive(Clone)]
pub struct ValidatorEntry {
    pub(crate) validator: Arc<dyn Validator>,
    pub(crate) show_messages: bool,
    pub(crate) priority: i64,
    pub(crate) sequence: u64,
    pub(crate) leading: Override,
    pub(crate) trailing: Override,
}

impl ValidatorEntry {
    pub fn validator(&self) -> &Arc<dyn Validator> {
        &self.validator
    }

    pub fn show_messages(&self) -> bool {
        self.show_messages
    }

    pub fn priority(&self) -> i64 {
        self.priority
    }

    /// Attach order within the owning queue; ties on priority run in this order
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn leading(&self) -> &Override {
        &self.leading
    }

    pub fn trailing(&self) -> &Override {
        &self.trailing
    }

    /// The options this entry was attached with
    pub fn options(&self) -> EntryOptions {
        EntryOptions {
            show_messages: self.show_messages,
            priority: self.priority,
            leading: self.leading.clone(),
            trailing: self.trailing.clone(),
        }
    }
}

impl fmt::Debug for ValidatorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorEntry")
            .field("validator", &self.validator.name())
            .field("show_messages", &self.show_messages)
            .field("priority", &self.priority)
            .field("sequence", &self.sequence)
            .field("leading", &self.leading)
            .field("trailing", &self.trailing)
            .finish()
    }
}
