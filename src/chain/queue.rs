//! Priority-ordered entry queue
//!
//! Entries are kept sorted by `(priority descending, sequence ascending)`.
//! The sequence number comes from a per-queue counter that only grows, so
//! entries sharing a priority always run in the order they were attached.

use super::entry::{EntryOptions, ValidatorEntry, DEFAULT_PRIORITY};
use crate::validators::{ChainError, Validator};
use std::cmp::Reverse;
use std::sync::Arc;
use tracing::trace;

/// Ordered collection of attached validators
#[derive(Debug, Clone, Default)]
pub struct EntryQueue {
    entries: Vec<ValidatorEntry>,
    next_sequence: u64,
}

impl EntryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a validator at the priority given in `options`
    pub fn attach(&mut self, validator: Arc<dyn Validator>, options: EntryOptions) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        let entry = ValidatorEntry {
            validator,
            show_messages: options.show_messages,
            priority: options.priority,
            sequence,
            leading: options.leading,
            trailing: options.trailing,
        };

        let key = order_key(&entry);
        let position = self.entries.partition_point(|e| order_key(e) < key);
        trace!(
            validator = entry.validator.name(),
            priority = entry.priority,
            sequence,
            position,
            "Attached entry"
        );
        self.entries.insert(position, entry);
    }

    /// Attach a validator so it runs before every entry currently queued
    ///
    /// The entry gets one more than the highest priority present, or
    /// [`DEFAULT_PRIORITY`] when the queue is empty. `options.priority` is ignored.
    /// Fails when the highest priority is already `i64::MAX`.
    pub fn attach_front(
        &mut self,
        validator: Arc<dyn Validator>,
        options: EntryOptions,
    ) -> Result<(), ChainError> {
        let priority = match self.highest_priority() {
            None => DEFAULT_PRIORITY,
            Some(highest) => highest.checked_add(1).ok_or_else(|| {
                ChainError::Config(format!(
                    "cannot attach '{}' in front: highest priority is already {}",
                    validator.name(),
                    highest
                ))
            })?,
        };
        self.attach(validator, EntryOptions { priority, ..options });
        Ok(())
    }

    /// Re-attach every entry of `other`, keeping priorities and overrides
    ///
    /// Entries are appended in `other`'s execution order with fresh sequence
    /// numbers, so ties within `other` keep their relative order.
    pub fn merge(&mut self, other: &EntryQueue) {
        for entry in other.entries() {
            self.attach(Arc::clone(&entry.validator), entry.options());
        }
    }

    /// Entries in execution order
    pub fn entries(&self) -> &[ValidatorEntry] {
        &self.entries
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Priority of the entry that runs first
    pub fn highest_priority(&self) -> Option<i64> {
        self.entries.first().map(|e| e.priority)
    }
}

fn order_key(entry: &ValidatorEntry) -> (Reverse<i64>, u64) {
    (Reverse(entry.priority), entry.sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::builtin::Callback;

    fn named(name: &str) -> Arc<dyn Validator> {
        Arc::new(Callback::new(name, |_, _| false))
    }

    fn names(queue: &EntryQueue) -> Vec<&str> {
        queue.entries().iter().map(|e| e.validator().name()).collect()
    }

    #[test]
    fn test_priority_then_fifo_order() {
        let mut queue = EntryQueue::new();
        queue.attach(named("low"), EntryOptions::default().with_priority(-5));
        queue.attach(named("first_default"), EntryOptions::default());
        queue.attach(named("high"), EntryOptions::default().with_priority(10));
        queue.attach(named("second_default"), EntryOptions::default());
        queue.attach(named("third_default"), EntryOptions::default());

        assert_eq!(
            names(&queue),
            vec!["high", "first_default", "second_default", "third_default", "low"]
        );
        assert_eq!(queue.count(), 5);
    }

    #[test]
    fn test_sequence_numbers_are_never_reused() {
        let mut queue = EntryQueue::new();
        for i in 0..4 {
            queue.attach(named(&format!("v{}", i)), EntryOptions::default().with_priority(i % 2));
        }
        let mut sequences: Vec<u64> = queue.entries().iter().map(|e| e.sequence()).collect();
        sequences.sort_unstable();
        sequences.dedup();
        assert_eq!(sequences.len(), 4);
    }

    #[test]
    fn test_attach_front() {
        let mut queue = EntryQueue::new();
        queue.attach_front(named("only"), EntryOptions::default()).unwrap();
        assert_eq!(queue.entries()[0].priority(), DEFAULT_PRIORITY);

        queue.attach(named("a"), EntryOptions::default().with_priority(100));
        queue.attach(named("b"), EntryOptions::default().with_priority(100));
        queue
            .attach_front(named("front"), EntryOptions::default().with_priority(-1000))
            .unwrap();

        assert_eq!(names(&queue), vec!["front", "a", "b", "only"]);
        assert_eq!(queue.entries()[0].priority(), 101);
    }

    #[test]
    fn test_attach_front_at_max_priority_fails() {
        let mut queue = EntryQueue::new();
        queue.attach(named("top"), EntryOptions::default().with_priority(i64::MAX));

        let err = queue.attach_front(named("front"), EntryOptions::default());
        assert!(matches!(err, Err(ChainError::Config(_))));
        assert_eq!(queue.count(), 1);
    }

    #[test]
    fn test_merge_into_empty_preserves_order_and_priorities() {
        let mut other = EntryQueue::new();
        other.attach(named("a"), EntryOptions::default().with_priority(3));
        other.attach(named("b"), EntryOptions::default());
        other.attach(named("c"), EntryOptions::default().with_priority(3));
        other.attach(named("d"), EntryOptions::default());

        let mut queue = EntryQueue::new();
        queue.merge(&other);

        let expected: Vec<(&str, i64)> = other
            .entries()
            .iter()
            .map(|e| (e.validator().name(), e.priority()))
            .collect();
        let merged: Vec<(&str, i64)> = queue
            .entries()
            .iter()
            .map(|e| (e.validator().name(), e.priority()))
            .collect();
        assert_eq!(merged, expected);
        assert_eq!(merged, vec![("a", 3), ("c", 3), ("b", 1), ("d", 1)]);
    }

    #[test]
    fn test_merge_interleaves_by_priority() {
        let mut queue = EntryQueue::new();
        queue.attach(named("self_high"), EntryOptions::default().with_priority(5));
        queue.attach(named("self_default"), EntryOptions::default());

        let mut other = EntryQueue::new();
        other.attach(named("other_default"), EntryOptions::default());
        other.attach(named("other_mid"), EntryOptions::default().with_priority(3));

        queue.merge(&other);

        assert_eq!(
            names(&queue),
            vec!["self_high", "other_mid", "self_default", "other_default"]
        );
        // merge copies entries; the source queue is untouched
        assert_eq!(other.count(), 2);
    }
}
