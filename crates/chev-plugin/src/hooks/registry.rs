//! Callback traits and the priority-ordered list that stores them.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use super::definitions::{HookArgs, Priority};

/// A callback that transforms a hook's argument list.
///
/// Implemented for every `Fn(HookArgs) -> HookArgs` closure; plugin types
/// can implement it directly to keep state.
pub trait Filter: Send + Sync {
    /// Returns the full replacement argument list.
    fn filter(&self, args: HookArgs) -> HookArgs;
}

impl<F> Filter for F
where
    F: Fn(HookArgs) -> HookArgs + Send + Sync,
{
    fn filter(&self, args: HookArgs) -> HookArgs {
        self(args)
    }
}

/// A callback that observes a hook's argument list for side effects.
///
/// Implemented for every `Fn(&[Value])` closure.
pub trait Action: Send + Sync {
    /// Runs the action. It cannot change the arguments.
    fn run(&self, args: &[Value]);
}

impl<F> Action for F
where
    F: Fn(&[Value]) + Send + Sync,
{
    fn run(&self, args: &[Value]) {
        self(args)
    }
}

/// Entry in a priority list.
struct Entry<C: ?Sized> {
    /// Execution rank.
    priority: Priority,
    /// Attachment order within the list, used to break priority ties.
    seq: u64,
    /// The callback.
    callback: Arc<C>,
}

impl<C: ?Sized> Clone for Entry<C> {
    fn clone(&self) -> Self {
        Self {
            priority: self.priority,
            seq: self.seq,
            callback: Arc::clone(&self.callback),
        }
    }
}

/// Callbacks kept sorted by `(priority, attachment sequence)`.
pub struct PriorityList<C: ?Sized> {
    entries: Vec<Entry<C>>,
    next_seq: u64,
}

/// Action callbacks of one hook.
pub type ActionList = PriorityList<dyn Action>;

/// Filter callbacks of one hook.
pub type FilterList = PriorityList<dyn Filter>;

impl<C: ?Sized> PriorityList<C> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
        }
    }

    /// Inserts a callback after every callback of lower or equal priority.
    pub fn insert(&mut self, priority: Priority, callback: Arc<C>) {
        let seq = self.next_seq;
        self.next_seq += 1;

        self.entries.push(Entry {
            priority,
            seq,
            callback,
        });

        // Sort by (priority, seq) (lower first)
        self.entries.sort_by_key(|e| (e.priority, e.seq));
    }

    /// Iterates callbacks in execution order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<C>> {
        self.entries.iter().map(|e| &e.callback)
    }

    /// Returns the number of callbacks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of callbacks per priority.
    pub fn counts_by_priority(&self) -> BTreeMap<u8, usize> {
        let mut counts = BTreeMap::new();
        for e in &self.entries {
            *counts.entry(e.priority.get()).or_insert(0) += 1;
        }
        counts
    }
}

impl<C: ?Sized> Default for PriorityList<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ?Sized> Clone for PriorityList<C> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            next_seq: self.next_seq,
        }
    }
}

impl<C: ?Sized> std::fmt::Debug for PriorityList<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriorityList")
            .field("counts", &self.counts_by_priority())
            .finish()
    }
}
