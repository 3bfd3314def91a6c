// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint and tick ordering.
//!
//! Siblings are ordered by [`SortKey`]: explicit `z_index` first, then the
//! [`AddedAt`] stamp taken when the child was last attached. Stamps come from
//! a single process-wide counter, so two keys are never equal and the order
//! is total.
//!
//! [`OrderedChildren`] keeps a child list behind a two-state cache. Mutations
//! that may break the order only flip it to [`Order::Dirty`]; the sort runs
//! when the list is next read for traversal, so any amount of z-index churn
//! within one frame costs a single sort.

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use crate::scene::NodeId;

/// Value of the insertion counter before the first stamp is handed out.
const FIRST_ADDED_AT: u64 = 900_000;

/// Process-wide insertion counter.
///
/// Initialized once, never reset, only ever incremented. At one attach per
/// nanosecond it would take centuries to wrap.
static ADD_COUNTER: AtomicU64 = AtomicU64::new(FIRST_ADDED_AT);

/// Insertion stamp assigned to a node each time it is attached to a parent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AddedAt(u64);

impl AddedAt {
    /// Stamp of a node that has never been attached.
    pub const UNSET: Self = Self(0);

    /// Takes the next stamp from the process-wide counter.
    ///
    /// Every call returns a value strictly greater than all previous calls.
    #[must_use]
    pub fn next() -> Self {
        Self(ADD_COUNTER.fetch_add(1, AtomicOrdering::Relaxed) + 1)
    }

    /// Returns the raw counter value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Sibling ordering key: `z_index` ascending, then `added_at` ascending.
///
/// Field order matters: the derived [`Ord`] compares `z_index` first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SortKey {
    /// Explicit, user-set stacking index.
    pub z_index: i32,
    /// Insertion stamp, the tie-break for equal `z_index` values.
    pub added_at: AddedAt,
}

/// State of a lazily sorted list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Order {
    /// The list is sorted by [`SortKey`].
    #[default]
    Clean,
    /// The list may be out of order and must be sorted before traversal.
    Dirty,
}

/// A child list sorted on read.
#[derive(Clone, Debug, Default)]
pub struct OrderedChildren {
    items: Vec<NodeId>,
    order: Order,
}

impl OrderedChildren {
    /// Creates an empty, clean list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            order: Order::Clean,
        }
    }

    /// Appends `id`, marking the list dirty if `id` sorts before the current
    /// last element.
    pub fn push(&mut self, id: NodeId, key: impl Fn(NodeId) -> SortKey) {
        if let Some(&last) = self.items.last()
            && key(id) < key(last)
        {
            self.order = Order::Dirty;
        }
        self.items.push(id);
    }

    /// Removes `id`, preserving the relative order of the others.
    ///
    /// Returns `false` if `id` was not in the list.
    pub fn remove(&mut self, id: NodeId) -> bool {
        match self.items.iter().position(|&item| item == id) {
            Some(pos) => {
                let _ = self.items.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Marks the list as possibly out of order.
    pub fn invalidate(&mut self) {
        self.order = Order::Dirty;
    }

    /// Returns the cache state.
    #[must_use]
    pub const fn order(&self) -> Order {
        self.order
    }

    /// Sorts the list if it is dirty and returns it.
    pub fn ensure_sorted(&mut self, key: impl Fn(NodeId) -> SortKey) -> &[NodeId] {
        if self.order == Order::Dirty {
            self.items.sort_by_key(|&id| key(id));
            self.order = Order::Clean;
        }
        &self.items
    }

    /// Returns the list in its current (possibly unsorted) order.
    #[must_use]
    pub fn as_slice(&self) -> &[NodeId] {
        &self.items
    }

    /// Returns whether `id` is in the list.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.items.contains(&id)
    }

    /// Returns the number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removes every child and resets the cache to clean.
    pub fn clear(&mut self) {
        self.items.clear();
        self.order = Order::Clean;
    }
}
