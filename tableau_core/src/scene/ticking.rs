// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick propagation index and the tick traversal.
//!
//! Every node keeps a list of the direct children whose subtree contains at
//! least one view with per-frame logic. A node registers with its parent when
//! it starts needing ticks (its own view ticks, or its first ticking child
//! arrives) and deregisters when it stops. Registration climbs the ancestor
//! chain until it reaches a node that already ticks for another reason, so a
//! frame's tick pass only descends into subtrees that have work to do.

use super::id::{INVALID, NodeId};
use super::store::SceneTree;
use crate::backend::TickContext;
use crate::time::Duration;

impl<A> SceneTree<A> {
    /// Returns the direct children of `id` that are registered for ticks.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn ticking_subviews(&self, id: NodeId) -> &[NodeId] {
        self.validate(id);
        &self.ticking[id.idx as usize]
    }

    /// Runs `id`'s own tick, then ticks its registered children.
    ///
    /// Subtrees with no ticking views are never visited. The child list is
    /// snapshotted first; a child detached, reparented or destroyed by an
    /// earlier tick in the same pass is skipped, and a node destroyed during
    /// its own tick is not revived.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn wrap_tick(&mut self, id: NodeId, dt: Duration, app: &mut A) {
        self.validate(id);
        let idx = id.idx as usize;

        if self.has_tick[idx]
            && let Some(mut view) = self.views[idx].take()
        {
            view.tick(&mut TickContext {
                tree: &mut *self,
                node: id,
                dt,
                app: &mut *app,
            });
            // The tick may have destroyed the node or attached a new view.
            if self.is_alive(id) && self.views[idx].is_none() {
                self.views[idx] = Some(view);
            }
        }

        if !self.is_alive(id) || self.ticking[idx].is_empty() {
            return;
        }

        let snapshot = self.ticking[idx].clone();
        for child in snapshot {
            if !self.is_alive(id) {
                return;
            }
            if self.is_alive(child) && self.ticking[idx].contains(&child) {
                self.wrap_tick(child, dt, app);
            }
        }
    }

    /// Registers `child` in `parent`'s tick list, climbing the ancestor chain
    /// while each newly registered node had no other reason to tick.
    pub(crate) fn add_ticking_view(&mut self, mut parent: u32, mut child: NodeId) {
        while parent != INVALID {
            let list = &mut self.ticking[parent as usize];
            if list.contains(&child) {
                return;
            }
            list.push(child);
            if self.has_tick[parent as usize] || list.len() != 1 {
                return;
            }
            // First ticking child of a node that does not tick itself.
            child = self.node_id(parent);
            parent = self.parent[parent as usize];
        }
    }

    /// Removes `child` from `parent`'s tick list, climbing the ancestor chain
    /// while each node loses its last reason to tick.
    pub(crate) fn remove_ticking_view(&mut self, mut parent: u32, mut child: NodeId) {
        while parent != INVALID {
            let list = &mut self.ticking[parent as usize];
            let Some(pos) = list.iter().position(|&c| c == child) else {
                return;
            };
            let _ = list.remove(pos);
            if self.has_tick[parent as usize] || !list.is_empty() {
                return;
            }
            child = self.node_id(parent);
            parent = self.parent[parent as usize];
        }
    }
}
