// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change feed for retained backends.
//!
//! Immediate-mode rendering recomputes everything it paints and never looks
//! at this. Retained backends mirror nodes into a host tree that persists
//! between frames, so they want to know exactly which nodes changed and in
//! which category. [`SceneTree::drain_changes`] empties every dirty channel
//! into a [`StyleChanges`] value.
//!
//! Like the channels themselves, the lists hold raw slot indices (`u32`).
//! Backends read current values through the `*_at()` accessors (e.g.
//! [`style_at`](SceneTree::style_at)) without paying for a generation check
//! on every access.

use super::store::SceneTree;
use crate::dirty;

/// Nodes that changed since the previous drain, by category.
///
/// Each list is in ascending slot order and holds no duplicates.
#[derive(Clone, Debug, Default)]
pub struct StyleChanges {
    /// Position, rotation, scale, anchor, offset or flip changed.
    pub geometry: Vec<u32>,
    /// Own opacity changed.
    pub opacity: Vec<u32>,
    /// Width or height changed.
    pub size: Vec<u32>,
    /// Visible flag changed.
    pub visibility: Vec<u32>,
    /// Clip flag changed.
    pub clip: Vec<u32>,
    /// Background, composite operation or own content changed.
    pub paint: Vec<u32>,
    /// `z_index` changed.
    pub order: Vec<u32>,
    /// An animation step started or ended.
    pub transition: Vec<u32>,
    /// Attached to or detached from a parent.
    pub topology: Vec<u32>,
    /// Live nodes created since the previous drain.
    pub added: Vec<u32>,
    /// Slots destroyed since the previous drain.
    ///
    /// A slot can appear here and in `added` when it was destroyed and then
    /// reused; consumers handle `removed` first.
    pub removed: Vec<u32>,
}

impl StyleChanges {
    /// Clears all lists for reuse.
    pub fn clear(&mut self) {
        self.geometry.clear();
        self.opacity.clear();
        self.size.clear();
        self.visibility.clear();
        self.clip.clear();
        self.paint.clear();
        self.order.clear();
        self.transition.clear();
        self.topology.clear();
        self.added.clear();
        self.removed.clear();
    }

    /// Returns `true` if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.geometry.is_empty()
            && self.opacity.is_empty()
            && self.size.is_empty()
            && self.visibility.is_empty()
            && self.clip.is_empty()
            && self.paint.is_empty()
            && self.order.is_empty()
            && self.transition.is_empty()
            && self.topology.is_empty()
            && self.added.is_empty()
            && self.removed.is_empty()
    }
}

impl<A> SceneTree<A> {
    /// Drains every dirty channel and the lifecycle lists.
    pub fn drain_changes(&mut self) -> StyleChanges {
        let mut changes = StyleChanges::default();
        self.drain_changes_into(&mut changes);
        changes
    }

    /// Like [`drain_changes`](Self::drain_changes), but reuses a
    /// caller-provided buffer to avoid allocation.
    pub fn drain_changes_into(&mut self, changes: &mut StyleChanges) {
        changes.clear();

        let mut drain = |channel| -> Vec<u32> {
            let mut out: Vec<u32> = self.dirty.drain(channel).deterministic().run().collect();
            out.sort_unstable();
            out
        };
        changes.geometry = drain(dirty::GEOMETRY);
        changes.opacity = drain(dirty::OPACITY);
        changes.size = drain(dirty::SIZE);
        changes.visibility = drain(dirty::VISIBILITY);
        changes.clip = drain(dirty::CLIP);
        changes.paint = drain(dirty::PAINT);
        changes.order = drain(dirty::ORDER);
        changes.transition = drain(dirty::TRANSITION);
        changes.topology = drain(dirty::TOPOLOGY);

        core::mem::swap(&mut self.pending_removed, &mut changes.removed);
        core::mem::swap(&mut self.pending_added, &mut changes.added);
        for &idx in &changes.removed {
            self.removed_pending[idx as usize] = false;
        }
        for &idx in &changes.added {
            self.added_pending[idx as usize] = false;
        }
        changes.added.sort_unstable();
        let alive = &self.alive;
        changes.added.retain(|&idx| alive[idx as usize]);
    }
}
