// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays node storage with allocation, topology, and style
//! management.

use kurbo::Affine;
use understory_dirty::{CycleHandling, DirtyTracker};

use super::id::{INVALID, NodeId};
use crate::anim::{AnimationQueue, Transition};
use crate::backend::View;
use crate::dirty;
use crate::order::{AddedAt, OrderedChildren, SortKey};
use crate::style::{Style, StyleProp, StyleUpdate};
use crate::transform::RotationCache;

/// Builds the sort key of `id` from the style and stamp columns.
///
/// Takes the columns rather than the tree so callers can hold a mutable
/// borrow of a child list at the same time.
pub(crate) fn sort_key(style: &[Style], added_at: &[AddedAt], id: NodeId) -> SortKey {
    SortKey {
        z_index: style[id.idx as usize].z_index,
        added_at: added_at[id.idx as usize],
    }
}

/// Struct-of-arrays storage for all nodes.
///
/// Nodes are addressed by [`NodeId`] handles. Internally, each node occupies
/// a slot in parallel arrays. Destroyed nodes are recycled via a free list,
/// and generation counters prevent stale handle access.
///
/// `A` is the application state threaded through ticks and animation
/// callbacks.
pub struct SceneTree<A = ()> {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) subviews: Vec<OrderedChildren>,
    pub(crate) visible_subviews: Vec<OrderedChildren>,
    /// Direct children whose subtree needs ticking, in registration order.
    pub(crate) ticking: Vec<Vec<NodeId>>,

    // -- Local properties (set by callers) --
    pub(crate) style: Vec<Style>,
    pub(crate) added_at: Vec<AddedAt>,

    // -- Derived properties (written by the render traversal) --
    pub(crate) global_transform: Vec<Affine>,
    pub(crate) global_opacity: Vec<f64>,
    pub(crate) rotation: Vec<RotationCache>,

    // -- Host hooks --
    pub(crate) views: Vec<Option<Box<dyn View<A>>>>,
    pub(crate) has_tick: Vec<bool>,
    pub(crate) has_render: Vec<bool>,
    pub(crate) needs_repaint: Vec<bool>,

    // -- Animation --
    pub(crate) animation: Vec<AnimationQueue<A>>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) alive: Vec<bool>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,

    // -- Lifecycle tracking --
    // Each slot is listed at most once per list until the next drain, so
    // both lists stay within the slot count however often nodes churn.
    pub(crate) pending_added: Vec<u32>,
    pub(crate) pending_removed: Vec<u32>,
    pub(crate) added_pending: Vec<bool>,
    pub(crate) removed_pending: Vec<bool>,
}

impl<A> Default for SceneTree<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> core::fmt::Debug for SceneTree<A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SceneTree")
            .field("slots", &self.len)
            .field("free", &self.free_list.len())
            .field("pending_added", &self.pending_added.len())
            .field("pending_removed", &self.pending_removed.len())
            .finish_non_exhaustive()
    }
}

impl<A> SceneTree<A> {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: Vec::new(),
            subviews: Vec::new(),
            visible_subviews: Vec::new(),
            ticking: Vec::new(),
            style: Vec::new(),
            added_at: Vec::new(),
            global_transform: Vec::new(),
            global_opacity: Vec::new(),
            rotation: Vec::new(),
            views: Vec::new(),
            has_tick: Vec::new(),
            has_render: Vec::new(),
            needs_repaint: Vec::new(),
            animation: Vec::new(),
            generation: Vec::new(),
            alive: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
            added_pending: Vec::new(),
            removed_pending: Vec::new(),
        }
    }

    // -- Allocation API --

    /// Creates a new detached container node and returns its handle.
    ///
    /// The node starts with [`Style::default`], no view, and no parent.
    pub fn create_node(&mut self) -> NodeId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot. Its generation was bumped on destroy.
            let i = idx as usize;
            self.parent[i] = INVALID;
            self.subviews[i].clear();
            self.visible_subviews[i].clear();
            self.ticking[i].clear();
            self.style[i] = Style::default();
            self.added_at[i] = AddedAt::UNSET;
            self.global_transform[i] = Affine::IDENTITY;
            self.global_opacity[i] = 1.0;
            self.rotation[i] = RotationCache::default();
            self.views[i] = None;
            self.has_tick[i] = false;
            self.has_render[i] = false;
            self.needs_repaint[i] = true;
            self.animation[i] = AnimationQueue::default();
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.subviews.push(OrderedChildren::new());
            self.visible_subviews.push(OrderedChildren::new());
            self.ticking.push(Vec::new());
            self.style.push(Style::default());
            self.added_at.push(AddedAt::UNSET);
            self.global_transform.push(Affine::IDENTITY);
            self.global_opacity.push(1.0);
            self.rotation.push(RotationCache::default());
            self.views.push(None);
            self.has_tick.push(false);
            self.has_render.push(false);
            self.needs_repaint.push(true);
            self.animation.push(AnimationQueue::default());
            self.generation.push(0);
            self.alive.push(false);
            self.added_pending.push(false);
            self.removed_pending.push(false);
            idx
        };

        let i = idx as usize;
        self.alive[i] = true;
        if !self.added_pending[i] {
            self.added_pending[i] = true;
            self.pending_added.push(idx);
        }

        NodeId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Creates a node and attaches `view` to it.
    pub fn create_node_with_view(&mut self, view: impl View<A> + 'static) -> NodeId {
        let id = self.create_node();
        let _ = self.attach_view(id, Box::new(view));
        id
    }

    /// Attaches `view` to `id`, returning the previously attached view.
    ///
    /// Tick and render participation are re-read from the new view; the tick
    /// index is updated if participation changed.
    pub fn attach_view(&mut self, id: NodeId, view: Box<dyn View<A>>) -> Option<Box<dyn View<A>>> {
        self.validate(id);
        let idx = id.idx as usize;
        let ticks = view.has_tick();
        self.has_render[idx] = view.has_render();
        let previous = self.views[idx].replace(view);
        self.set_ticks(id, ticks);
        self.needs_repaint[idx] = true;
        self.dirty.mark(id.idx, dirty::PAINT);
        previous
    }

    /// Destroys a node, freeing its slot for reuse.
    ///
    /// Clears the node's animation queue first (its in-flight callback runs
    /// and may still touch the tree), then detaches every child and the node
    /// itself. Children survive as detached roots.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn destroy_node(&mut self, id: NodeId) {
        self.validate(id);
        let idx = id.idx;

        if let Some(callback) = self.animation[idx as usize].reset() {
            self.dirty.mark(idx, dirty::TRANSITION);
            callback(self, id);
            if !self.is_alive(id) {
                return;
            }
        }

        let children = self.subviews[idx as usize].as_slice().to_vec();
        for child in children {
            let _ = self.remove_subview(id, child);
        }
        if let Some(parent) = self.superview(id) {
            let _ = self.remove_subview(parent, id);
        }

        self.views[idx as usize] = None;
        self.animation[idx as usize] = AnimationQueue::default();

        self.dirty.remove_key(idx);

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;

        self.alive[idx as usize] = false;
        self.free_list.push(idx);
        // A slot listed as added is filtered out at drain time once dead.
        if !self.removed_pending[idx as usize] {
            self.removed_pending[idx as usize] = true;
            self.pending_removed.push(idx);
        }
    }

    /// Returns whether the given handle refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        id.idx < self.len && self.generation[id.idx as usize] == id.generation
    }

    // -- Topology API --

    /// Adds `child` as the last child of `parent`.
    ///
    /// A child attached elsewhere is removed from its old parent first. The
    /// child gets a fresh insertion stamp, so among equal `z_index` siblings
    /// it paints last.
    ///
    /// Returns `false` and changes nothing if `child` is `parent`, is already
    /// a direct child of `parent`, or is an ancestor of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale.
    pub fn add_subview(&mut self, parent: NodeId, child: NodeId) -> bool {
        self.validate(parent);
        self.validate(child);
        let p = parent.idx;
        let c = child.idx;

        if p == c || self.parent[c as usize] == p {
            tracing::trace!(?parent, ?child, "add_subview: already attached");
            return false;
        }
        if self.is_ancestor(c, p) {
            tracing::debug!(?parent, ?child, "add_subview: refusing to create a cycle");
            return false;
        }

        if let Some(old_parent) = self.superview(child) {
            let _ = self.remove_subview(old_parent, child);
        }

        self.parent[c as usize] = p;
        self.added_at[c as usize] = AddedAt::next();
        {
            let (style, added_at) = (&self.style, &self.added_at);
            self.subviews[p as usize].push(child, |id| sort_key(style, added_at, id));
        }

        if self.needs_tick(c) {
            self.add_ticking_view(p, child);
        }

        if self.style[c as usize].visible {
            self.add_visible_subview(p, child);
        }

        self.dirty.mark(c, dirty::TOPOLOGY);
        true
    }

    /// Removes `child` from `parent`.
    ///
    /// Returns `false` if `child` is not a direct child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale.
    pub fn remove_subview(&mut self, parent: NodeId, child: NodeId) -> bool {
        self.validate(parent);
        self.validate(child);
        let p = parent.idx;
        let c = child.idx;

        if self.parent[c as usize] != p {
            return false;
        }

        let _ = self.visible_subviews[p as usize].remove(child);
        if self.needs_tick(c) {
            self.remove_ticking_view(p, child);
        }
        let _ = self.subviews[p as usize].remove(child);
        self.parent[c as usize] = INVALID;

        self.dirty.mark(c, dirty::TOPOLOGY);
        true
    }

    /// Returns `id`'s children in paint order.
    ///
    /// Sorts lazily: the list is only re-sorted if an insertion or `z_index`
    /// change may have broken the order since the last call.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn subviews(&mut self, id: NodeId) -> &[NodeId] {
        self.validate(id);
        let (style, added_at) = (&self.style, &self.added_at);
        self.subviews[id.idx as usize].ensure_sorted(|n| sort_key(style, added_at, n))
    }

    /// Returns `id`'s visible children in paint order.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn visible_subviews(&mut self, id: NodeId) -> &[NodeId] {
        self.validate(id);
        let (style, added_at) = (&self.style, &self.added_at);
        self.visible_subviews[id.idx as usize].ensure_sorted(|n| sort_key(style, added_at, n))
    }

    /// Returns the parent of `id`, if attached.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn superview(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        (p != INVALID).then(|| self.node_id(p))
    }

    /// Returns every live node without a parent, in slot order.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.len)
            .filter(|&idx| self.alive[idx as usize] && self.parent[idx as usize] == INVALID)
            .map(|idx| self.node_id(idx))
    }

    /// Returns the number of live nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    // -- Style API --

    /// Applies every property in `update`, in order.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn update_style(&mut self, id: NodeId, update: &StyleUpdate) {
        self.validate(id);
        for prop in update.iter() {
            self.apply_prop(id.idx, prop);
        }
    }

    /// Applies one property. Returns `true` if the stored value changed.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_style_prop(&mut self, id: NodeId, prop: StyleProp) -> bool {
        self.validate(id);
        self.apply_prop(id.idx, prop)
    }

    /// Shows or hides `id` and its subtree.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        let _ = self.set_style_prop(id, StyleProp::Visible(visible));
    }

    /// Sets `id`'s stacking index among its siblings.
    pub fn set_z_index(&mut self, id: NodeId, z_index: i32) {
        let _ = self.set_style_prop(id, StyleProp::ZIndex(z_index));
    }

    /// Returns the style of `id`.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn style(&self, id: NodeId) -> &Style {
        self.validate(id);
        &self.style[id.idx as usize]
    }

    /// Returns the sort key of `id` among its siblings.
    #[must_use]
    pub fn sort_key(&self, id: NodeId) -> SortKey {
        self.validate(id);
        sort_key(&self.style, &self.added_at, id)
    }

    // -- Participation API --

    /// Sets whether `id` has its own per-frame logic.
    ///
    /// Registers or deregisters `id` up the ancestor chain when its overall
    /// tick participation flips.
    pub fn set_ticks(&mut self, id: NodeId, ticks: bool) {
        self.validate(id);
        let idx = id.idx;
        let before = self.needs_tick(idx);
        self.has_tick[idx as usize] = ticks;
        let after = self.needs_tick(idx);
        let p = self.parent[idx as usize];
        if p == INVALID || before == after {
            return;
        }
        if after {
            self.add_ticking_view(p, id);
        } else {
            self.remove_ticking_view(p, id);
        }
    }

    /// Returns `true` if `id` ticks itself or has ticking descendants.
    #[must_use]
    pub fn ticks(&self, id: NodeId) -> bool {
        self.validate(id);
        self.needs_tick(id.idx)
    }

    /// Returns `true` if `id` paints its own content.
    #[must_use]
    pub fn renders(&self, id: NodeId) -> bool {
        self.validate(id);
        self.has_render[id.idx as usize]
    }

    /// Requests that `id`'s own content be repainted.
    ///
    /// The canvas strategy repaints everything every frame and ignores this;
    /// retained strategies repaint a node's canvas only on request or resize.
    pub fn set_needs_repaint(&mut self, id: NodeId) {
        self.validate(id);
        self.needs_repaint[id.idx as usize] = true;
        self.dirty.mark(id.idx, dirty::PAINT);
    }

    /// Returns and clears `id`'s repaint request.
    pub fn take_needs_repaint(&mut self, id: NodeId) -> bool {
        self.validate(id);
        core::mem::take(&mut self.needs_repaint[id.idx as usize])
    }

    /// Returns the view attached to `id`.
    #[must_use]
    pub fn view(&self, id: NodeId) -> Option<&dyn View<A>> {
        self.validate(id);
        self.views[id.idx as usize].as_deref()
    }

    /// Returns the view attached to `id`, mutably.
    pub fn view_mut(&mut self, id: NodeId) -> Option<&mut (dyn View<A> + 'static)> {
        self.validate(id);
        self.views[id.idx as usize].as_deref_mut()
    }

    /// Returns `id`'s animation queue.
    #[must_use]
    pub fn animation(&self, id: NodeId) -> &AnimationQueue<A> {
        self.validate(id);
        &self.animation[id.idx as usize]
    }

    // -- Derived property getters --

    /// Returns the global transform computed by the last render pass.
    #[must_use]
    pub fn global_transform(&self, id: NodeId) -> Affine {
        self.validate(id);
        self.global_transform[id.idx as usize]
    }

    /// Returns the global opacity computed by the last render pass.
    #[must_use]
    pub fn global_opacity(&self, id: NodeId) -> f64 {
        self.validate(id);
        self.global_opacity[id.idx as usize]
    }

    // -- Index-based accessors (for backends working with raw change lists) --

    /// Returns the handle for slot `idx`, or `None` if the slot is free.
    #[must_use]
    pub fn node_at(&self, idx: u32) -> Option<NodeId> {
        (idx < self.len && self.alive[idx as usize]).then(|| self.node_id(idx))
    }

    /// Returns the style stored in slot `idx`.
    #[must_use]
    pub fn style_at(&self, idx: u32) -> &Style {
        &self.style[idx as usize]
    }

    /// Returns the parent slot of slot `idx`.
    #[must_use]
    pub fn superview_at(&self, idx: u32) -> Option<u32> {
        let p = self.parent[idx as usize];
        (p != INVALID).then_some(p)
    }

    /// Returns the transition of the step in flight on slot `idx`.
    #[must_use]
    pub fn active_transition_at(&self, idx: u32) -> Option<Transition> {
        self.animation[idx as usize].transition
    }

    /// Returns the serial of the latest animation step started on slot
    /// `idx`.
    ///
    /// See [`AnimationQueue::step`].
    #[must_use]
    pub fn animation_step_at(&self, idx: u32) -> u64 {
        self.animation[idx as usize].step
    }

    // -- Internal helpers --

    /// Panics if `id` is stale.
    pub(crate) fn validate(&self, id: NodeId) {
        assert!(self.is_alive(id), "stale NodeId: {id:?}");
    }

    pub(crate) fn node_id(&self, idx: u32) -> NodeId {
        NodeId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    pub(crate) fn needs_tick(&self, idx: u32) -> bool {
        self.has_tick[idx as usize] || !self.ticking[idx as usize].is_empty()
    }

    /// Returns `true` if `ancestor` is `node` or one of its ancestors.
    fn is_ancestor(&self, ancestor: u32, node: u32) -> bool {
        let mut cur = node;
        while cur != INVALID {
            if cur == ancestor {
                return true;
            }
            cur = self.parent[cur as usize];
        }
        false
    }

    fn add_visible_subview(&mut self, p: u32, child: NodeId) {
        let (style, added_at) = (&self.style, &self.added_at);
        let list = &mut self.visible_subviews[p as usize];
        list.push(child, |id| sort_key(style, added_at, id));
        list.invalidate();
    }

    pub(crate) fn apply_prop(&mut self, idx: u32, prop: StyleProp) -> bool {
        let i = idx as usize;
        if !self.style[i].apply(prop) {
            return false;
        }
        if let Some(channel) = prop.channel() {
            self.dirty.mark(idx, channel);
        }

        match prop {
            StyleProp::Width(_) | StyleProp::Height(_) | StyleProp::CenterAnchor(true) => {
                if self.style[i].center_anchor && self.style[i].recenter_anchor() {
                    self.dirty.mark(idx, dirty::GEOMETRY);
                }
                if matches!(prop, StyleProp::Width(_) | StyleProp::Height(_)) {
                    self.needs_repaint[i] = true;
                }
            }
            StyleProp::ZIndex(_) => {
                let p = self.parent[i];
                if p != INVALID {
                    self.subviews[p as usize].invalidate();
                    self.visible_subviews[p as usize].invalidate();
                }
            }
            StyleProp::Visible(visible) => {
                let p = self.parent[i];
                if p != INVALID {
                    let id = self.node_id(idx);
                    if visible {
                        self.add_visible_subview(p, id);
                    } else {
                        let _ = self.visible_subviews[p as usize].remove(id);
                    }
                }
            }
            _ => {}
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_destroy() {
        let mut tree = SceneTree::<()>::new();
        let a = tree.create_node();
        assert!(tree.is_alive(a));
        assert_eq!(tree.node_count(), 1);
        tree.destroy_node(a);
        assert!(!tree.is_alive(a));
        assert_eq!(tree.node_count(), 0);
    }

    #[test]
    fn slot_reuse_bumps_generation() {
        let mut tree = SceneTree::<()>::new();
        let a = tree.create_node();
        tree.destroy_node(a);
        let b = tree.create_node();
        assert_eq!(a.index(), b.index());
        assert_ne!(a.generation(), b.generation());
        assert!(!tree.is_alive(a));
        assert!(tree.is_alive(b));
    }

    #[test]
    #[should_panic(expected = "stale NodeId")]
    fn stale_handle_panics() {
        let mut tree = SceneTree::<()>::new();
        let a = tree.create_node();
        tree.destroy_node(a);
        let _ = tree.style(a);
    }

    #[test]
    fn add_subview_links_parent() {
        let mut tree = SceneTree::<()>::new();
        let root = tree.create_node();
        let child = tree.create_node();
        assert!(tree.add_subview(root, child));
        assert_eq!(tree.superview(child), Some(root));
        assert_eq!(tree.subviews(root), &[child]);
        assert_eq!(tree.visible_subviews(root), &[child]);
    }

    #[test]
    fn add_subview_refuses_self_and_duplicates() {
        let mut tree = SceneTree::<()>::new();
        let root = tree.create_node();
        let child = tree.create_node();
        assert!(!tree.add_subview(root, root));
        assert!(tree.add_subview(root, child));
        assert!(!tree.add_subview(root, child));
        assert_eq!(tree.subviews(root).len(), 1);
    }

    #[test]
    fn add_subview_refuses_cycles() {
        let mut tree = SceneTree::<()>::new();
        let a = tree.create_node();
        let b = tree.create_node();
        let c = tree.create_node();
        assert!(tree.add_subview(a, b));
        assert!(tree.add_subview(b, c));
        assert!(!tree.add_subview(c, a));
        assert_eq!(tree.superview(a), None);
        assert_eq!(tree.superview(c), Some(b));
    }

    #[test]
    fn reparenting_detaches_first() {
        let mut tree = SceneTree::<()>::new();
        let a = tree.create_node();
        let b = tree.create_node();
        let child = tree.create_node();
        assert!(tree.add_subview(a, child));
        assert!(tree.add_subview(b, child));
        assert!(tree.subviews(a).is_empty());
        assert!(tree.visible_subviews(a).is_empty());
        assert_eq!(tree.subviews(b), &[child]);
        assert_eq!(tree.superview(child), Some(b));
    }

    #[test]
    fn remove_subview_requires_direct_child() {
        let mut tree = SceneTree::<()>::new();
        let a = tree.create_node();
        let b = tree.create_node();
        let c = tree.create_node();
        assert!(tree.add_subview(a, b));
        assert!(!tree.remove_subview(a, c));
        assert!(!tree.remove_subview(c, b));
        assert!(tree.remove_subview(a, b));
        assert!(!tree.remove_subview(a, b));
        assert_eq!(tree.superview(b), None);
    }

    #[test]
    fn equal_z_index_keeps_insertion_order() {
        let mut tree = SceneTree::<()>::new();
        let root = tree.create_node();
        let kids: Vec<_> = (0..3).map(|_| tree.create_node()).collect();
        for &k in &kids {
            assert!(tree.add_subview(root, k));
        }
        assert_eq!(tree.subviews(root), kids.as_slice());
    }

    #[test]
    fn z_index_change_resorts_both_lists() {
        let mut tree = SceneTree::<()>::new();
        let root = tree.create_node();
        let a = tree.create_node();
        let b = tree.create_node();
        let c = tree.create_node();
        for id in [a, b, c] {
            assert!(tree.add_subview(root, id));
        }
        tree.set_z_index(a, 10);
        assert_eq!(tree.subviews(root), &[b, c, a]);
        assert_eq!(tree.visible_subviews(root), &[b, c, a]);
        tree.set_z_index(c, -1);
        assert_eq!(tree.subviews(root), &[c, b, a]);
        assert_eq!(tree.visible_subviews(root), &[c, b, a]);
    }

    #[test]
    fn visibility_toggles_visible_subset() {
        let mut tree = SceneTree::<()>::new();
        let root = tree.create_node();
        let a = tree.create_node();
        let b = tree.create_node();
        assert!(tree.add_subview(root, a));
        assert!(tree.add_subview(root, b));

        tree.set_visible(a, false);
        assert_eq!(tree.visible_subviews(root), &[b]);
        assert_eq!(tree.subviews(root), &[a, b]);

        tree.set_visible(a, true);
        assert_eq!(tree.visible_subviews(root), &[a, b]);
    }

    #[test]
    fn hidden_child_is_not_in_visible_subset_when_added() {
        let mut tree = SceneTree::<()>::new();
        let root = tree.create_node();
        let a = tree.create_node();
        tree.set_visible(a, false);
        assert!(tree.add_subview(root, a));
        assert!(tree.visible_subviews(root).is_empty());
    }

    #[test]
    fn re_adding_moves_to_top_of_equal_z() {
        let mut tree = SceneTree::<()>::new();
        let root = tree.create_node();
        let other = tree.create_node();
        let a = tree.create_node();
        let b = tree.create_node();
        assert!(tree.add_subview(root, a));
        assert!(tree.add_subview(root, b));
        assert!(tree.add_subview(other, a));
        assert!(tree.add_subview(root, a));
        assert_eq!(tree.subviews(root), &[b, a]);
    }

    #[test]
    fn destroy_detaches_children_and_parent() {
        let mut tree = SceneTree::<()>::new();
        let root = tree.create_node();
        let mid = tree.create_node();
        let leaf = tree.create_node();
        assert!(tree.add_subview(root, mid));
        assert!(tree.add_subview(mid, leaf));

        tree.destroy_node(mid);
        assert!(tree.subviews(root).is_empty());
        assert!(tree.visible_subviews(root).is_empty());
        assert_eq!(tree.superview(leaf), None);
        let roots: Vec<_> = tree.roots().collect();
        assert_eq!(roots, vec![root, leaf]);
    }

    #[test]
    fn center_anchor_follows_size() {
        let mut tree = SceneTree::<()>::new();
        let a = tree.create_node();
        tree.update_style(
            a,
            &StyleUpdate::new().with(StyleProp::CenterAnchor(true)).size(40.0, 20.0),
        );
        assert_eq!(tree.style(a).anchor_x, 20.0);
        assert_eq!(tree.style(a).anchor_y, 10.0);
    }

    #[test]
    fn node_at_skips_free_slots() {
        let mut tree = SceneTree::<()>::new();
        let a = tree.create_node();
        let b = tree.create_node();
        tree.destroy_node(a);
        assert_eq!(tree.node_at(a.index()), None);
        assert_eq!(tree.node_at(b.index()), Some(b));
        assert_eq!(tree.node_at(99), None);
    }

    #[test]
    fn liveness_follows_destroy_and_reuse() {
        let mut tree = SceneTree::<()>::new();
        let a = tree.create_node();
        let b = tree.create_node();
        tree.destroy_node(a);
        assert_eq!(tree.roots().collect::<Vec<_>>(), [b]);
        assert_eq!(tree.node_count(), 1);

        let c = tree.create_node();
        assert_eq!(c.index(), a.index());
        assert_eq!(tree.node_at(c.index()), Some(c));
        assert_eq!(tree.roots().collect::<Vec<_>>(), [c, b]);
        assert_eq!(tree.node_count(), 2);
    }
}
