// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM element management.
//!
//! Translates [`SceneTree`] state into nested, absolutely positioned
//! elements by applying the incremental [`StyleChanges`] feed, and repaints
//! per-node canvases for views that draw their own content.

use tableau_core::backend::{Presenter, Surface};
use tableau_core::scene::{NodeId, SceneTree, StyleChanges};
use tableau_core::style::Style;
use tableau_core::time::HostTime;

use crate::config::DomConfig;
use crate::css;
use crate::element::{Element, TransitionInbox};
use crate::error::DomError;

/// A view's private paint canvas.
struct PaintCanvas<E: Element> {
    element: E,
    surface: E::Canvas,
}

/// Per-slot presentation state.
struct Mirror<E: Element> {
    element: E,
    canvas: Option<PaintCanvas<E>>,
    /// Animation step whose transition the element was last given.
    transition_step: Option<u64>,
}

/// Mirrors a [`SceneTree`] into host elements.
///
/// Each frame, [`sync`](Self::sync) applies a drained [`StyleChanges`] and
/// [`render`](Self::render) repaints the canvases of views whose content
/// changed. [`present`](Presenter::present) does both.
///
/// Root nodes are appended to `container`; every other node's element lives
/// inside its parent's element, so the host composes transforms and
/// opacities down the tree.
pub struct DomPresenter<E: Element> {
    container: E,
    config: DomConfig,
    mirrors: Vec<Option<Mirror<E>>>,
    inbox: TransitionInbox,
    changes: StyleChanges,
}

impl<E: Element> core::fmt::Debug for DomPresenter<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomPresenter")
            .field("config", &self.config)
            .field("elements", &self.mirrors.iter().flatten().count())
            .field("pending_transition_ends", &self.inbox.len())
            .finish_non_exhaustive()
    }
}

impl<E: Element> DomPresenter<E> {
    /// Creates a presenter that manages children of `container`.
    #[must_use]
    pub fn new(container: E, config: DomConfig) -> Self {
        Self {
            container,
            config,
            mirrors: Vec::new(),
            inbox: TransitionInbox::new(),
            changes: StyleChanges::default(),
        }
    }

    /// Returns the container element.
    #[must_use]
    pub fn container(&self) -> &E {
        &self.container
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &DomConfig {
        &self.config
    }

    /// Returns the element mirroring slot `idx`.
    #[must_use]
    pub fn element_at(&self, idx: u32) -> Option<&E> {
        self.mirror(idx).map(|m| &m.element)
    }

    /// Returns the element mirroring `id`.
    #[must_use]
    pub fn element(&self, id: NodeId) -> Option<&E> {
        self.element_at(id.index())
    }

    /// Returns the canvas element and surface of `id`'s own content.
    #[must_use]
    pub fn canvas(&self, id: NodeId) -> Option<(&E, &E::Canvas)> {
        self.mirror(id.index())
            .and_then(|m| m.canvas.as_ref())
            .map(|c| (&c.element, &c.surface))
    }

    /// Returns the inbox that element listeners report transition ends to.
    #[must_use]
    pub fn inbox(&self) -> &TransitionInbox {
        &self.inbox
    }

    fn mirror(&self, idx: u32) -> Option<&Mirror<E>> {
        self.mirrors.get(idx as usize).and_then(Option::as_ref)
    }

    fn take_mirror(&mut self, idx: u32) -> Option<Mirror<E>> {
        self.mirrors.get_mut(idx as usize)?.take()
    }

    fn put_mirror(&mut self, idx: u32, mirror: Mirror<E>) {
        let slot = idx as usize;
        if self.mirrors.len() <= slot {
            self.mirrors.resize_with(slot + 1, || None);
        }
        self.mirrors[slot] = Some(mirror);
    }

    /// Applies one frame's changes to the elements.
    ///
    /// Order matters: removals first so a reused slot gets a fresh element,
    /// then creations, re-parenting, and transitions *before* the new values
    /// they animate.
    pub fn sync<A>(&mut self, tree: &SceneTree<A>, changes: &StyleChanges) {
        // 1. Removals
        for &idx in &changes.removed {
            if let Some(mirror) = self.take_mirror(idx) {
                mirror.element.remove();
            }
        }

        // 2. Additions
        for &idx in &changes.added {
            let Some(id) = tree.node_at(idx) else {
                continue;
            };
            match self.create_mirror(id, tree.style_at(idx)) {
                Ok(mirror) => self.put_mirror(idx, mirror),
                Err(err) => tracing::warn!(node = ?id, %err, "element not created"),
            }
        }

        // 3. Topology, in insertion order so element order matches ties.
        let mut moved: Vec<NodeId> = changes
            .topology
            .iter()
            .chain(&changes.added)
            .filter_map(|&idx| tree.node_at(idx))
            .collect();
        moved.sort_by_key(|&id| (tree.sort_key(id).added_at, id.index()));
        moved.dedup();
        for id in moved {
            self.attach(tree, id);
        }

        // 4. Transitions
        for &idx in &changes.transition {
            let Some(mirror) = self.mirrors.get_mut(idx as usize).and_then(Option::as_mut) else {
                continue;
            };
            let transition = tree.active_transition_at(idx);
            mirror.transition_step = transition.map(|_| tree.animation_step_at(idx));
            let el = &mirror.element;
            match transition {
                Some(t) => {
                    el.remove_style("transition");
                    el.set_style("transition-property", css::transition_property(&self.config));
                    el.set_style("transition-duration", &css::transition_duration(&t));
                    el.set_style("transition-timing-function", t.easing.css_name());
                }
                None => el.set_style("transition", "none"),
            }
        }

        // 5. Geometry. Flips mirror around the size, so size changes
        // re-emit the transform too.
        for &idx in changes.geometry.iter().chain(&changes.size) {
            if let Some(el) = self.element_at(idx) {
                apply_geometry(el, tree.style_at(idx), &self.config);
            }
        }

        // 6. Size
        for &idx in &changes.size {
            if let Some(el) = self.element_at(idx) {
                apply_size(el, tree.style_at(idx));
            }
        }

        // 7. Opacity
        for &idx in &changes.opacity {
            if let Some(el) = self.element_at(idx) {
                el.set_style("opacity", &tree.style_at(idx).opacity.to_string());
            }
        }

        // 8. Visibility
        for &idx in &changes.visibility {
            if let Some(el) = self.element_at(idx) {
                apply_visibility(el, tree.style_at(idx));
            }
        }

        // 9. Clip
        for &idx in &changes.clip {
            if let Some(el) = self.element_at(idx) {
                apply_clip(el, tree.style_at(idx));
            }
        }

        // 10. Paint
        for &idx in &changes.paint {
            if let Some(el) = self.element_at(idx) {
                apply_paint(el, tree.style_at(idx));
            }
        }

        // 11. Order
        for &idx in &changes.order {
            if let Some(el) = self.element_at(idx) {
                el.set_style("z-index", &css::z_index(tree.style_at(idx).z_index));
            }
        }
    }

    fn create_mirror(&self, id: NodeId, style: &Style) -> Result<Mirror<E>, DomError> {
        let el = self.container.create_element("div")?;
        el.set_style("position", "absolute");
        el.set_style("left", "0");
        el.set_style("top", "0");
        if self.config.hide_backface {
            el.set_style("backface-visibility", "hidden");
        }
        apply_geometry(&el, style, &self.config);
        apply_size(&el, style);
        el.set_style("opacity", &style.opacity.to_string());
        apply_visibility(&el, style);
        apply_clip(&el, style);
        apply_paint(&el, style);
        el.set_style("z-index", &css::z_index(style.z_index));
        el.listen_transition_end(id, &self.inbox);
        Ok(Mirror {
            element: el,
            canvas: None,
            transition_step: None,
        })
    }

    fn attach<A>(&self, tree: &SceneTree<A>, id: NodeId) {
        let Some(el) = self.element(id) else {
            return;
        };
        let target = match tree.superview(id) {
            Some(parent) => match self.element(parent) {
                Some(parent_el) => parent_el,
                None => return,
            },
            None => &self.container,
        };
        if let Err(err) = target.append_child(el) {
            tracing::warn!(node = ?id, %err, "element not attached");
        }
    }

    /// Repaints the canvases of `root`'s visible subtree where needed.
    ///
    /// Children are visited in `(z_index, added_at)` order. Invisible or
    /// zero-sized nodes are skipped with their subtrees. A node's canvas is
    /// repainted when its view asked for it or when the canvas was resized.
    /// A failed paint is logged and skips that node's subtree.
    ///
    /// # Panics
    ///
    /// Panics if `root` is stale.
    pub fn render<A>(&mut self, tree: &mut SceneTree<A>, root: NodeId) {
        let style = tree.style(root);
        if !style.visible {
            return;
        }
        let (width, height) = (style.width, style.height);
        if !(width > 0.0 && height > 0.0) {
            return;
        }

        if tree.renders(root)
            && let Err(err) = self.repaint(tree, root, width, height)
        {
            tracing::error!(node = ?root, %err, "view paint failed, skipping subtree");
            return;
        }

        let children = tree.subviews(root).to_vec();
        for child in children {
            self.render(tree, child);
        }
    }

    fn repaint<A>(
        &mut self,
        tree: &mut SceneTree<A>,
        id: NodeId,
        width: f64,
        height: f64,
    ) -> Result<(), tableau_core::error::PaintError> {
        // Partial pixels still need a pixel of backing store.
        #[expect(
            clippy::cast_possible_truncation,
            reason = "canvas sizes are positive pixel counts"
        )]
        let (w, h) = (width.ceil() as u32, height.ceil() as u32);
        let idx = id.index();
        let Some(mirror) = self.mirrors.get_mut(idx as usize).and_then(Option::as_mut) else {
            return Ok(());
        };

        let mut repaint = tree.take_needs_repaint(id);
        match mirror.canvas.as_mut() {
            Some(canvas) => {
                if canvas.element.resize_canvas(&mut canvas.surface, w, h) {
                    repaint = true;
                }
            }
            None => match mirror.element.create_canvas(w, h) {
                Ok((element, surface)) => {
                    if let Err(err) = mirror.element.prepend_child(&element) {
                        tracing::warn!(node = ?id, %err, "paint canvas not attached");
                    }
                    mirror.canvas = Some(PaintCanvas { element, surface });
                    repaint = true;
                }
                Err(err) => {
                    // Not ready; ask again next frame.
                    tracing::warn!(node = ?id, %err, "paint canvas unavailable");
                    tree.set_needs_repaint(id);
                    return Ok(());
                }
            },
        }

        let Some(canvas) = mirror.canvas.as_mut() else {
            return Ok(());
        };
        if !repaint {
            return Ok(());
        }
        let surface = &mut canvas.surface;
        surface.clear();
        surface.save();
        let result = tree.paint_view(id, surface);
        surface.restore();
        result
    }

    /// Delivers queued `transitionend` notifications to the animation
    /// queues, at time `now`.
    ///
    /// A notification completes the step whose transition the element was
    /// last given, and only that step. Hosts fire one event per animated
    /// property, so repeats for a step that already completed are dropped,
    /// as are notifications for destroyed nodes. Returns how many steps
    /// completed.
    pub fn dispatch_transition_ends<A>(
        &mut self,
        tree: &mut SceneTree<A>,
        now: HostTime,
    ) -> usize {
        let mut completed = 0;
        for id in self.inbox.take() {
            if !tree.is_alive(id) {
                continue;
            }
            let Some(step) = self.mirror(id.index()).and_then(|m| m.transition_step) else {
                continue;
            };
            if tree.transition_end_of(id, step, now) {
                completed += 1;
            }
        }
        completed
    }
}

impl<E: Element, A> Presenter<A> for DomPresenter<E> {
    fn present(&mut self, tree: &mut SceneTree<A>, root: NodeId) {
        let mut changes = core::mem::take(&mut self.changes);
        tree.drain_changes_into(&mut changes);
        self.sync(tree, &changes);
        self.changes = changes;
        self.render(tree, root);
    }
}

fn apply_geometry<E: Element>(el: &E, style: &Style, config: &DomConfig) {
    if config.avoid_css_transform {
        let (left, top) = css::left_top(style);
        el.set_style("left", &left);
        el.set_style("top", &top);
    }
    el.set_style("transform", &css::transform(style, config));
    el.set_style("transform-origin", &css::transform_origin(style, config));
}

fn apply_size<E: Element>(el: &E, style: &Style) {
    el.set_style("width", &css::px(style.width));
    el.set_style("height", &css::px(style.height));
}

fn apply_visibility<E: Element>(el: &E, style: &Style) {
    el.set_style("display", if style.visible { "block" } else { "none" });
}

fn apply_clip<E: Element>(el: &E, style: &Style) {
    el.set_style("overflow", if style.clip { "hidden" } else { "visible" });
}

fn apply_paint<E: Element>(el: &E, style: &Style) {
    match style.background_color {
        Some(color) => el.set_style("background-color", &color.to_css()),
        None => el.remove_style("background-color"),
    }
    match style.composite_operation.and_then(|op| op.as_blend_mode()) {
        Some(mode) => el.set_style("mix-blend-mode", mode),
        None => el.remove_style("mix-blend-mode"),
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;
    use tableau_core::anim::{Easing, Transition};
    use tableau_core::backend::View;
    use tableau_core::error::PaintError;
    use tableau_core::style::{Color, StyleProp, StyleUpdate};
    use tableau_core::time::Duration;

    use super::*;
    use crate::memory::MemoryElement;

    fn setup() -> (SceneTree, DomPresenter<MemoryElement>) {
        (
            SceneTree::<()>::new(),
            DomPresenter::new(MemoryElement::body(), DomConfig::desktop()),
        )
    }

    fn sized(tree: &mut SceneTree, w: f64, h: f64) -> NodeId {
        let id = tree.create_node();
        tree.update_style(id, &StyleUpdate::new().size(w, h));
        id
    }

    struct Painter {
        color: Color,
    }

    impl View for Painter {
        fn has_render(&self) -> bool {
            true
        }

        fn render(&mut self, surface: &mut dyn Surface) -> Result<(), PaintError> {
            surface.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), self.color);
            Ok(())
        }
    }

    struct Broken;

    impl View for Broken {
        fn has_render(&self) -> bool {
            true
        }

        fn render(&mut self, _surface: &mut dyn Surface) -> Result<(), PaintError> {
            Err(PaintError::NotReady("atlas".into()))
        }
    }

    fn fills(presenter: &DomPresenter<MemoryElement>, id: NodeId) -> usize {
        presenter
            .canvas(id)
            .map_or(0, |(_, list)| list.fills().count())
    }

    #[test]
    fn elements_nest_like_nodes() {
        let (mut tree, mut presenter) = setup();
        let root = sized(&mut tree, 100.0, 100.0);
        let child = sized(&mut tree, 10.0, 10.0);
        assert!(tree.add_subview(root, child));
        presenter.present(&mut tree, root);

        let root_el = presenter.element(root).cloned().unwrap();
        let child_el = presenter.element(child).cloned().unwrap();
        assert_eq!(root_el.parent().as_ref(), Some(presenter.container()));
        assert_eq!(child_el.parent(), Some(root_el));
        assert_eq!(child_el.style("position").as_deref(), Some("absolute"));
        assert_eq!(child_el.style("width").as_deref(), Some("10px"));
        assert_eq!(child_el.style("display").as_deref(), Some("block"));
    }

    #[test]
    fn reparenting_moves_the_element() {
        let (mut tree, mut presenter) = setup();
        let a = sized(&mut tree, 10.0, 10.0);
        let b = sized(&mut tree, 10.0, 10.0);
        let c = sized(&mut tree, 10.0, 10.0);
        assert!(tree.add_subview(a, c));
        presenter.present(&mut tree, a);
        assert!(tree.add_subview(b, c));
        presenter.present(&mut tree, b);

        let c_el = presenter.element(c).cloned().unwrap();
        assert_eq!(c_el.parent().as_ref(), presenter.element(b));
        assert!(presenter.element(a).unwrap().children().is_empty());
    }

    #[test]
    fn destroyed_nodes_lose_their_element() {
        let (mut tree, mut presenter) = setup();
        let root = sized(&mut tree, 10.0, 10.0);
        let child = sized(&mut tree, 10.0, 10.0);
        let grandchild = sized(&mut tree, 10.0, 10.0);
        assert!(tree.add_subview(root, child));
        assert!(tree.add_subview(child, grandchild));
        presenter.present(&mut tree, root);

        let child_el = presenter.element(child).cloned().unwrap();
        tree.destroy_node(child);
        presenter.present(&mut tree, root);

        assert!(child_el.parent().is_none());
        assert!(presenter.element_at(child.index()).is_none());
        // The orphaned grandchild survives as a root.
        let gc_el = presenter.element(grandchild).unwrap();
        assert_eq!(gc_el.parent().as_ref(), Some(presenter.container()));
    }

    #[test]
    fn style_changes_reach_css() {
        let (mut tree, mut presenter) = setup();
        let root = sized(&mut tree, 10.0, 10.0);
        presenter.present(&mut tree, root);

        tree.update_style(
            root,
            &StyleUpdate::new()
                .x(4.5)
                .opacity(0.5)
                .visible(false)
                .z_index(200_000_000)
                .with(StyleProp::Clip(true))
                .with(StyleProp::BackgroundColor(Some(Color::rgb(255, 0, 0)))),
        );
        presenter.present(&mut tree, root);

        let el = presenter.element(root).unwrap();
        assert_eq!(el.style("transform").as_deref(), Some("matrix(1, 0, 0, 1, 4, 0)"));
        assert_eq!(el.style("opacity").as_deref(), Some("0.5"));
        assert_eq!(el.style("display").as_deref(), Some("none"));
        assert_eq!(el.style("overflow").as_deref(), Some("hidden"));
        assert_eq!(el.style("z-index").as_deref(), Some("99999999"));
        assert_eq!(el.style("background-color").as_deref(), Some("#ff0000ff"));
    }

    #[test]
    fn android_positions_with_left_top() {
        let mut tree = SceneTree::<()>::new();
        let mut presenter = DomPresenter::new(MemoryElement::body(), DomConfig::android());
        let root = sized(&mut tree, 10.0, 10.0);
        tree.update_style(root, &StyleUpdate::new().x(3.0).y(4.0));
        presenter.present(&mut tree, root);

        let el = presenter.element(root).unwrap();
        assert_eq!(el.style("left").as_deref(), Some("3px"));
        assert_eq!(el.style("top").as_deref(), Some("4px"));
        assert!(el.style("backface-visibility").is_none());
    }

    #[test]
    fn transition_css_precedes_values() {
        let (mut tree, mut presenter) = setup();
        let root = sized(&mut tree, 10.0, 10.0);
        presenter.present(&mut tree, root);

        let t = Transition::new(Duration::from_millis(300), Easing::EaseOut);
        let _ = tree
            .animate(root, HostTime(0))
            .then(StyleUpdate::new().x(50.0), t);
        presenter.present(&mut tree, root);

        let el = presenter.element(root).unwrap();
        assert_eq!(
            el.style("transition-property").as_deref(),
            Some("transform, opacity, width, height")
        );
        assert_eq!(el.style("transition-duration").as_deref(), Some("300ms"));
        assert_eq!(el.style("transition-timing-function").as_deref(), Some("ease-out"));
        assert_eq!(el.style("transform").as_deref(), Some("matrix(1, 0, 0, 1, 50, 0)"));
    }

    #[test]
    fn transition_end_completes_the_step() {
        let (mut tree, mut presenter) = setup();
        let root = sized(&mut tree, 10.0, 10.0);
        presenter.present(&mut tree, root);

        let _ = tree
            .animate(root, HostTime(0))
            .then(StyleUpdate::new().x(50.0), Transition::default())
            .then(StyleUpdate::new().y(20.0), Transition::default());
        presenter.present(&mut tree, root);
        assert!(tree.animation(root).is_animating());

        let el = presenter.element(root).cloned().unwrap();
        assert!(el.fire_transition_end());
        assert_eq!(presenter.dispatch_transition_ends(&mut tree, HostTime(100)), 1);
        assert_eq!(tree.style(root).y, 20.0);
        presenter.present(&mut tree, root);
        assert_eq!(el.style("transform").as_deref(), Some("matrix(1, 0, 0, 1, 50, 20)"));

        // Repeated end events for one step complete it once.
        assert!(el.fire_transition_end());
        assert!(el.fire_transition_end());
        assert_eq!(presenter.dispatch_transition_ends(&mut tree, HostTime(200)), 1);
        assert!(!tree.animation(root).is_animating());
        presenter.present(&mut tree, root);
        assert_eq!(el.style("transition").as_deref(), Some("none"));
    }

    #[test]
    fn per_property_end_events_complete_one_step() {
        let (mut tree, mut presenter) = setup();
        let root = sized(&mut tree, 10.0, 10.0);
        presenter.present(&mut tree, root);

        let _ = tree
            .animate(root, HostTime(0))
            .then(StyleUpdate::new().x(50.0).opacity(0.5), Transition::default())
            .then(StyleUpdate::new().y(20.0), Transition::default())
            .then(StyleUpdate::new().x(0.0), Transition::default());
        presenter.present(&mut tree, root);

        // One event for `transform`, one for `opacity`.
        let el = presenter.element(root).cloned().unwrap();
        assert!(el.fire_transition_end());
        assert!(el.fire_transition_end());
        assert_eq!(presenter.dispatch_transition_ends(&mut tree, HostTime(100)), 1);

        assert_eq!(tree.style(root).x, 50.0);
        assert_eq!(tree.style(root).y, 20.0);
        assert_eq!(tree.animation(root).pending(), 1);
        assert!(tree.animation(root).is_animating());
    }

    #[test]
    fn transition_end_before_sync_is_dropped() {
        let (mut tree, mut presenter) = setup();
        let root = sized(&mut tree, 10.0, 10.0);
        presenter.present(&mut tree, root);

        // The element has not been given this transition yet.
        let _ = tree
            .animate(root, HostTime(0))
            .then(StyleUpdate::new().x(50.0), Transition::default());
        let el = presenter.element(root).cloned().unwrap();
        assert!(el.fire_transition_end());
        assert_eq!(presenter.dispatch_transition_ends(&mut tree, HostTime(10)), 0);
        assert!(tree.animation(root).is_animating());
    }

    #[test]
    fn transition_end_for_destroyed_node_is_dropped() {
        let (mut tree, mut presenter) = setup();
        let root = sized(&mut tree, 10.0, 10.0);
        let child = sized(&mut tree, 10.0, 10.0);
        assert!(tree.add_subview(root, child));
        presenter.present(&mut tree, root);

        let el = presenter.element(child).cloned().unwrap();
        tree.destroy_node(child);
        assert!(el.fire_transition_end());
        assert_eq!(presenter.dispatch_transition_ends(&mut tree, HostTime(0)), 0);
        assert!(presenter.inbox().is_empty());
    }

    #[test]
    fn canvas_repaints_only_when_needed() {
        let (mut tree, mut presenter) = setup();
        let root = tree.create_node_with_view(Painter {
            color: Color::WHITE,
        });
        tree.update_style(root, &StyleUpdate::new().size(8.0, 8.0));
        presenter.present(&mut tree, root);
        assert_eq!(fills(&presenter, root), 1);

        let (canvas_el, _) = presenter.canvas(root).unwrap();
        let canvas_el = canvas_el.clone();
        let root_el = presenter.element(root).unwrap();
        assert_eq!(root_el.children().first(), Some(&canvas_el));

        // Nothing changed: the canvas keeps its pixels and is not redrawn.
        presenter.present(&mut tree, root);
        assert_eq!(fills(&presenter, root), 1);

        // Resizing clears and repaints.
        tree.update_style(root, &StyleUpdate::new().size(16.0, 8.0));
        presenter.present(&mut tree, root);
        assert_eq!(fills(&presenter, root), 1);
        assert_eq!(canvas_el.attribute("width").as_deref(), Some("16"));
    }

    #[test]
    fn fractional_sizes_round_canvas_up() {
        let (mut tree, mut presenter) = setup();
        let root = tree.create_node_with_view(Painter {
            color: Color::WHITE,
        });
        tree.update_style(root, &StyleUpdate::new().size(0.5, 2.25));
        presenter.present(&mut tree, root);

        let (canvas_el, _) = presenter.canvas(root).unwrap();
        assert_eq!(canvas_el.attribute("width").as_deref(), Some("1"));
        assert_eq!(canvas_el.attribute("height").as_deref(), Some("3"));
        assert_eq!(fills(&presenter, root), 1);
    }

    #[test]
    fn hidden_and_empty_nodes_are_not_painted() {
        let (mut tree, mut presenter) = setup();
        let root = sized(&mut tree, 10.0, 10.0);
        let hidden = tree.create_node_with_view(Painter {
            color: Color::BLACK,
        });
        tree.update_style(hidden, &StyleUpdate::new().size(4.0, 4.0).visible(false));
        let empty = tree.create_node_with_view(Painter {
            color: Color::BLACK,
        });
        assert!(tree.add_subview(root, hidden));
        assert!(tree.add_subview(root, empty));
        presenter.present(&mut tree, root);

        assert!(presenter.canvas(hidden).is_none());
        assert!(presenter.canvas(empty).is_none());
    }

    #[test]
    fn paint_failure_skips_the_subtree() {
        let (mut tree, mut presenter) = setup();
        let root = sized(&mut tree, 10.0, 10.0);
        let broken = tree.create_node_with_view(Broken);
        tree.update_style(broken, &StyleUpdate::new().size(4.0, 4.0));
        let below = tree.create_node_with_view(Painter {
            color: Color::BLACK,
        });
        tree.update_style(below, &StyleUpdate::new().size(4.0, 4.0));
        let sibling = tree.create_node_with_view(Painter {
            color: Color::WHITE,
        });
        tree.update_style(sibling, &StyleUpdate::new().size(4.0, 4.0));
        assert!(tree.add_subview(root, broken));
        assert!(tree.add_subview(broken, below));
        assert!(tree.add_subview(root, sibling));
        presenter.present(&mut tree, root);

        assert!(presenter.canvas(below).is_none());
        assert_eq!(fills(&presenter, sibling), 1);
    }

    #[test]
    fn unavailable_canvas_retries_next_frame() {
        let (mut tree, mut presenter) = setup();
        presenter.container().set_canvas_limit(Some(0));
        let root = tree.create_node_with_view(Painter {
            color: Color::WHITE,
        });
        tree.update_style(root, &StyleUpdate::new().size(4.0, 4.0));
        presenter.present(&mut tree, root);
        assert!(presenter.canvas(root).is_none());

        presenter.container().set_canvas_limit(None);
        presenter.present(&mut tree, root);
        assert_eq!(fills(&presenter, root), 1);
    }
}
