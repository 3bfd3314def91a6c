// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canvas strategy presenter.

use tableau_core::backend::{Presenter, Surface};
use tableau_core::scene::{NodeId, SceneTree};

/// Repaints the whole visible tree onto one surface every frame.
///
/// The canvas strategy keeps no per-node presentation state, so it leaves
/// the change feed to retained presenters sharing the tree. Undrained
/// changes are kept at most once per slot.
#[derive(Debug)]
pub struct CanvasPresenter<S> {
    surface: S,
    frames: u64,
}

impl<S: Surface> CanvasPresenter<S> {
    /// Creates a presenter painting onto `surface`.
    #[must_use]
    pub fn new(surface: S) -> Self {
        Self { surface, frames: 0 }
    }

    /// Returns the surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Returns the surface mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Consumes the presenter, returning the surface.
    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Returns how many frames have been presented.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl<S: Surface, A> Presenter<A> for CanvasPresenter<S> {
    fn present(&mut self, tree: &mut SceneTree<A>, root: NodeId) {
        self.surface.clear();
        tree.wrap_render(root, &mut self.surface);
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;
    use tableau_core::backend::View;
    use tableau_core::error::PaintError;
    use tableau_core::style::{Color, StyleProp, StyleUpdate};

    use super::*;
    use crate::{DisplayList, DrawOp};

    fn boxed(tree: &mut SceneTree, color: Color, z: i32) -> NodeId {
        let id = tree.create_node();
        tree.update_style(
            id,
            &StyleUpdate::new()
                .size(10.0, 10.0)
                .z_index(z)
                .with(StyleProp::BackgroundColor(Some(color))),
        );
        id
    }

    struct Broken;

    impl View for Broken {
        fn has_render(&self) -> bool {
            true
        }

        fn render(&mut self, _surface: &mut dyn Surface) -> Result<(), PaintError> {
            Err(PaintError::failed("no texture"))
        }
    }

    #[test]
    fn paints_in_z_order() {
        let mut tree = SceneTree::<()>::new();
        let root = tree.create_node();
        tree.update_style(root, &StyleUpdate::new().size(100.0, 100.0));
        let red = boxed(&mut tree, Color::rgb(255, 0, 0), 2);
        let green = boxed(&mut tree, Color::rgb(0, 255, 0), 0);
        let blue = boxed(&mut tree, Color::rgb(0, 0, 255), 0);
        for child in [red, green, blue] {
            assert!(tree.add_subview(root, child));
        }

        let mut presenter = CanvasPresenter::new(DisplayList::new());
        presenter.present(&mut tree, root);

        let colors: Vec<Color> = presenter.surface().fills().map(|f| f.color).collect();
        assert_eq!(
            colors,
            [Color::rgb(0, 255, 0), Color::rgb(0, 0, 255), Color::rgb(255, 0, 0)]
        );
    }

    #[test]
    fn each_frame_starts_from_a_clear_surface() {
        let mut tree = SceneTree::<()>::new();
        let root = boxed(&mut tree, Color::BLACK, 0);
        let mut presenter = CanvasPresenter::new(DisplayList::new());
        presenter.present(&mut tree, root);
        presenter.present(&mut tree, root);
        assert_eq!(presenter.frames(), 2);
        assert_eq!(presenter.surface().fills().count(), 1);
    }

    #[test]
    fn failed_view_skips_only_its_subtree() {
        let mut tree = SceneTree::<()>::new();
        let root = tree.create_node();
        let broken = tree.create_node_with_view(Broken);
        tree.update_style(broken, &StyleUpdate::new().size(5.0, 5.0));
        let hidden_by_failure = boxed(&mut tree, Color::WHITE, 0);
        let sibling = boxed(&mut tree, Color::BLACK, 0);
        assert!(tree.add_subview(root, broken));
        assert!(tree.add_subview(broken, hidden_by_failure));
        assert!(tree.add_subview(root, sibling));

        let mut presenter = CanvasPresenter::new(DisplayList::new());
        presenter.present(&mut tree, root);

        let colors: Vec<Color> = presenter.surface().fills().map(|f| f.color).collect();
        assert_eq!(colors, [Color::BLACK]);
        assert_eq!(presenter.surface().depth(), 0);
    }

    #[test]
    fn save_and_restore_balance() {
        let mut tree = SceneTree::<()>::new();
        let root = tree.create_node();
        let clipped = boxed(&mut tree, Color::WHITE, 0);
        let _ = tree.set_style_prop(clipped, StyleProp::Clip(true));
        let inner = boxed(&mut tree, Color::BLACK, 0);
        assert!(tree.add_subview(root, clipped));
        assert!(tree.add_subview(clipped, inner));

        let mut presenter = CanvasPresenter::new(DisplayList::new());
        presenter.present(&mut tree, root);
        let list = presenter.into_surface();

        let saves = list.ops().iter().filter(|op| **op == DrawOp::Save).count();
        let restores = list.ops().iter().filter(|op| **op == DrawOp::Restore).count();
        assert_eq!(saves, 2);
        assert_eq!(saves, restores);
        assert_eq!(list.depth(), 0);
        assert!(list.ops().contains(&DrawOp::ClipRect(Rect::new(0.0, 0.0, 10.0, 10.0))));
    }

    #[test]
    fn nested_fill_lands_at_global_position() {
        let mut tree = SceneTree::<()>::new();
        let root = tree.create_node();
        tree.update_style(root, &StyleUpdate::new().x(10.0).y(10.0));
        let child = boxed(&mut tree, Color::WHITE, 0);
        tree.update_style(child, &StyleUpdate::new().x(10.0).y(10.0).opacity(0.5));
        assert!(tree.add_subview(root, child));

        let mut presenter = CanvasPresenter::new(DisplayList::new());
        presenter.present(&mut tree, root);

        let fill = presenter.surface().fills().next().copied();
        let fill = fill.expect("child fill");
        assert_eq!(fill.device_bounds(), Rect::new(20.0, 20.0, 30.0, 30.0));
        assert_eq!(fill.alpha, 0.5);
    }

    #[test]
    fn spawn_churn_leaves_change_feed_bounded() {
        let mut tree = SceneTree::<()>::new();
        let root = tree.create_node();
        tree.update_style(root, &StyleUpdate::new().size(100.0, 100.0));
        let mut presenter = CanvasPresenter::new(DisplayList::new());
        for frame in 0..200 {
            let spark = boxed(&mut tree, Color::WHITE, frame);
            assert!(tree.add_subview(root, spark));
            presenter.present(&mut tree, root);
            tree.destroy_node(spark);
        }
        assert_eq!(presenter.frames(), 200);

        let changes = tree.drain_changes();
        assert_eq!(changes.added, [root.index()]);
        assert_eq!(changes.removed.len(), 1);
    }
}
