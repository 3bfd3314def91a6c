// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immediate-mode render traversal.

use kurbo::{Affine, Rect};

use super::id::{INVALID, NodeId};
use super::store::{SceneTree, sort_key};
use crate::backend::Surface;
use crate::error::PaintError;
use crate::transform::compose_global;

impl<A> SceneTree<A> {
    /// Recomputes `id`'s global transform and opacity from its parent's
    /// current values.
    ///
    /// Parents must be updated first; [`wrap_render`](Self::wrap_render) does
    /// this top-down.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn update_global_transform(&mut self, id: NodeId) {
        self.validate(id);
        self.update_global_transform_at(id.idx);
    }

    pub(crate) fn update_global_transform_at(&mut self, idx: u32) {
        let i = idx as usize;
        let p = self.parent[i];
        let (parent_transform, parent_opacity) = if p != INVALID {
            (
                self.global_transform[p as usize],
                self.global_opacity[p as usize],
            )
        } else {
            (Affine::IDENTITY, 1.0)
        };
        self.global_opacity[i] = parent_opacity * self.style[i].opacity;
        self.global_transform[i] =
            compose_global(parent_transform, &self.style[i], &mut self.rotation[i]);
    }

    /// Paints `id` and its visible subtree onto `surface`.
    ///
    /// Children paint in `(z_index, added_at)` order, so later siblings land
    /// on top. Drawing state is saved and restored around the node only when
    /// it clips, sets a composite operation, or is a root. A view whose paint
    /// fails is logged and its subtree skipped for this frame; the rest of
    /// the tree still paints.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn wrap_render(&mut self, id: NodeId, surface: &mut dyn Surface) {
        self.validate(id);
        let idx = id.idx as usize;

        {
            let (style, added_at) = (&self.style, &self.added_at);
            let _ = self.visible_subviews[idx].ensure_sorted(|n| sort_key(style, added_at, n));
        }

        let style = &self.style[idx];
        let (width, height) = (style.width, style.height);
        if width < 0.0 || height < 0.0 {
            return;
        }
        let clip = style.clip;
        let composite = style.composite_operation;
        let background = style.background_color;
        let bounds = Rect::new(0.0, 0.0, width, height);

        let save = clip || composite.is_some() || self.parent[idx] == INVALID;
        if save {
            surface.save();
        }

        self.update_global_transform_at(id.idx);
        surface.set_transform(self.global_transform[idx]);
        surface.set_global_alpha(self.global_opacity[idx]);

        if clip {
            surface.clip_rect(bounds);
        }

        match self.views[idx].as_ref().and_then(|v| v.filter()) {
            Some(filter) => surface.set_filter(&filter),
            None => surface.clear_filter(),
        }

        if let Some(op) = composite {
            surface.set_composite_operation(op);
        }

        if let Some(color) = background {
            surface.fill_rect(bounds, color);
        }

        match self.paint_own(idx, surface) {
            Ok(()) => {
                // Paint hooks cannot reach the tree, so the list is stable.
                for i in 0..self.visible_subviews[idx].len() {
                    let child = self.visible_subviews[idx].as_slice()[i];
                    self.wrap_render(child, surface);
                }
            }
            Err(err) => {
                tracing::error!(node = ?id, %err, "view paint failed, skipping subtree");
            }
        }

        surface.clear_filter();

        if save {
            surface.restore();
        }
    }

    /// Runs `id`'s own paint hook on `surface` without touching transform,
    /// alpha or children.
    ///
    /// Retained backends use this to fill a node's private canvas. Nodes
    /// without a rendering view succeed trivially.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn paint_view(&mut self, id: NodeId, surface: &mut dyn Surface) -> Result<(), PaintError> {
        self.validate(id);
        self.paint_own(id.idx as usize, surface)
    }

    fn paint_own(&mut self, idx: usize, surface: &mut dyn Surface) -> Result<(), PaintError> {
        if !self.has_render[idx] {
            return Ok(());
        }
        match self.views[idx].as_mut() {
            Some(view) => view.render(surface),
            None => Ok(()),
        }
    }
}
