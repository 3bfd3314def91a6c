// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for rendering strategies.
//!
//! Tableau splits the "how does a node reach the screen" question into
//! *presenter* crates. The core provides the pieces they share:
//!
//! - **[`Surface`]**: A canvas-like 2D drawing context. The immediate-mode
//!   traversal ([`SceneTree::wrap_render`]) drives one surface for the whole
//!   tree; the retained strategy gives every node its own small surface for
//!   custom paint.
//!
//! - **[`View`]**: Per-node host hooks: per-frame logic (`tick`), own paint
//!   (`render`) and an optional visual [`Filter`]. Nodes without a view are
//!   pure containers.
//!
//! - **[`Presenter`]**: One strategy's per-frame entry point. Both the
//!   canvas and element presenters implement it, enabling generic frame loops
//!   and test doubles.
//!
//! # Crate boundaries
//!
//! `tableau_core` owns the scene tree, ordering, animation and this contract
//! module. `tableau_render` provides a recording surface and the canvas
//! presenter; `tableau_dom` provides the element presenter. Application code
//! depends on the core and one presenter and wires them together in a frame
//! loop.

use kurbo::{Affine, Rect};

use crate::error::PaintError;
use crate::scene::{NodeId, SceneTree};
use crate::style::{Color, CompositeOperation};
use crate::time::Duration;

/// A CSS-expressible visual filter applied while a node paints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Filter {
    /// Gaussian blur with the given radius in pixels.
    Blur(f64),
    /// Linear brightness multiplier, `1.0` is unchanged.
    Brightness(f64),
    /// Grayscale amount in `0.0..=1.0`.
    Grayscale(f64),
    /// Hue rotation in degrees.
    HueRotate(f64),
    /// Saturation multiplier, `1.0` is unchanged.
    Saturate(f64),
}

impl Filter {
    /// Formats the filter as a CSS `filter` function.
    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            Self::Blur(px) => format!("blur({px}px)"),
            Self::Brightness(v) => format!("brightness({v})"),
            Self::Grayscale(v) => format!("grayscale({v})"),
            Self::HueRotate(deg) => format!("hue-rotate({deg}deg)"),
            Self::Saturate(v) => format!("saturate({v})"),
        }
    }
}

/// A canvas-like 2D drawing context.
///
/// Mirrors the subset of `CanvasRenderingContext2D` the render traversal
/// needs. State set through these methods (transform, alpha, clip, filter,
/// composite operation) is saved and restored as a unit by
/// [`save`](Self::save) and [`restore`](Self::restore).
pub trait Surface {
    /// Pushes the current drawing state.
    fn save(&mut self);

    /// Pops the most recently saved drawing state.
    fn restore(&mut self);

    /// Replaces the current transform.
    fn set_transform(&mut self, transform: Affine);

    /// Sets the alpha applied to every subsequent draw.
    fn set_global_alpha(&mut self, alpha: f64);

    /// Intersects the clip region with `rect` in current user space.
    fn clip_rect(&mut self, rect: Rect);

    /// Applies `filter` to subsequent draws.
    fn set_filter(&mut self, filter: &Filter);

    /// Removes any active filter.
    fn clear_filter(&mut self);

    /// Sets the compositing mode for subsequent draws.
    fn set_composite_operation(&mut self, op: CompositeOperation);

    /// Fills `rect` in current user space.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Erases the whole surface to transparent, ignoring the transform.
    fn clear(&mut self);
}

/// State handed to [`View::tick`].
///
/// The tree is borrowed mutably for the duration of the call, so a tick may
/// restyle, attach, detach or even destroy nodes (including its own). The
/// traversal that invoked it tolerates every such change.
pub struct TickContext<'a, A> {
    /// The scene tree being ticked.
    pub tree: &'a mut SceneTree<A>,
    /// The node whose view is ticking.
    pub node: NodeId,
    /// Time since the previous frame.
    pub dt: Duration,
    /// Application state threaded through the tick pass.
    pub app: &'a mut A,
}

impl<A> core::fmt::Debug for TickContext<'_, A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TickContext")
            .field("node", &self.node)
            .field("dt", &self.dt)
            .finish_non_exhaustive()
    }
}

/// Host hooks attached to a node.
///
/// Every method has a no-op default. `has_tick` and `has_render` are read
/// once when the view is attached; they decide whether the node joins the
/// tick index and whether the render traversal calls `render` at all.
pub trait View<A = ()> {
    /// Whether this view has per-frame logic.
    fn has_tick(&self) -> bool {
        false
    }

    /// Whether this view paints its own content.
    fn has_render(&self) -> bool {
        false
    }

    /// Runs per-frame logic.
    fn tick(&mut self, cx: &mut TickContext<'_, A>) {
        let _ = cx;
    }

    /// Paints the view's own content in local coordinates.
    ///
    /// The surface transform and alpha are already set to the node's global
    /// values. An error skips this node's children for the current frame.
    fn render(&mut self, surface: &mut dyn Surface) -> Result<(), PaintError> {
        let _ = surface;
        Ok(())
    }

    /// Returns the filter applied while this node and its subtree paint.
    fn filter(&self) -> Option<Filter> {
        None
    }
}

/// One rendering strategy's per-frame entry point.
///
/// # Frame loop pseudocode
///
/// ```rust,ignore
/// fn on_frame(now: HostTime, dt: Duration) {
///     // Logic: only subtrees that registered for ticks are visited.
///     tree.wrap_tick(root, dt, &mut app);
///
///     // Animation: expire transitions whose deadline passed.
///     tree.advance_animations(now);
///
///     // Present: canvas repaints everything, DOM applies drained changes.
///     presenter.present(&mut tree, root);
/// }
/// ```
pub trait Presenter<A = ()> {
    /// Brings the presentation up to date with `tree`, starting at `root`.
    fn present(&mut self, tree: &mut SceneTree<A>, root: NodeId);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_css() {
        assert_eq!(Filter::Blur(2.5).to_css(), "blur(2.5px)");
        assert_eq!(Filter::HueRotate(90.0).to_css(), "hue-rotate(90deg)");
        assert_eq!(Filter::Grayscale(1.0).to_css(), "grayscale(1)");
    }
}
