// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A recording 2D surface.

use kurbo::{Affine, Rect, Size};
use tableau_core::backend::{Filter, Surface};
use tableau_core::style::{Color, CompositeOperation};

/// One recorded surface call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// [`Surface::save`].
    Save,
    /// [`Surface::restore`].
    Restore,
    /// [`Surface::set_transform`].
    SetTransform(Affine),
    /// [`Surface::set_global_alpha`].
    SetGlobalAlpha(f64),
    /// [`Surface::clip_rect`].
    ClipRect(Rect),
    /// [`Surface::set_filter`].
    SetFilter(Filter),
    /// [`Surface::clear_filter`].
    ClearFilter,
    /// [`Surface::set_composite_operation`].
    SetCompositeOperation(CompositeOperation),
    /// [`Surface::fill_rect`], with the state in effect when it ran.
    Fill(Fill),
}

/// A recorded fill and the drawing state it was issued under.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fill {
    /// Rectangle in user space.
    pub rect: Rect,
    /// Fill color.
    pub color: Color,
    /// User-to-device transform at the time of the fill.
    pub transform: Affine,
    /// Global alpha at the time of the fill.
    pub alpha: f64,
    /// Composite operation at the time of the fill.
    pub composite: CompositeOperation,
    /// Filter active at the time of the fill.
    pub filter: Option<Filter>,
}

impl Fill {
    /// Returns the fill's bounding box in device space.
    #[must_use]
    pub fn device_bounds(&self) -> Rect {
        self.transform.transform_rect_bbox(self.rect)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct DrawState {
    transform: Affine,
    alpha: f64,
    composite: CompositeOperation,
    filter: Option<Filter>,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            alpha: 1.0,
            composite: CompositeOperation::SourceOver,
            filter: None,
        }
    }
}

/// A [`Surface`] that records every call.
///
/// [`clear`](Surface::clear) drops the recording and resets the drawing
/// state, the same way erasing a canvas discards what was painted.
#[derive(Clone, Debug, Default)]
pub struct DisplayList {
    ops: Vec<DrawOp>,
    state: DrawState,
    stack: Vec<DrawState>,
    size: Size,
}

impl DisplayList {
    /// Creates an empty, zero-sized recording.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty recording with a nominal pixel size.
    #[must_use]
    pub fn with_size(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            ..Self::default()
        }
    }

    /// Returns the nominal pixel size.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Changes the nominal pixel size, clearing the recording as resizing a
    /// canvas does.
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.size = Size::new(width, height);
        self.clear();
    }

    /// Returns every recorded call since the last clear.
    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Returns the recorded fills in paint order.
    pub fn fills(&self) -> impl Iterator<Item = &Fill> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Fill(fill) => Some(fill),
            _ => None,
        })
    }

    /// Returns the number of saved states not yet restored.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Returns the current transform.
    #[must_use]
    pub fn transform(&self) -> Affine {
        self.state.transform
    }

    /// Returns the current global alpha.
    #[must_use]
    pub fn global_alpha(&self) -> f64 {
        self.state.alpha
    }
}

impl Surface for DisplayList {
    fn save(&mut self) {
        self.stack.push(self.state);
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some(state) => {
                self.state = state;
                self.ops.push(DrawOp::Restore);
            }
            None => tracing::warn!("restore without matching save"),
        }
    }

    fn set_transform(&mut self, transform: Affine) {
        self.state.transform = transform;
        self.ops.push(DrawOp::SetTransform(transform));
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.state.alpha = alpha;
        self.ops.push(DrawOp::SetGlobalAlpha(alpha));
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.ops.push(DrawOp::ClipRect(rect));
    }

    fn set_filter(&mut self, filter: &Filter) {
        self.state.filter = Some(*filter);
        self.ops.push(DrawOp::SetFilter(*filter));
    }

    fn clear_filter(&mut self) {
        self.state.filter = None;
        self.ops.push(DrawOp::ClearFilter);
    }

    fn set_composite_operation(&mut self, op: CompositeOperation) {
        self.state.composite = op;
        self.ops.push(DrawOp::SetCompositeOperation(op));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::Fill(Fill {
            rect,
            color,
            transform: self.state.transform,
            alpha: self.state.alpha,
            composite: self.state.composite,
            filter: self.state.filter,
        }));
    }

    fn clear(&mut self) {
        self.ops.clear();
        self.stack.clear();
        self.state = DrawState::default();
    }
}
