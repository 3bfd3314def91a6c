// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 2D canvas surface.

use kurbo::{Affine, Rect};
use tableau_core::backend::{Filter, Surface};
use tableau_core::style::{Color, CompositeOperation};
use tableau_dom::DomError;
use wasm_bindgen::JsCast as _;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// A [`Surface`] drawing into a `<canvas>` through its 2D context.
///
/// Context calls that can throw (invalid transforms, unknown composite
/// modes) are ignored, matching what a canvas does with bad input.
#[derive(Clone, Debug)]
pub struct WebCanvas {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl WebCanvas {
    /// Wraps `canvas`, obtaining its 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, DomError> {
        let unavailable = |reason: String| DomError::Canvas {
            width: canvas.width(),
            height: canvas.height(),
            reason,
        };
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| unavailable(format!("{e:?}")))?
            .ok_or_else(|| unavailable("no 2d context".to_owned()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| unavailable("context is not 2d".to_owned()))?;
        Ok(Self { canvas, ctx })
    }

    /// Returns the canvas element.
    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Returns the 2D context.
    #[must_use]
    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }
}

impl Surface for WebCanvas {
    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn set_transform(&mut self, transform: Affine) {
        let [a, b, c, d, e, f] = transform.as_coeffs();
        let _ = self.ctx.set_transform(a, b, c, d, e, f);
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.ctx.begin_path();
        self.ctx.rect(rect.x0, rect.y0, rect.width(), rect.height());
        self.ctx.clip();
    }

    fn set_filter(&mut self, filter: &Filter) {
        self.ctx.set_filter(&filter.to_css());
    }

    fn clear_filter(&mut self) {
        self.ctx.set_filter("none");
    }

    fn set_composite_operation(&mut self, op: CompositeOperation) {
        let _ = self.ctx.set_global_composite_operation(op.as_css());
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_rect(rect.x0, rect.y0, rect.width(), rect.height());
    }

    fn clear(&mut self) {
        self.ctx.save();
        let _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        self.ctx.clear_rect(
            0.0,
            0.0,
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        );
        self.ctx.restore();
    }
}
