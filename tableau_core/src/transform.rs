// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Local-to-global transform composition.
//!
//! A node's local transform places its content in parent space:
//!
//! 1. mirror the anchor around the size for each flipped axis,
//! 2. scale by `scale * scale_{x,y}` (negated when flipped) and rotate by `r`,
//!    both around the anchor,
//! 3. translate by `x + offset_x + anchor_x`, `y + offset_y + anchor_y`.
//!
//! The global transform is the parent's global transform times the local
//! one. Matrices use the [`kurbo::Affine`] coefficient layout
//! `[a, b, c, d, e, f]`, mapping `(x, y)` to
//! `(a*x + c*y + e, b*x + d*y + f)`.

use kurbo::Affine;

use crate::style::Style;

/// Cached sine and cosine for the last rotation seen by a node.
///
/// Rotation changes far less often than the transform is recomputed (once per
/// node per frame), so trig is only evaluated when `r` actually moves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationCache {
    rotation: f64,
    sin: f64,
    cos: f64,
}

impl Default for RotationCache {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            sin: 0.0,
            cos: 1.0,
        }
    }
}

impl RotationCache {
    /// Returns `(sin r, cos r)`, recomputing only if `r` changed.
    pub fn sin_cos(&mut self, r: f64) -> (f64, f64) {
        if r != self.rotation {
            let (sin, cos) = r.sin_cos();
            self.rotation = r;
            self.sin = sin;
            self.cos = cos;
        }
        (self.sin, self.cos)
    }

    /// Returns the rotation the cached values belong to.
    #[must_use]
    pub const fn rotation(&self) -> f64 {
        self.rotation
    }
}

/// Scale and pivot after flips are folded in.
struct Pivot {
    sx: f64,
    sy: f64,
    ax: f64,
    ay: f64,
    tx: f64,
    ty: f64,
}

impl Pivot {
    fn new(style: &Style) -> Self {
        let flip_x = if style.flip_x { -1.0 } else { 1.0 };
        let flip_y = if style.flip_y { -1.0 } else { 1.0 };
        Self {
            sx: style.scale_x * style.scale * flip_x,
            sy: style.scale_y * style.scale * flip_y,
            ax: if style.flip_x {
                style.width - style.anchor_x
            } else {
                style.anchor_x
            },
            ay: if style.flip_y {
                style.height - style.anchor_y
            } else {
                style.anchor_y
            },
            tx: style.x + style.offset_x + style.anchor_x,
            ty: style.y + style.offset_y + style.anchor_y,
        }
    }
}

/// Composes `style`'s local transform onto `parent`.
///
/// Zero rotation takes a scale-and-translate path with no trig and no full
/// matrix product. Otherwise `cache` supplies `sin`/`cos`.
pub fn compose_global(parent: Affine, style: &Style, cache: &mut RotationCache) -> Affine {
    let [pa, pb, pc, pd, pe, pf] = parent.as_coeffs();
    let Pivot {
        sx,
        sy,
        ax,
        ay,
        mut tx,
        mut ty,
    } = Pivot::new(style);

    if style.r == 0.0 {
        tx -= ax * sx;
        ty -= ay * sy;
        return Affine::new([
            pa * sx,
            pb * sx,
            pc * sy,
            pd * sy,
            tx * pa + ty * pc + pe,
            tx * pb + ty * pd + pf,
        ]);
    }

    let (sin, cos) = cache.sin_cos(style.r);
    let a = cos * sx;
    let b = sin * sx;
    let c = -sin * sy;
    let d = cos * sy;
    tx -= a * ax + c * ay;
    ty -= b * ax + d * ay;

    Affine::new([
        a * pa + b * pc,
        a * pb + b * pd,
        c * pa + d * pc,
        c * pb + d * pd,
        tx * pa + ty * pc + pe,
        tx * pb + ty * pd + pf,
    ])
}

/// Returns `style`'s local transform in parent space.
///
/// Equivalent to `compose_global(Affine::IDENTITY, style, ..)` without a trig
/// cache. Retained backends emit this as the element's own matrix, since the
/// host nests elements and composes parents itself.
#[must_use]
pub fn local_transform(style: &Style) -> Affine {
    let Pivot {
        sx,
        sy,
        ax,
        ay,
        tx,
        ty,
    } = Pivot::new(style);
    let (sin, cos) = if style.r == 0.0 {
        (0.0, 1.0)
    } else {
        style.r.sin_cos()
    };
    let a = cos * sx;
    let b = sin * sx;
    let c = -sin * sy;
    let d = cos * sy;
    Affine::new([a, b, c, d, tx - (a * ax + c * ay), ty - (b * ax + d * ay)])
}
