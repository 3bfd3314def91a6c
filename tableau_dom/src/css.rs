// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CSS values for node styles.
//!
//! Elements nest like nodes do, so the host composes parent transforms and
//! opacities itself. Every value here is the node's *local* one.

use tableau_core::anim::Transition;
use tableau_core::style::Style;
use tableau_core::transform::local_transform;

use crate::config::DomConfig;

/// Largest z-index written to CSS; larger values are clamped.
pub const MAX_Z_INDEX: i32 = 99_999_999;

/// Smallest z-index written to CSS; smaller values are clamped.
pub const MIN_Z_INDEX: i32 = -99_999_999;

/// Returns the properties a transition animates under `config`.
#[must_use]
pub fn transition_property(config: &DomConfig) -> &'static str {
    if config.avoid_css_transform {
        "left, top, opacity, width, height"
    } else {
        "transform, opacity, width, height"
    }
}

/// Returns `transition-duration`.
#[must_use]
pub fn transition_duration(transition: &Transition) -> String {
    format!("{}ms", transition.duration.as_millis())
}

/// Returns the `transform` value.
///
/// With `avoid_css_transform` the translation is left to
/// [`left_top`] and only rotation, scale and flips remain, pivoting on
/// [`transform_origin`].
#[must_use]
pub fn transform(style: &Style, config: &DomConfig) -> String {
    let mut css = if config.avoid_css_transform {
        let sx = style.scale * style.scale_x * if style.flip_x { -1.0 } else { 1.0 };
        let sy = style.scale * style.scale_y * if style.flip_y { -1.0 } else { 1.0 };
        format!("rotate({}rad) scale({sx}, {sy})", style.r + 0.0)
    } else {
        let mut snapped = style.clone();
        snapped.x = snapped.x.floor();
        snapped.y = snapped.y.floor();
        // `+ 0.0` turns `-0` into `0`.
        let [a, b, c, d, e, f] = local_transform(&snapped).as_coeffs().map(|v| v + 0.0);
        format!("matrix({a}, {b}, {c}, {d}, {e}, {f})")
    };
    if config.force_3d {
        css.push_str(" translateZ(0)");
    }
    css
}

/// Returns `transform-origin`.
#[must_use]
pub fn transform_origin(style: &Style, config: &DomConfig) -> String {
    if config.avoid_css_transform {
        format!("{}px {}px", style.anchor_x, style.anchor_y)
    } else {
        // The matrix already pivots on the anchor.
        "0 0".to_owned()
    }
}

/// Returns `left` and `top` for `left`/`top` positioning.
#[must_use]
pub fn left_top(style: &Style) -> (String, String) {
    let left = (style.x + style.offset_x).floor();
    let top = (style.y + style.offset_y).floor();
    (px(left), px(top))
}

/// Returns `z-index`, clamped to the range engines sort reliably.
#[must_use]
pub fn z_index(z: i32) -> String {
    z.clamp(MIN_Z_INDEX, MAX_Z_INDEX).to_string()
}

/// Formats a length in pixels.
#[must_use]
pub fn px(v: f64) -> String {
    format!("{v}px")
}
