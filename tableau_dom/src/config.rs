// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// How nodes are positioned and composited by the host engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DomConfig {
    /// Position with `left`/`top` and express rotation and scale as CSS
    /// functions around `transform-origin`, instead of one `matrix()`.
    ///
    /// Some engines cannot animate `transform` reliably; transitions then
    /// run on `left`/`top` instead.
    pub avoid_css_transform: bool,
    /// Append `translateZ(0)` so every element gets its own compositing
    /// layer.
    pub force_3d: bool,
    /// Set `backface-visibility: hidden` on every element.
    pub hide_backface: bool,
}

impl Default for DomConfig {
    fn default() -> Self {
        Self::desktop()
    }
}

impl DomConfig {
    /// Plain `matrix()` transforms.
    #[must_use]
    pub const fn desktop() -> Self {
        Self {
            avoid_css_transform: false,
            force_3d: false,
            hide_backface: true,
        }
    }

    /// Matrix transforms with forced compositing layers.
    #[must_use]
    pub const fn webkit() -> Self {
        Self {
            avoid_css_transform: false,
            force_3d: true,
            hide_backface: true,
        }
    }

    /// `left`/`top` positioning, no backface hiding.
    #[must_use]
    pub const fn android() -> Self {
        Self {
            avoid_css_transform: true,
            force_3d: false,
            hide_backface: false,
        }
    }
}
