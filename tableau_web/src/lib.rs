// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser bindings for Tableau.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`WebElement`]: [`Element`](tableau_dom::Element) over a live
//!   `HtmlElement`, for the DOM strategy.
//! - [`WebCanvas`]: [`Surface`](tableau_core::backend::Surface) over a
//!   `CanvasRenderingContext2d`, for the canvas strategy and for per-node
//!   canvases of the DOM strategy.
//! - [`RafLoop`]: `requestAnimationFrame` frame source.
//! - [`now`]: host time from `performance.now()`.

mod canvas;
mod element;
mod raf;

pub use canvas::WebCanvas;
pub use element::WebElement;
pub use raf::{Frame, RafLoop};
pub use tableau_core::backend::Presenter;

use tableau_core::time::HostTime;
use tableau_dom::DomPresenter;
use tableau_render::CanvasPresenter;

/// The DOM strategy over live elements.
pub type WebDomPresenter = DomPresenter<WebElement>;

/// The canvas strategy over one `<canvas>`.
pub type WebCanvasPresenter = CanvasPresenter<WebCanvas>;

/// Returns the current host time from `performance.now()`.
#[must_use]
pub fn now() -> HostTime {
    host_time(raf::performance_now())
}

/// Converts a `DOMHighResTimeStamp` to [`HostTime`] milliseconds.
pub(crate) fn host_time(ms: f64) -> HostTime {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "timestamps are small positive milliseconds; negatives saturate to 0"
    )]
    let ms = ms as u64;
    HostTime(ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_truncate_to_millis() {
        assert_eq!(host_time(16.9), HostTime(16));
        assert_eq!(host_time(-3.0), HostTime(0));
    }
}
