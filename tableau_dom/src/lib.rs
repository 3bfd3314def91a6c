// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM-style presentation for Tableau.
//!
//! Every live node is mirrored by one absolutely positioned element nested
//! the same way the scene tree is. Geometry, opacity, visibility, clipping
//! and z-order are expressed as CSS, and animation steps are handed to the
//! host as CSS transitions whose `transitionend` events complete the node's
//! animation queue.
//!
//! - [`Element`]: the handful of element operations the strategy needs.
//!   [`MemoryElement`] implements it in memory; `tableau_web` implements it
//!   over `web-sys`.
//! - [`DomPresenter`]: applies [`StyleChanges`](tableau_core::scene::StyleChanges)
//!   to the mirrored elements and repaints per-node canvases.
//! - [`DomConfig`]: engine presets (CSS transform vs. `left`/`top`
//!   positioning, forced compositing layers).

mod config;
pub mod css;
mod element;
mod error;
mod memory;
mod presenter;

pub use config::DomConfig;
pub use element::{Element, TransitionInbox};
pub use error::DomError;
pub use memory::MemoryElement;
pub use presenter::DomPresenter;
