// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immediate-mode rendering for Tableau.
//!
//! - [`DisplayList`]: a [`Surface`](tableau_core::backend::Surface) that
//!   records draw operations instead of rasterizing them, tracking the
//!   effective transform, alpha and state stack as a 2D canvas would.
//! - [`CanvasPresenter`]: the canvas strategy. Each frame it erases its
//!   surface and repaints the whole visible tree with
//!   [`SceneTree::wrap_render`](tableau_core::scene::SceneTree::wrap_render).

mod display_list;
mod presenter;

pub use display_list::{DisplayList, DrawOp, Fill};
pub use presenter::CanvasPresenter;
pub use tableau_core::backend::Presenter;
