// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View scene graph.
//!
//! A *node* (a view's backing) is one slot in the [`SceneTree`]. Each node
//! has:
//!
//! - An identity ([`NodeId`]), a generational handle that becomes stale when
//!   the node is destroyed.
//! - Topology: a parent link and two ordered child lists, all children and
//!   the visible subset. Both lists sort lazily by `(z_index, added_at)`.
//! - A tick-propagation list of the children whose subtree needs per-frame
//!   ticks.
//! - **Local properties** set by callers through
//!   [`update_style`](SceneTree::update_style) and animated through
//!   [`animate`](SceneTree::animate).
//! - **Derived properties** written by the render traversal:
//!   [`global_transform`](SceneTree::global_transform) and
//!   [`global_opacity`](SceneTree::global_opacity). They are stale between
//!   a geometry change and the next render pass.
//! - Optional host hooks ([`View`](crate::backend::View)).
//!
//! Nodes are stored in struct-of-arrays layout with index-based handles.
//!
//! # Dirty tracking
//!
//! Style mutations mark the matching [`dirty`](crate::dirty) channel on the
//! mutated node only. [`drain_changes`](SceneTree::drain_changes) collects
//! the marks into [`StyleChanges`] for retained backends.

mod animate;
mod changes;
mod id;
mod render;
mod store;
mod ticking;

pub use animate::Animator;
pub use changes::StyleChanges;
pub use id::{INVALID, NodeId};
pub use store::SceneTree;
