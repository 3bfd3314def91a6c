// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View scene graph for Tableau.
//!
//! `tableau_core` owns everything about a tree of views that does not depend
//! on *how* the views end up on screen: parent/child links, z-ordering,
//! visibility and tick indices, global transforms, and the per-node animation
//! queue. Rendering strategies (an immediate-mode canvas and a retained
//! element tree) live in backend crates and consume the contracts defined in
//! [`backend`].
//!
//! # Architecture
//!
//! ```text
//!   host code ── update_style / add_subview / animate ──► SceneTree
//!                                                            │
//!   frame driver                                             │
//!       │ wrap_tick(root, dt, app)   ◄── tick index ─────────┤
//!       │ advance_animations(now)    ◄── animation queues ───┤
//!       ▼                                                    │
//!   Presenter::present(tree, root)   ◄── visible index, ─────┘
//!                                        transforms, StyleChanges
//! ```
//!
//! **[`scene`]**: Struct-of-arrays node store with generational handles.
//! Children are kept in two lazily sorted lists (all children and visible
//! children); descendants that need per-frame ticks are tracked separately so
//! the tick pass can skip idle subtrees.
//!
//! **[`order`]**: The process-wide insertion counter and the
//! `(z_index, added_at)` sort key.
//!
//! **[`transform`]**: Composition of local geometry into global
//! [`kurbo::Affine`] transforms, with a rotation trig cache.
//!
//! **[`anim`]**: Transition, easing and queue state types used by the
//! [`Animator`](scene::Animator) surface.
//!
//! **[`dirty`]**: Dirty-tracking channels, drained into
//! [`StyleChanges`](scene::StyleChanges) for retained backends.
//!
//! **[`backend`]**: The [`Surface`](backend::Surface),
//! [`Presenter`](backend::Presenter) and [`View`](backend::View) contracts.

pub mod anim;
pub mod backend;
pub mod dirty;
pub mod error;
pub mod order;
pub mod scene;
pub mod style;
pub mod time;
pub mod transform;
