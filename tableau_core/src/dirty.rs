// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! The scene tree records which style categories changed on each node using
//! multi-channel dirty tracking (via [`understory_dirty`]). Immediate-mode
//! rendering ignores these channels entirely, since it recomputes everything
//! it paints. Retained backends drain them once per frame through
//! [`SceneTree::drain_changes`](crate::scene::SceneTree::drain_changes) and
//! only touch the elements that changed.
//!
//! All channels are local-only: a retained element tree nests elements the
//! same way nodes nest, so the host compositor inherits parent transforms and
//! opacity for free and a parent change never needs to rewrite its children.
//!
//! Scroll offsets are stored on the node but have no channel; no backend
//! consumes them yet.

use understory_dirty::Channel;

/// Position, rotation, scale, anchor, offset or flip changed.
pub const GEOMETRY: Channel = Channel::new(0);

/// Own opacity changed.
pub const OPACITY: Channel = Channel::new(1);

/// Width or height changed.
pub const SIZE: Channel = Channel::new(2);

/// Visible flag changed.
pub const VISIBILITY: Channel = Channel::new(3);

/// Clip flag changed.
pub const CLIP: Channel = Channel::new(4);

/// Background color or composite operation changed.
pub const PAINT: Channel = Channel::new(5);

/// `z_index` changed.
pub const ORDER: Channel = Channel::new(6);

/// The active transition started or ended.
pub const TRANSITION: Channel = Channel::new(7);

/// The node was attached to or detached from a parent.
pub const TOPOLOGY: Channel = Channel::new(8);
