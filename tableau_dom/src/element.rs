// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::RefCell;
use std::rc::Rc;

use tableau_core::backend::Surface;
use tableau_core::scene::NodeId;

use crate::error::DomError;

/// A handle to one host element.
///
/// Handles are cheap to clone and refer to the same element. Style writes
/// are fire-and-forget, as they are in a browser.
pub trait Element: Clone {
    /// The 2D drawing surface of a canvas element.
    type Canvas: Surface;

    /// Creates a detached element in the same document as `self`.
    fn create_element(&self, tag: &str) -> Result<Self, DomError>;

    /// Sets one inline CSS property.
    fn set_style(&self, name: &str, value: &str);

    /// Removes one inline CSS property.
    fn remove_style(&self, name: &str);

    /// Appends `child` as the last child of `self`, moving it if it is
    /// already attached elsewhere.
    fn append_child(&self, child: &Self) -> Result<(), DomError>;

    /// Inserts `child` as the first child of `self`.
    fn prepend_child(&self, child: &Self) -> Result<(), DomError>;

    /// Detaches `self` from its parent and releases its `transitionend`
    /// listener.
    fn remove(&self);

    /// Creates a detached canvas element of `width` by `height` pixels and
    /// its 2D surface.
    fn create_canvas(&self, width: u32, height: u32) -> Result<(Self, Self::Canvas), DomError>;

    /// Resizes the canvas element `self`, which clears `surface`.
    ///
    /// Returns `false` if the size did not change.
    fn resize_canvas(&self, surface: &mut Self::Canvas, width: u32, height: u32) -> bool;

    /// Routes this element's `transitionend` events to `inbox` as `node`.
    fn listen_transition_end(&self, node: NodeId, inbox: &TransitionInbox);
}

/// Queue of nodes whose element reported the end of a CSS transition.
///
/// Event listeners push into it; the presenter drains it once per frame in
/// [`DomPresenter::dispatch_transition_ends`](crate::DomPresenter::dispatch_transition_ends).
#[derive(Clone, Debug, Default)]
pub struct TransitionInbox(Rc<RefCell<Vec<NodeId>>>);

impl TransitionInbox {
    /// Creates an empty inbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `node`'s transition ended.
    pub fn push(&self, node: NodeId) {
        self.0.borrow_mut().push(node);
    }

    /// Returns the recorded nodes in arrival order and empties the inbox.
    #[must_use]
    pub fn take(&self) -> Vec<NodeId> {
        core::mem::take(&mut *self.0.borrow_mut())
    }

    /// Returns the number of undelivered notifications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Returns `true` if nothing is waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}
