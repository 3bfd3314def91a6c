// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised by view paint hooks.

use thiserror::Error;

/// A view's own paint failed.
///
/// Returned from [`View::render`](crate::backend::View::render). The render
/// traversal logs it and skips the failing node's subtree; siblings keep
/// painting.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PaintError {
    /// A resource the view paints from (image, glyph atlas) is not loaded yet.
    #[error("resource not ready: {0}")]
    NotReady(String),
    /// Any other paint failure.
    #[error("paint failed: {0}")]
    Failed(String),
}

impl PaintError {
    /// Shorthand for [`PaintError::Failed`].
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}
