// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// The host environment refused an element operation.
///
/// The presenter logs these and treats the node as not ready; it retries on
/// a later frame.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DomError {
    /// Creating an element failed.
    #[error("cannot create <{tag}>: {reason}")]
    CreateElement {
        /// Requested tag name.
        tag: String,
        /// Host-provided reason.
        reason: String,
    },
    /// A canvas or its 2D context could not be obtained.
    #[error("no 2d canvas of {width}x{height}: {reason}")]
    Canvas {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
        /// Host-provided reason.
        reason: String,
    },
    /// Inserting an element into another failed.
    #[error("cannot attach element: {0}")]
    Attach(String),
}
